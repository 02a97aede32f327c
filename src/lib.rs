// ==========================================
// 库存补货决策系统 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 导入
// 系统定位: 订货量决策支持 (人工最终控制权)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 补货计算规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 订货清单输出
pub mod exporter;

// 配置层 - 策略参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Diagnostic, RowError, RowErrorKind};

// 领域实体
pub use domain::{
    AllocationResult, CategorySummary, ConfigError, EngineReport, ItemRecord, PolicyConfig,
    RunSummary,
};

// 引擎
pub use engine::{
    DemandEstimator, EngineError, PackageRounder, QuantityCalculator, RecordValidator,
    ReplenishmentOrchestrator, ShelfAllocator,
};

// 导入/导出
pub use exporter::OrderExporter;
pub use importer::UniversalFileParser;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存补货决策系统";
