// ==========================================
// 库存补货决策系统 - 领域层
// ==========================================
// 职责: 定义补货引擎的实体、策略与报告结构
// 红线: 领域对象不做 I/O, 引擎输出必须可解释
// ==========================================

pub mod item;
pub mod policy;
pub mod report;
pub mod types;

// 重导出领域实体
pub use item::ItemRecord;
pub use policy::{ConfigError, PolicyConfig};
pub use report::{AllocationResult, CategorySummary, EngineReport, RunSummary};
pub use types::{Diagnostic, RowError, RowErrorKind};
