// ==========================================
// 库存补货决策系统 - 引擎层
// ==========================================
// 职责: 实现补货计算规则, 不做任何 I/O
// 红线: Engine 不读文件不落库, 所有压缩/拒绝必须输出 reason
// ==========================================
// 数据流: Validator → Estimator → Allocator → Calculator → Rounder
// 同步屏障: Allocator 需要全量未封顶需求后才能给出任何容量上限
// ==========================================

pub mod allocator;
pub mod calculator;
pub mod error;
pub mod estimator;
pub mod orchestrator;
pub mod rounder;
pub mod validator;

// 重导出核心引擎
pub use allocator::{AllocationOutcome, ShelfAllocator};
pub use calculator::{QuantityCalculator, QuantityOutcome};
pub use error::EngineError;
pub use estimator::DemandEstimator;
pub use orchestrator::ReplenishmentOrchestrator;
pub use rounder::{PackageRounder, RoundingOutcome};
pub use validator::RecordValidator;
