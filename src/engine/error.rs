// ==========================================
// 库存补货决策系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 依据: 行级错误走 RowError 累积通道, 此处仅承载整单致命错误
// ==========================================

use crate::domain::policy::ConfigError;
use thiserror::Error;

/// 引擎层错误类型
///
/// 配置错误在任何分配发生之前中止整单运行;
/// 单行数据问题不会出现在这里（见 RowError）。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("策略配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
