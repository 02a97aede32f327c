// ==========================================
// 库存补货决策系统 - 导入层
// ==========================================
// 职责: 外部表格文件 → 宽松字符串行
// 红线: 导入层不做业务校验, 列名映射与范围检查归校验引擎
// ==========================================

pub mod error;
pub mod file_parser;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
