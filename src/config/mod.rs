// ==========================================
// 库存补货决策系统 - 配置层
// ==========================================
// 职责: 用户可见设置 → 不可变 PolicyConfig
// 红线: 策略对象每次运行构建一次, 运行中不可变
// ==========================================

pub mod settings;

pub use settings::{PolicySettings, SettingsError};
