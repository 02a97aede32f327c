// ==========================================
// 库存补货决策系统 - 策略设置
// ==========================================
// 职责: 设置文件/命令行覆盖项 → PolicyConfig
// 存储: JSON 设置文件（可选, 缺失字段取系统默认值）
// ==========================================

use crate::domain::policy::PolicyConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// 设置层错误类型
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("设置文件读取失败: {0}")]
    FileReadError(String),

    #[error("设置文件解析失败: {0}")]
    ParseError(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::ParseError(err.to_string())
    }
}

// ==========================================
// PolicySettings - 用户设置覆盖项
// ==========================================
// 所有字段可选, 未给出的字段取 PolicyConfig 默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySettings {
    pub days_supply: Option<i64>,
    pub safety_factor: Option<f64>,
    pub total_shelves: Option<f64>,
    pub use_package_multiples: Option<bool>,
    pub default_package_multiple: Option<i64>,
}

impl PolicySettings {
    /// 从 JSON 设置文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: PolicySettings = serde_json::from_str(&content)?;

        debug!(path = %path.as_ref().display(), "设置文件加载完成");
        Ok(settings)
    }

    /// 叠加到默认策略上, 生成本次运行的 PolicyConfig
    pub fn into_policy(self) -> PolicyConfig {
        let defaults = PolicyConfig::default();
        PolicyConfig {
            days_supply: self.days_supply.unwrap_or(defaults.days_supply),
            safety_factor: self.safety_factor.unwrap_or(defaults.safety_factor),
            total_shelves: self.total_shelves.unwrap_or(defaults.total_shelves),
            use_package_multiples: self
                .use_package_multiples
                .unwrap_or(defaults.use_package_multiples),
            default_package_multiple: self
                .default_package_multiple
                .unwrap_or(defaults.default_package_multiple),
        }
    }
}
