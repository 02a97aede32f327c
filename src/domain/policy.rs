// ==========================================
// 库存补货决策系统 - 策略参数领域模型
// ==========================================
// 用途: 一次运行的不可变策略输入
// 红线: 运行中不得修改策略; 退化策略必须在分配前失败
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===== 策略默认值 =====
pub const DEFAULT_DAYS_SUPPLY: i64 = 10;
pub const DEFAULT_TOTAL_SHELVES: f64 = 786.0;
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.2;
pub const DEFAULT_PACKAGE_MULTIPLE: i64 = 4;

// ==========================================
// PolicyConfig - 补货策略参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    // ===== 需求口径 =====
    pub days_supply: i64,              // 目标备货天数 (> 0)
    pub safety_factor: f64,            // 安全系数 (>= 1.0)

    // ===== 共享货架容量 =====
    pub total_shelves: f64,            // 货架总格数 (> 0, 全局约束)

    // ===== 包装取整 =====
    pub use_package_multiples: bool,   // 是否按箱规取整
    pub default_package_multiple: i64, // 行内未给箱规时的标准箱规 (>= 1)
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            days_supply: DEFAULT_DAYS_SUPPLY,
            safety_factor: DEFAULT_SAFETY_FACTOR,
            total_shelves: DEFAULT_TOTAL_SHELVES,
            use_package_multiples: false,
            default_package_multiple: DEFAULT_PACKAGE_MULTIPLE,
        }
    }
}

impl PolicyConfig {
    /// 校验策略参数
    ///
    /// 退化策略（货架容量非正等）整单失败, 不做任何分配
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days_supply <= 0 {
            return Err(ConfigError::NonPositiveDaysSupply(self.days_supply));
        }
        if !self.total_shelves.is_finite() || self.total_shelves <= 0.0 {
            return Err(ConfigError::NonPositiveShelves(self.total_shelves));
        }
        if !self.safety_factor.is_finite() || self.safety_factor < 1.0 {
            return Err(ConfigError::SafetyFactorTooSmall(self.safety_factor));
        }
        if self.default_package_multiple < 1 {
            return Err(ConfigError::InvalidPackageMultiple(
                self.default_package_multiple,
            ));
        }
        Ok(())
    }
}

// ==========================================
// ConfigError - 策略配置错误
// ==========================================
// 依据: 配置错误为整单致命错误, 分配开始前即中止
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("备货天数必须为正数, 实际: {0}")]
    NonPositiveDaysSupply(i64),

    #[error("货架总格数必须为正数, 实际: {0}")]
    NonPositiveShelves(f64),

    #[error("安全系数必须 >= 1.0, 实际: {0}")]
    SafetyFactorTooSmall(f64),

    #[error("标准箱规必须 >= 1, 实际: {0}")]
    InvalidPackageMultiple(i64),

    #[error("所有商品货架占位为零, 无法分配容量")]
    NoUsableFootprint,
}
