// ==========================================
// 库存补货决策系统 - 需求估算引擎
// ==========================================
// 职责: 由日均销量与备货天数推算需求量
// 规则: required_stock = ceil(ADS × days_supply)
// 前置: 负数/非有限销量已在校验阶段拒绝
// ==========================================

use crate::domain::item::ItemRecord;
use crate::domain::policy::PolicyConfig;

// ==========================================
// DemandEstimator - 需求估算引擎
// ==========================================
pub struct DemandEstimator {
    // 无状态引擎
}

impl Default for DemandEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl DemandEstimator {
    pub fn new() -> Self {
        Self {}
    }

    /// 估算单品需求量（件）
    ///
    /// 零销量商品需求量为 0（不由需求驱动订货, 安全库存另算）
    pub fn estimate(&self, record: &ItemRecord, policy: &PolicyConfig) -> i64 {
        (record.daily_sales_rate * policy.days_supply as f64).ceil() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_rate(rate: f64) -> ItemRecord {
        ItemRecord {
            sku: "SKU001".to_string(),
            current_stock: 0,
            daily_sales_rate: rate,
            shelf_footprint: 1.0,
            package_multiple: 1,
            name: None,
            category: None,
            price: None,
        }
    }

    #[test]
    fn test_estimate_basic() {
        let estimator = DemandEstimator::new();
        let policy = PolicyConfig {
            days_supply: 10,
            ..PolicyConfig::default()
        };

        assert_eq!(estimator.estimate(&record_with_rate(2.0), &policy), 20);
    }

    #[test]
    fn test_estimate_rounds_up() {
        let estimator = DemandEstimator::new();
        let policy = PolicyConfig {
            days_supply: 10,
            ..PolicyConfig::default()
        };

        // 2.31 × 10 = 23.1 → 24
        assert_eq!(estimator.estimate(&record_with_rate(2.31), &policy), 24);
    }

    #[test]
    fn test_estimate_zero_velocity() {
        let estimator = DemandEstimator::new();
        let policy = PolicyConfig::default();

        assert_eq!(estimator.estimate(&record_with_rate(0.0), &policy), 0);
    }

    #[test]
    fn test_estimate_monotone_in_days_supply() {
        let estimator = DemandEstimator::new();
        let record = record_with_rate(1.7);

        let mut last = 0;
        for days in 1..=30 {
            let policy = PolicyConfig {
                days_supply: days,
                ..PolicyConfig::default()
            };
            let required = estimator.estimate(&record, &policy);
            assert!(required >= last, "备货天数增加时需求量不得下降");
            last = required;
        }
    }
}
