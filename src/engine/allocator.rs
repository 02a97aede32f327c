// ==========================================
// 库存补货决策系统 - 货架容量分配引擎
// ==========================================
// 红线: 容量约束优先于单品需求
// 职责: 把有限货架总格数在竞争商品间按比例公平分摊
// 输入: 全量 (记录, 需求量) 对 —— 本引擎为同步屏障,
//       必须拿到所有未封顶需求后才能产出任何容量上限
// 输出: sku → 容量上限（件）+ 被压缩商品清单
// ==========================================

use crate::domain::item::ItemRecord;
use crate::domain::policy::{ConfigError, PolicyConfig};
use std::collections::HashMap;
use tracing::{debug, info};

// 浮点比较容差（份额缩放带来的舍入误差）
const EPSILON: f64 = 1e-9;

/// 分配结果: 容量上限与压缩清单
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// sku → 本品最大可占件数
    pub capacity_caps: HashMap<String, f64>,
    /// 上限低于未封顶需求的 sku（按输入顺序）
    pub capacity_limited: Vec<String>,
}

// ==========================================
// ShelfAllocator - 货架容量分配引擎
// ==========================================
pub struct ShelfAllocator {
    // 无状态引擎
}

impl Default for ShelfAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelfAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 两遍水位分配
    ///
    /// 规则:
    /// 1) 未封顶需求占位 = 需求量 × 安全系数 × 单件占位
    /// 2) 占位总和 ≤ 货架总格数 → 全部不封顶
    /// 3) 否则按 total_shelves / sum 比例统一缩放（按份额公平,
    ///    不是先到先得）, 上限 = 缩放后占位 ÷ 单件占位
    /// 4) 上限低于未封顶需求的商品记入压缩清单
    ///
    /// 给定相同输入顺序, 结果完全确定。
    pub fn allocate(
        &self,
        demands: &[(ItemRecord, i64)],
        policy: &PolicyConfig,
    ) -> Result<AllocationOutcome, ConfigError> {
        // 退化策略检查（防止除零）
        if !policy.total_shelves.is_finite() || policy.total_shelves <= 0.0 {
            return Err(ConfigError::NonPositiveShelves(policy.total_shelves));
        }
        if !demands.is_empty()
            && demands.iter().all(|(record, _)| record.shelf_footprint <= 0.0)
        {
            return Err(ConfigError::NoUsableFootprint);
        }

        // 第一遍: 未封顶需求占位
        let uncapped: Vec<f64> = demands
            .iter()
            .map(|(record, required)| {
                *required as f64 * policy.safety_factor * record.shelf_footprint
            })
            .collect();
        let total_uncapped: f64 = uncapped.iter().sum();

        debug!(
            items = demands.len(),
            total_uncapped_footprint = total_uncapped,
            total_shelves = policy.total_shelves,
            "货架容量第一遍扫描完成"
        );

        // 第二遍: 确定每个商品的容量上限
        let mut capacity_caps = HashMap::with_capacity(demands.len());
        let mut capacity_limited = Vec::new();

        if total_uncapped <= policy.total_shelves {
            // 容量充足: 全部不封顶（上限 = 自身未封顶件数）
            for ((record, _), footprint) in demands.iter().zip(uncapped.iter()) {
                capacity_caps.insert(record.sku.clone(), footprint / record.shelf_footprint);
            }
        } else {
            // 容量不足: 按比例公平缩放
            let scale = policy.total_shelves / total_uncapped;
            for ((record, _), footprint) in demands.iter().zip(uncapped.iter()) {
                let entitlement_footprint = footprint * scale;
                let cap_units = entitlement_footprint / record.shelf_footprint;
                let uncapped_units = footprint / record.shelf_footprint;

                if cap_units + EPSILON < uncapped_units {
                    capacity_limited.push(record.sku.clone());
                }
                capacity_caps.insert(record.sku.clone(), cap_units);
            }
        }

        info!(
            items = demands.len(),
            limited_count = capacity_limited.len(),
            "货架容量分配完成"
        );

        Ok(AllocationOutcome {
            capacity_caps,
            capacity_limited,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, footprint: f64) -> ItemRecord {
        ItemRecord {
            sku: sku.to_string(),
            current_stock: 0,
            daily_sales_rate: 0.0,
            shelf_footprint: footprint,
            package_multiple: 1,
            name: None,
            category: None,
            price: None,
        }
    }

    fn policy(total_shelves: f64, safety_factor: f64) -> PolicyConfig {
        PolicyConfig {
            total_shelves,
            safety_factor,
            ..PolicyConfig::default()
        }
    }

    #[test]
    fn test_allocate_unconstrained_when_capacity_suffices() {
        let allocator = ShelfAllocator::new();
        let demands = vec![(record("A", 1.0), 50), (record("B", 2.0), 20)];

        // 占位 = 50 + 40 = 90 ≤ 1000
        let outcome = allocator
            .allocate(&demands, &policy(1000.0, 1.0))
            .unwrap();

        assert!(outcome.capacity_limited.is_empty());
        assert!((outcome.capacity_caps["A"] - 50.0).abs() < 1e-9);
        assert!((outcome.capacity_caps["B"] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_allocate_proportional_fair_share() {
        let allocator = ShelfAllocator::new();
        // 两个商品各需 100 件, 占位 1, 总容量 150 → 各压缩至 75
        let demands = vec![(record("A", 1.0), 100), (record("B", 1.0), 100)];

        let outcome = allocator.allocate(&demands, &policy(150.0, 1.0)).unwrap();

        assert!((outcome.capacity_caps["A"] - 75.0).abs() < 1e-9);
        assert!((outcome.capacity_caps["B"] - 75.0).abs() < 1e-9);
        assert_eq!(outcome.capacity_limited, vec!["A", "B"]);
    }

    #[test]
    fn test_allocate_does_not_starve_high_footprint_item() {
        let allocator = ShelfAllocator::new();
        // 大占位商品与小占位商品竞争: 份额按占位比例, 不是先到先得
        let demands = vec![(record("SMALL", 1.0), 100), (record("BIG", 5.0), 100)];

        let outcome = allocator.allocate(&demands, &policy(300.0, 1.0)).unwrap();

        // 占位 100 + 500 = 600, 缩放 0.5 → SMALL 50 件, BIG 50 件
        assert!((outcome.capacity_caps["SMALL"] - 50.0).abs() < 1e-9);
        assert!((outcome.capacity_caps["BIG"] - 50.0).abs() < 1e-9);

        // 缩放后全局约束依旧成立
        let used: f64 = outcome.capacity_caps["SMALL"] * 1.0 + outcome.capacity_caps["BIG"] * 5.0;
        assert!(used <= 300.0 + 1e-6);
    }

    #[test]
    fn test_allocate_applies_safety_factor() {
        let allocator = ShelfAllocator::new();
        let demands = vec![(record("A", 1.0), 100)];

        // 未封顶占位 = 100 × 1.2 = 120 > 100 → 上限压缩至 100
        let outcome = allocator.allocate(&demands, &policy(100.0, 1.2)).unwrap();

        assert!((outcome.capacity_caps["A"] - 100.0).abs() < 1e-9);
        assert_eq!(outcome.capacity_limited, vec!["A"]);
    }

    #[test]
    fn test_allocate_zero_shelves_is_config_error() {
        let allocator = ShelfAllocator::new();
        let demands = vec![(record("A", 1.0), 10)];

        let result = allocator.allocate(&demands, &policy(0.0, 1.0));

        assert!(matches!(result, Err(ConfigError::NonPositiveShelves(_))));
    }

    #[test]
    fn test_allocate_all_zero_footprints_is_config_error() {
        let allocator = ShelfAllocator::new();
        let demands = vec![(record("A", 0.0), 10)];

        let result = allocator.allocate(&demands, &policy(100.0, 1.0));

        assert!(matches!(result, Err(ConfigError::NoUsableFootprint)));
    }

    #[test]
    fn test_allocate_empty_batch() {
        let allocator = ShelfAllocator::new();

        let outcome = allocator.allocate(&[], &policy(100.0, 1.0)).unwrap();

        assert!(outcome.capacity_caps.is_empty());
        assert!(outcome.capacity_limited.is_empty());
    }

    #[test]
    fn test_allocate_deterministic() {
        let allocator = ShelfAllocator::new();
        let demands = vec![
            (record("A", 1.5), 40),
            (record("B", 0.7), 90),
            (record("C", 2.2), 10),
        ];
        let p = policy(80.0, 1.2);

        let first = allocator.allocate(&demands, &p).unwrap();
        let second = allocator.allocate(&demands, &p).unwrap();

        assert_eq!(first.capacity_limited, second.capacity_limited);
        for (sku, cap) in &first.capacity_caps {
            assert!((cap - second.capacity_caps[sku]).abs() < 1e-12);
        }
    }
}
