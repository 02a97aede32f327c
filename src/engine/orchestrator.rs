// ==========================================
// 库存补货决策系统 - 引擎编排器
// ==========================================
// 用途: 协调五个核心引擎的执行顺序
// 数据流: Validator → Estimator → Allocator → Calculator → Rounder
// 红线: 策略校验失败即整单中止; 输出顺序 = 输入行顺序
// ==========================================

use crate::domain::item::{ItemRecord, RawItemRow};
use crate::domain::policy::PolicyConfig;
use crate::domain::report::{AllocationResult, CategorySummary, EngineReport, RunSummary};
use crate::domain::types::Diagnostic;
use crate::engine::allocator::ShelfAllocator;
use crate::engine::calculator::QuantityCalculator;
use crate::engine::error::EngineResult;
use crate::engine::estimator::DemandEstimator;
use crate::engine::rounder::PackageRounder;
use crate::engine::validator::RecordValidator;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// ReplenishmentOrchestrator - 引擎编排器
// ==========================================
pub struct ReplenishmentOrchestrator {
    validator: RecordValidator,
    estimator: DemandEstimator,
    allocator: ShelfAllocator,
    calculator: QuantityCalculator,
    rounder: PackageRounder,
}

impl Default for ReplenishmentOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplenishmentOrchestrator {
    pub fn new() -> Self {
        Self {
            validator: RecordValidator::new(),
            estimator: DemandEstimator::new(),
            allocator: ShelfAllocator::new(),
            calculator: QuantityCalculator::new(),
            rounder: PackageRounder::new(),
        }
    }

    /// 自定义校验器（批次上限等）
    pub fn with_validator(validator: RecordValidator) -> Self {
        Self {
            validator,
            ..Self::new()
        }
    }

    /// 执行完整补货计算流程
    ///
    /// # 参数
    /// - `raw_rows`: 导入层产出的原始行（顺序即输出顺序）
    /// - `policy`: 本次运行的不可变策略参数
    ///
    /// # 返回
    /// 引擎运行报告; 策略退化时返回 EngineError::Config, 不做任何分配
    pub fn run(
        &self,
        raw_rows: &[RawItemRow],
        policy: &PolicyConfig,
    ) -> EngineResult<EngineReport> {
        info!(
            rows = raw_rows.len(),
            days_supply = policy.days_supply,
            total_shelves = policy.total_shelves,
            safety_factor = policy.safety_factor,
            use_package_multiples = policy.use_package_multiples,
            "开始补货计算流程"
        );

        // ==========================================
        // 步骤0: 策略校验（快速失败, 无部分分配）
        // ==========================================
        policy.validate()?;

        // ==========================================
        // 步骤1: Record Validator - 行级校验
        // ==========================================
        debug!("步骤1: 执行行级校验");

        let (records, row_errors) = self.validator.validate(raw_rows, policy);

        info!(
            valid_count = records.len(),
            error_count = row_errors.len(),
            "行级校验完成"
        );

        // ==========================================
        // 步骤2: Demand Estimator - 需求估算
        // ==========================================
        debug!("步骤2: 执行需求估算");

        let demands: Vec<(ItemRecord, i64)> = records
            .into_iter()
            .map(|record| {
                let required = self.estimator.estimate(&record, policy);
                (record, required)
            })
            .collect();

        // ==========================================
        // 步骤3: Shelf Allocator - 容量分配（同步屏障）
        // ==========================================
        debug!("步骤3: 执行货架容量分配");

        let allocation = self.allocator.allocate(&demands, policy)?;

        let mut diagnostics: HashMap<String, Vec<Diagnostic>> = HashMap::new();
        for sku in &allocation.capacity_limited {
            push_diagnostic(&mut diagnostics, sku, Diagnostic::CapacityLimited);
        }

        // ==========================================
        // 步骤4: Calculator + Rounder - 逐品计算订货量
        // ==========================================
        debug!("步骤4: 执行订货量计算与包装取整");

        let mut results = Vec::with_capacity(demands.len());
        for (record, required_stock) in &demands {
            let capacity_cap = allocation.capacity_caps[&record.sku];

            let quantity = self
                .calculator
                .compute(record, *required_stock, capacity_cap, policy);
            if quantity.capacity_limited {
                push_diagnostic(&mut diagnostics, &record.sku, Diagnostic::CapacityLimited);
            }

            let rounding = self.rounder.round(
                quantity.raw_quantity,
                record.package_multiple,
                capacity_cap,
                policy,
            );
            if rounding.rounded_down_for_capacity {
                push_diagnostic(
                    &mut diagnostics,
                    &record.sku,
                    Diagnostic::RoundedDownForCapacity,
                );
            }

            let order_value = record
                .price
                .map(|price| price * rounding.final_quantity as f64);

            results.push(AllocationResult {
                sku: record.sku.clone(),
                required_stock: *required_stock,
                target_stock: quantity.target_stock,
                capacity_cap,
                raw_quantity: quantity.raw_quantity,
                order_quantity: rounding.final_quantity,
                order_value,
            });
        }

        // ==========================================
        // 步骤5: 运行汇总
        // ==========================================
        debug!("步骤5: 生成运行汇总");

        let summary = build_summary(raw_rows.len(), &demands, &results, &diagnostics);

        info!(
            items_ordered = summary.items_ordered,
            total_order_quantity = summary.total_order_quantity,
            total_shelf_slots_used = summary.total_shelf_slots_used,
            capacity_limited_count = summary.capacity_limited_count,
            "补货计算流程完成"
        );

        Ok(EngineReport {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            results,
            diagnostics,
            row_errors,
            summary,
        })
    }
}

/// 追加诊断码（去重）
fn push_diagnostic(
    diagnostics: &mut HashMap<String, Vec<Diagnostic>>,
    sku: &str,
    diagnostic: Diagnostic,
) {
    let entry = diagnostics.entry(sku.to_string()).or_default();
    if !entry.contains(&diagnostic) {
        entry.push(diagnostic);
    }
}

/// 生成运行汇总（含类别分布）
fn build_summary(
    items_received: usize,
    demands: &[(ItemRecord, i64)],
    results: &[AllocationResult],
    diagnostics: &HashMap<String, Vec<Diagnostic>>,
) -> RunSummary {
    let items_validated = demands.len();
    let items_ordered = results.iter().filter(|r| r.order_quantity > 0).count();
    let total_order_quantity: i64 = results.iter().map(|r| r.order_quantity).sum();
    let total_order_value: f64 = results.iter().filter_map(|r| r.order_value).sum();
    let total_shelf_slots_used: f64 = demands
        .iter()
        .zip(results.iter())
        .map(|((record, _), result)| result.order_quantity as f64 * record.shelf_footprint)
        .sum();
    let capacity_limited_count = diagnostics
        .values()
        .filter(|diags| diags.contains(&Diagnostic::CapacityLimited))
        .count();

    // 类别分布: BTreeMap 保证输出顺序可复现
    let total_required: i64 = demands.iter().map(|(_, required)| *required).sum();
    let mut by_category: BTreeMap<String, (usize, i64, i64)> = BTreeMap::new();
    for ((record, required), result) in demands.iter().zip(results.iter()) {
        let entry = by_category
            .entry(record.category_label().to_string())
            .or_default();
        entry.0 += 1;
        entry.1 += result.order_quantity;
        entry.2 += *required;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, (item_count, order_quantity, required))| CategorySummary {
            category,
            item_count,
            order_quantity,
            demand_share: if total_required > 0 {
                required as f64 / total_required as f64
            } else {
                0.0
            },
        })
        .collect();

    RunSummary {
        items_received,
        items_validated,
        items_rejected: items_received - items_validated,
        items_ordered,
        total_order_quantity,
        total_order_value,
        total_shelf_slots_used,
        capacity_limited_count,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(fields: &[(&str, &str)]) -> RawItemRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_run_rejects_degenerate_policy_before_validation() {
        let orchestrator = ReplenishmentOrchestrator::new();
        let policy = PolicyConfig {
            total_shelves: -5.0,
            ..PolicyConfig::default()
        };
        let rows = vec![make_row(&[("sku", "SKU001")])];

        let result = orchestrator.run(&rows, &policy);

        assert!(result.is_err());
    }

    #[test]
    fn test_run_preserves_input_order() {
        let orchestrator = ReplenishmentOrchestrator::new();
        let rows = vec![
            make_row(&[("sku", "ZZZ"), ("daily_sales_rate", "1")]),
            make_row(&[("sku", "AAA"), ("daily_sales_rate", "1")]),
            make_row(&[("sku", "MMM"), ("daily_sales_rate", "1")]),
        ];

        let report = orchestrator.run(&rows, &PolicyConfig::default()).unwrap();

        let order: Vec<&str> = report.results.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(order, vec!["ZZZ", "AAA", "MMM"]);
    }

    #[test]
    fn test_run_empty_batch() {
        let orchestrator = ReplenishmentOrchestrator::new();

        let report = orchestrator.run(&[], &PolicyConfig::default()).unwrap();

        assert!(report.results.is_empty());
        assert!(report.row_errors.is_empty());
        assert_eq!(report.summary.items_received, 0);
        assert_eq!(report.summary.total_order_quantity, 0);
    }

    #[test]
    fn test_push_diagnostic_dedupes() {
        let mut diagnostics = HashMap::new();
        push_diagnostic(&mut diagnostics, "SKU001", Diagnostic::CapacityLimited);
        push_diagnostic(&mut diagnostics, "SKU001", Diagnostic::CapacityLimited);
        push_diagnostic(
            &mut diagnostics,
            "SKU001",
            Diagnostic::RoundedDownForCapacity,
        );

        assert_eq!(diagnostics["SKU001"].len(), 2);
    }

    #[test]
    fn test_run_summary_counts() {
        let orchestrator = ReplenishmentOrchestrator::new();
        let rows = vec![
            make_row(&[
                ("sku", "SKU001"),
                ("daily_sales_rate", "2"),
                ("price", "10.0"),
                ("category", "Drinks"),
            ]),
            make_row(&[("sku", "SKU002"), ("current_stock", "bad")]),
        ];
        let policy = PolicyConfig {
            safety_factor: 1.0,
            ..PolicyConfig::default()
        };

        let report = orchestrator.run(&rows, &policy).unwrap();

        assert_eq!(report.summary.items_received, 2);
        assert_eq!(report.summary.items_validated, 1);
        assert_eq!(report.summary.items_rejected, 1);
        assert_eq!(report.summary.items_ordered, 1);
        assert_eq!(report.summary.total_order_quantity, 20);
        assert!((report.summary.total_order_value - 200.0).abs() < 1e-9);
        assert_eq!(report.summary.categories.len(), 1);
        assert_eq!(report.summary.categories[0].category, "Drinks");
        assert!((report.summary.categories[0].demand_share - 1.0).abs() < 1e-9);
    }
}
