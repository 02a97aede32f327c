// ==========================================
// 库存补货决策系统 - 运行报告领域模型
// ==========================================
// 用途: 一次引擎运行的完整输出（结果 + 诊断 + 汇总）
// 红线: 报告由编排器独占构建, 产出后不可变; 核心不落库
// ==========================================

use crate::domain::types::{Diagnostic, RowError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// AllocationResult - 单品分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub sku: String,

    // ===== 需求侧 =====
    pub required_stock: i64,   // 需求量 = ceil(ADS × 备货天数)
    pub target_stock: i64,     // 目标库存 = ceil(需求量 × 安全系数)

    // ===== 容量侧 =====
    pub capacity_cap: f64,     // 本品最大可占件数（按公平份额折算）

    // ===== 订货量 =====
    pub raw_quantity: i64,     // 取整前订货量
    pub order_quantity: i64,   // 最终订货量（含包装取整）

    // ===== 金额（有单价时） =====
    pub order_value: Option<f64>,
}

// ==========================================
// CategorySummary - 类别汇总
// ==========================================
// 用途: 按类别观察需求份额与订货分布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub item_count: usize,
    pub order_quantity: i64,
    /// 该类别需求量占全部需求量的比例 (0.0 - 1.0)
    pub demand_share: f64,
}

// ==========================================
// RunSummary - 运行汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    // ===== 行处理统计 =====
    pub items_received: usize,        // 收到的原始行数
    pub items_validated: usize,       // 通过校验的行数
    pub items_rejected: usize,        // 被拒绝的行数

    // ===== 订货统计 =====
    pub items_ordered: usize,         // 订货量 > 0 的商品数
    pub total_order_quantity: i64,    // 订货总件数
    pub total_order_value: f64,       // 订货总金额（无单价的行计 0）

    // ===== 容量统计 =====
    pub total_shelf_slots_used: f64,  // 订货占用货架格数
    pub capacity_limited_count: usize, // 被容量压缩的商品数

    // ===== 类别分布 =====
    pub categories: Vec<CategorySummary>,
}

// ==========================================
// EngineReport - 引擎运行报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,

    /// 分配结果, 顺序 = 输入行顺序（输出可复现）
    pub results: Vec<AllocationResult>,

    /// sku → 诊断码列表（去重）
    pub diagnostics: HashMap<String, Vec<Diagnostic>>,

    /// 累积的行级错误（部分失败策略）
    pub row_errors: Vec<RowError>,

    pub summary: RunSummary,
}

impl EngineReport {
    /// 查询某 sku 的诊断码
    pub fn diagnostics_for(&self, sku: &str) -> &[Diagnostic] {
        self.diagnostics.get(sku).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 报告是否包含任何行级错误
    pub fn has_row_errors(&self) -> bool {
        !self.row_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RowErrorKind;

    fn sample_report() -> EngineReport {
        let mut diagnostics = HashMap::new();
        diagnostics.insert("SKU001".to_string(), vec![Diagnostic::CapacityLimited]);

        EngineReport {
            run_id: "test-run".to_string(),
            generated_at: Utc::now(),
            results: vec![AllocationResult {
                sku: "SKU001".to_string(),
                required_stock: 20,
                target_stock: 24,
                capacity_cap: 18.0,
                raw_quantity: 18,
                order_quantity: 18,
                order_value: None,
            }],
            diagnostics,
            row_errors: vec![RowError::missing_sku(2)],
            summary: RunSummary {
                items_received: 2,
                items_validated: 1,
                items_rejected: 1,
                items_ordered: 1,
                total_order_quantity: 18,
                total_order_value: 0.0,
                total_shelf_slots_used: 18.0,
                capacity_limited_count: 1,
                categories: vec![],
            },
        }
    }

    #[test]
    fn test_diagnostics_for_known_sku() {
        let report = sample_report();
        assert_eq!(
            report.diagnostics_for("SKU001"),
            &[Diagnostic::CapacityLimited]
        );
        assert!(report.diagnostics_for("SKU999").is_empty());
    }

    #[test]
    fn test_has_row_errors() {
        let report = sample_report();
        assert!(report.has_row_errors());
        assert_eq!(report.row_errors[0].kind, RowErrorKind::MissingSku);
    }
}
