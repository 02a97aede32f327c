// ==========================================
// 库存补货决策系统 - 包装取整引擎
// ==========================================
// 职责: 订货量对齐箱规, 同时不突破容量上限
// 红线: 本引擎承载整个系统的核心裁决规则 ——
//       优先满足需求（向上取整）, 但绝不违反共享容量约束
// ==========================================

use crate::domain::policy::PolicyConfig;

// 与 QuantityCalculator 相同的上限取整容差
const CAP_EPSILON: f64 = 1e-9;

/// 单品取整结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingOutcome {
    pub final_quantity: i64,
    /// 为满足容量约束向下取整（含取整至 0 的情形）
    pub rounded_down_for_capacity: bool,
}

// ==========================================
// PackageRounder - 包装取整引擎
// ==========================================
pub struct PackageRounder {
    // 无状态引擎
}

impl Default for PackageRounder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageRounder {
    pub fn new() -> Self {
        Self {}
    }

    /// 取整订货量
    ///
    /// 规则:
    /// 1) 未启用箱规取整或箱规 ≤ 1 → 原样返回
    /// 2) 默认向上取整到箱规倍数（不欠订需求）
    /// 3) 向上取整突破容量上限 → 改为向下取整到 ≤ 上限的最大倍数;
    ///    该值为 0 时订货量为 0, 并记录诊断
    pub fn round(
        &self,
        raw_quantity: i64,
        package_multiple: i64,
        capacity_cap: f64,
        policy: &PolicyConfig,
    ) -> RoundingOutcome {
        if !policy.use_package_multiples || package_multiple <= 1 || raw_quantity <= 0 {
            return RoundingOutcome {
                final_quantity: raw_quantity.max(0),
                rounded_down_for_capacity: false,
            };
        }

        let multiple = package_multiple;
        let rounded_up = ((raw_quantity + multiple - 1) / multiple) * multiple;
        let cap_units = ((capacity_cap + CAP_EPSILON).floor() as i64).max(0);

        if rounded_up <= cap_units {
            return RoundingOutcome {
                final_quantity: rounded_up,
                rounded_down_for_capacity: false,
            };
        }

        // 向上会突破容量 → 向下取整到 ≤ 上限的最大箱规倍数
        let rounded_down = (cap_units / multiple) * multiple;
        RoundingOutcome {
            final_quantity: rounded_down,
            rounded_down_for_capacity: true,
        }
    }
}
