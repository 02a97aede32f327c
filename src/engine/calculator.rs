// ==========================================
// 库存补货决策系统 - 订货量计算引擎
// ==========================================
// 职责: 需求量 + 现库存 + 安全系数 + 容量上限 → 取整前订货量
// 规则: target = ceil(required × safety); needed = max(target - stock, 0);
//       raw = min(needed, cap)
// 红线: 订货量永不为负; 超配商品订货量为 0
// ==========================================

use crate::domain::item::ItemRecord;
use crate::domain::policy::PolicyConfig;

// 容量上限取整容差（比例缩放的浮点误差不应吃掉整件）
const CAP_EPSILON: f64 = 1e-9;

/// 单品计算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityOutcome {
    pub target_stock: i64,
    pub needed: i64,
    pub raw_quantity: i64,
    /// needed 超过容量上限, 订货量被压缩
    pub capacity_limited: bool,
}

// ==========================================
// QuantityCalculator - 订货量计算引擎
// ==========================================
pub struct QuantityCalculator {
    // 无状态引擎
}

impl Default for QuantityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantityCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算取整前订货量
    ///
    /// # 参数
    /// - `record`: 商品记录
    /// - `required_stock`: 需求估算引擎的输出（件）
    /// - `capacity_cap`: 容量分配引擎给出的上限（件, 可为小数）
    pub fn compute(
        &self,
        record: &ItemRecord,
        required_stock: i64,
        capacity_cap: f64,
        policy: &PolicyConfig,
    ) -> QuantityOutcome {
        let target_stock = (required_stock as f64 * policy.safety_factor).ceil() as i64;
        let needed = (target_stock - record.current_stock).max(0);

        // 上限按整件截断（不足一件的份额不可下单）
        let cap_units = ((capacity_cap + CAP_EPSILON).floor() as i64).max(0);

        let raw_quantity = needed.min(cap_units);
        let capacity_limited = needed > cap_units;

        QuantityOutcome {
            target_stock,
            needed,
            raw_quantity,
            capacity_limited,
        }
    }
}
