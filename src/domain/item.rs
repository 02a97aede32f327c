// ==========================================
// 库存补货决策系统 - 商品记录领域模型
// ==========================================
// 用途: 校验后的单行输入, 进入引擎前的唯一数据形态
// 红线: 引擎只接受通过校验的 ItemRecord
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始输入行（字段名 → 单元格文本），由导入层产出
pub type RawItemRow = HashMap<String, String>;

// ==========================================
// ItemRecord - 商品记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    // ===== 主键 =====
    pub sku: String,               // 商品编码（批次内唯一）

    // ===== 库存与销售 =====
    pub current_stock: i64,        // 当前库存（件, >= 0）
    pub daily_sales_rate: f64,     // 日均销量 ADS（件/天, >= 0）

    // ===== 货架维度 =====
    pub shelf_footprint: f64,      // 单件货架占位（格, > 0）
    pub package_multiple: i64,     // 包装箱规（件/箱, >= 1, 不启用取整时为 1）

    // ===== 可选描述字段 =====
    pub name: Option<String>,      // 商品名称
    pub category: Option<String>,  // 商品类别
    pub price: Option<f64>,        // 单价（>= 0, 用于计算订货金额）
}

impl ItemRecord {
    /// 当前需求在货架上的占位（件数 × 单件占位）
    pub fn demand_footprint(&self, units: f64) -> f64 {
        units * self.shelf_footprint
    }

    /// 类别名（缺失时归入 "Unknown", 与导入数据清洗口径一致）
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("Unknown")
    }
}
