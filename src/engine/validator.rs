// ==========================================
// 库存补货决策系统 - 记录校验引擎
// ==========================================
// 职责: 原始行 → ItemRecord 规范化 + 行级校验
// 红线: 单行损坏不阻断整批, 错误累积返回（部分失败策略）
// 输入: 导入层产出的宽松字符串行（列名 → 单元格文本）
// 输出: (有效记录列表, 行级错误列表)
// ==========================================

use crate::domain::item::{ItemRecord, RawItemRow};
use crate::domain::policy::PolicyConfig;
use crate::domain::types::RowError;
use std::collections::HashSet;
use tracing::{debug, info};

// ===== 批次上限（整批拒绝阈值） =====
pub const MAX_BATCH_ROWS: usize = 100_000;
pub const MAX_BATCH_COLUMNS: usize = 100;

// ==========================================
// RecordValidator - 记录校验引擎
// ==========================================
pub struct RecordValidator {
    max_rows: usize,
    max_columns: usize,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {
            max_rows: MAX_BATCH_ROWS,
            max_columns: MAX_BATCH_COLUMNS,
        }
    }

    /// 自定义批次上限（测试与特殊部署场景）
    pub fn with_limits(max_rows: usize, max_columns: usize) -> Self {
        Self {
            max_rows,
            max_columns,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校验整批原始行
    ///
    /// 规则:
    /// 1) 行数/列数上限先于行级校验, 超限整批拒绝且不产出任何有效行
    /// 2) sku 非空且批次内唯一, 重复时丢弃后出现的行
    /// 3) 数值字段必须可解析且满足范围约束; 缺失字段取默认值
    /// 4) 错误累积返回, 一行损坏不影响其余行
    ///
    /// # 返回
    /// (有效记录列表, 行级错误列表)
    pub fn validate(
        &self,
        raw_rows: &[RawItemRow],
        policy: &PolicyConfig,
    ) -> (Vec<ItemRecord>, Vec<RowError>) {
        debug!(rows = raw_rows.len(), "开始行级校验");

        // 1. 批次上限检查（先于一切行级校验）
        if raw_rows.len() > self.max_rows {
            return (
                Vec::new(),
                vec![RowError::batch_too_large(format!(
                    "行数超限: {} > {}",
                    raw_rows.len(),
                    self.max_rows
                ))],
            );
        }
        if let Some(widest) = raw_rows.iter().map(|row| row.len()).max() {
            if widest > self.max_columns {
                return (
                    Vec::new(),
                    vec![RowError::batch_too_large(format!(
                        "列数超限: {} > {}",
                        widest, self.max_columns
                    ))],
                );
            }
        }

        // 2. 行级校验
        let mut valid = Vec::new();
        let mut errors = Vec::new();
        let mut seen_skus: HashSet<String> = HashSet::new();

        for (idx, row) in raw_rows.iter().enumerate() {
            let row_index = idx + 1;

            // 主键: sku 非空
            let sku = match self.get_field(row, "sku") {
                Some(value) => value,
                None => {
                    errors.push(RowError::missing_sku(row_index));
                    continue;
                }
            };

            // 主键: 批次内唯一, 后出现的行丢弃（不合并）
            if !seen_skus.insert(sku.clone()) {
                errors.push(RowError::duplicate_sku(row_index, &sku));
                continue;
            }

            // 数值字段: 缺失取默认, 存在则必须可解析且在范围内
            let mut row_errors = Vec::new();

            let current_stock =
                self.parse_stock(row, "current_stock", row_index, &mut row_errors);
            let daily_sales_rate =
                self.parse_rate(row, "daily_sales_rate", row_index, &mut row_errors);
            let shelf_footprint =
                self.parse_footprint(row, "shelf_footprint", row_index, &mut row_errors);
            let package_multiple =
                self.parse_multiple(row, "package_multiple", row_index, policy, &mut row_errors);
            let price = self.parse_price(row, "price", row_index, &mut row_errors);

            if !row_errors.is_empty() {
                // 该行被拒绝; 释放 sku 以免误判后续行为重复
                seen_skus.remove(&sku);
                errors.extend(row_errors);
                continue;
            }

            valid.push(ItemRecord {
                sku,
                current_stock,
                daily_sales_rate,
                shelf_footprint,
                package_multiple,
                name: self.get_field(row, "name"),
                category: self.get_field(row, "category"),
                price,
            });
        }

        info!(
            valid_count = valid.len(),
            error_count = errors.len(),
            "行级校验完成"
        );

        (valid, errors)
    }

    // ==========================================
    // 字段提取（列名别名, 大小写/空白不敏感）
    // ==========================================

    /// 提取字符串字段（返回 Option），支持多个可能的列名（别名）
    ///
    /// 别名覆盖原始表格的俄文/英文列名习惯。
    /// 同一逻辑字段出现多个别名列时按别名优先级取值,
    /// 与行内列序无关（结果可复现）。
    fn get_field(&self, row: &RawItemRow, key: &str) -> Option<String> {
        let aliases: Vec<&str> = match key {
            "sku" => vec!["sku", "код", "артикул", "id", "номер"],
            "name" => vec!["name", "наименование", "название", "товар"],
            "category" => vec!["category", "категория", "группа", "group"],
            "current_stock" => vec![
                "current_stock",
                "stock",
                "остаток",
                "balance",
                "qty",
                "количество",
            ],
            "daily_sales_rate" => vec![
                "daily_sales_rate",
                "ads",
                "средние продажи",
                "продажи в день",
                "sales",
            ],
            "shelf_footprint" => vec![
                "shelf_footprint",
                "footprint",
                "место",
                "занимаемое место",
            ],
            "package_multiple" => vec![
                "package_multiple",
                "multiple",
                "кратность",
                "кратность упаковки",
            ],
            "price" => vec!["price", "цена", "стоимость", "cost"],
            _ => vec![key],
        };

        // 规范化列名并排序, 消除 HashMap 遍历顺序的影响
        let mut columns: Vec<(String, &String)> = row
            .iter()
            .map(|(column, value)| (column.trim().to_lowercase(), value))
            .collect();
        columns.sort();

        for alias in &aliases {
            for (normalized, value) in &columns {
                if normalized == alias {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
            }
        }
        None
    }

    // ==========================================
    // 数值字段解析
    // ==========================================

    /// 当前库存: 整数 >= 0, 缺失取 0
    fn parse_stock(
        &self,
        row: &RawItemRow,
        key: &str,
        row_index: usize,
        errors: &mut Vec<RowError>,
    ) -> i64 {
        match self.get_field(row, key) {
            None => 0,
            Some(value) => match value.parse::<i64>() {
                Ok(n) if n >= 0 => n,
                Ok(n) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("库存不能为负数: {}", n),
                    ));
                    0
                }
                Err(_) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("无法解析为整数: {}", value),
                    ));
                    0
                }
            },
        }
    }

    /// 日均销量: 浮点 >= 0 且有限, 缺失取 0
    fn parse_rate(
        &self,
        row: &RawItemRow,
        key: &str,
        row_index: usize,
        errors: &mut Vec<RowError>,
    ) -> f64 {
        match self.get_field(row, key) {
            None => 0.0,
            Some(value) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                Ok(v) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("日均销量超出范围: {}", v),
                    ));
                    0.0
                }
                Err(_) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("无法解析为浮点数: {}", value),
                    ));
                    0.0
                }
            },
        }
    }

    /// 货架占位: 浮点 > 0 且有限, 缺失取 1.0（一件一格）
    fn parse_footprint(
        &self,
        row: &RawItemRow,
        key: &str,
        row_index: usize,
        errors: &mut Vec<RowError>,
    ) -> f64 {
        match self.get_field(row, key) {
            None => 1.0,
            Some(value) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => v,
                Ok(v) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("货架占位必须为正数: {}", v),
                    ));
                    1.0
                }
                Err(_) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("无法解析为浮点数: {}", value),
                    ));
                    1.0
                }
            },
        }
    }

    /// 箱规: 整数 >= 1; 缺失时启用取整取标准箱规, 否则取 1
    fn parse_multiple(
        &self,
        row: &RawItemRow,
        key: &str,
        row_index: usize,
        policy: &PolicyConfig,
        errors: &mut Vec<RowError>,
    ) -> i64 {
        let fallback = if policy.use_package_multiples {
            policy.default_package_multiple
        } else {
            1
        };

        match self.get_field(row, key) {
            None => fallback,
            Some(value) => match value.parse::<i64>() {
                Ok(n) if n >= 1 => n,
                Ok(n) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("箱规必须 >= 1: {}", n),
                    ));
                    fallback
                }
                Err(_) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("无法解析为整数: {}", value),
                    ));
                    fallback
                }
            },
        }
    }

    /// 单价: 浮点 >= 0 且有限, 可选字段
    fn parse_price(
        &self,
        row: &RawItemRow,
        key: &str,
        row_index: usize,
        errors: &mut Vec<RowError>,
    ) -> Option<f64> {
        match self.get_field(row, key) {
            None => None,
            Some(value) => match value.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
                Ok(v) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("单价不能为负数: {}", v),
                    ));
                    None
                }
                Err(_) => {
                    errors.push(RowError::invalid_field(
                        row_index,
                        key,
                        format!("无法解析为浮点数: {}", value),
                    ));
                    None
                }
            },
        }
    }
}
