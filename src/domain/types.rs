// ==========================================
// 库存补货决策系统 - 领域类型定义
// ==========================================
// 诊断码与行级错误: 所有规则必须输出 reason
// 序列化格式: 与导出文件保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 诊断码 (Diagnostic)
// ==========================================
// 红线: 诊断码为稳定机器码, 本地化由展示层负责
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    /// 订货量因共享货架容量被压缩
    CapacityLimited,
    /// 包装取整向下取整以满足容量约束
    RoundedDownForCapacity,
}

impl Diagnostic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnostic::CapacityLimited => "capacity-limited",
            Diagnostic::RoundedDownForCapacity => "rounded-down-for-capacity",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 行级错误类别 (Row Error Kind)
// ==========================================
// 依据: 部分失败策略 - 单行损坏不阻断整批
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowErrorKind {
    /// sku 缺失或为空
    MissingSku,
    /// 数值字段无法解析或超出范围
    InvalidField,
    /// 同批次内 sku 重复（后出现的行被丢弃）
    DuplicateSku,
    /// 批次超出行数/列数上限（整批拒绝）
    BatchTooLarge,
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowErrorKind::MissingSku => write!(f, "MISSING_SKU"),
            RowErrorKind::InvalidField => write!(f, "INVALID_FIELD"),
            RowErrorKind::DuplicateSku => write!(f, "DUPLICATE_SKU"),
            RowErrorKind::BatchTooLarge => write!(f, "BATCH_TOO_LARGE"),
        }
    }
}

// ==========================================
// 行级错误 (Row Error)
// ==========================================
// 用途: 校验阶段累积返回, 与有效记录并列输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub kind: RowErrorKind,
    /// 数据行号（1 起始, 不含表头; 批级错误为 0）
    pub row_index: usize,
    /// 出错字段名（仅 INVALID_FIELD）
    pub field: Option<String>,
    /// 关联 sku（仅 DUPLICATE_SKU 等已知 sku 的场景）
    pub sku: Option<String>,
    /// 错误说明
    pub message: String,
}

impl RowError {
    pub fn missing_sku(row_index: usize) -> Self {
        Self {
            kind: RowErrorKind::MissingSku,
            row_index,
            field: None,
            sku: None,
            message: "sku 缺失或为空".to_string(),
        }
    }

    pub fn invalid_field(row_index: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            kind: RowErrorKind::InvalidField,
            row_index,
            field: Some(field.to_string()),
            sku: None,
            message: message.into(),
        }
    }

    pub fn duplicate_sku(row_index: usize, sku: &str) -> Self {
        Self {
            kind: RowErrorKind::DuplicateSku,
            row_index,
            field: None,
            sku: Some(sku.to_string()),
            message: format!("重复 sku（同批次内）: {}", sku),
        }
    }

    pub fn batch_too_large(message: impl Into<String>) -> Self {
        Self {
            kind: RowErrorKind::BatchTooLarge,
            row_index: 0,
            field: None,
            sku: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] 行 {}: {}", self.kind, self.row_index, self.message)
    }
}
