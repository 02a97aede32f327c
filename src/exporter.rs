// ==========================================
// 库存补货决策系统 - 订货清单导出
// ==========================================
// 职责: EngineReport → CSV 订货清单
// 红线: 导出为展示层职责, 核心报告本身不落盘
// ==========================================

use crate::domain::report::EngineReport;
use csv::WriterBuilder;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 生成失败: {0}")]
    CsvWriteError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

// ==========================================
// OrderExporter - 订货清单导出器
// ==========================================
pub struct OrderExporter;

impl Default for OrderExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExporter {
    pub fn new() -> Self {
        Self {}
    }

    /// 写出订货清单 CSV
    ///
    /// 每行一个商品, 诊断码以 ";" 连接; 顺序与报告一致
    pub fn write_csv<P: AsRef<Path>>(
        &self,
        report: &EngineReport,
        path: P,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mut writer = WriterBuilder::new().from_path(path)?;

        writer.write_record([
            "sku",
            "required_stock",
            "target_stock",
            "capacity_cap",
            "raw_quantity",
            "order_quantity",
            "order_value",
            "diagnostics",
        ])?;

        for result in &report.results {
            let diagnostics = report
                .diagnostics_for(&result.sku)
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(";");

            writer.write_record([
                result.sku.as_str(),
                &result.required_stock.to_string(),
                &result.target_stock.to_string(),
                &format!("{:.3}", result.capacity_cap),
                &result.raw_quantity.to_string(),
                &result.order_quantity.to_string(),
                &result
                    .order_value
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_default(),
                &diagnostics,
            ])?;
        }

        writer.flush()?;

        info!(
            path = %path.display(),
            rows = report.results.len(),
            "订货清单导出完成"
        );
        Ok(())
    }
}
