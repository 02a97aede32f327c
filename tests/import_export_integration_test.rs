// ==========================================
// 导入/导出端到端测试
// ==========================================
// 职责: 表格文件 → 解析 → 补货引擎 → 订货清单 CSV 全流程
// ==========================================

use inventory_replenish::domain::policy::PolicyConfig;
use inventory_replenish::{OrderExporter, ReplenishmentOrchestrator, UniversalFileParser};

use test_helpers::write_csv_fixture;

// ==========================================
// CSV 文件 → 引擎 → 报告
// ==========================================
#[test]
fn test_csv_to_report_flow() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv_fixture(
        dir.path(),
        "остатки.csv",
        &[
            "артикул,название,остаток,ads,цена,category",
            "SKU001,Молоко 1л,5,2.0,89.90,Dairy",
            "SKU002,Хлеб,0,1.5,45.00,Bakery",
            ",,,,,",
            "SKU003,Сыр,300,0.5,520.00,Dairy",
        ],
    );

    let rows = UniversalFileParser.parse(&input).unwrap();
    assert_eq!(rows.len(), 3, "空行应在解析时跳过");

    let policy = PolicyConfig {
        days_supply: 10,
        safety_factor: 1.0,
        total_shelves: 1000.0,
        ..PolicyConfig::default()
    };
    let report = ReplenishmentOrchestrator::new().run(&rows, &policy).unwrap();

    assert_eq!(report.results.len(), 3);
    assert!(report.row_errors.is_empty());

    // SKU001: 需求 20, 库存 5 → 订 15; 金额 15 × 89.90
    assert_eq!(report.results[0].order_quantity, 15);
    assert_eq!(report.results[0].order_value, Some(15.0 * 89.90));

    // SKU002: 需求 15, 库存 0 → 订 15
    assert_eq!(report.results[1].order_quantity, 15);

    // SKU003: 严重超配 → 不订货
    assert_eq!(report.results[2].order_quantity, 0);

    // 类别汇总按字典序稳定输出
    let categories: Vec<&str> = report
        .summary
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(categories, vec!["Bakery", "Dairy"]);
}

// ==========================================
// 报告 → 订货清单 CSV
// ==========================================
#[test]
fn test_report_to_csv_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_csv_fixture(
        dir.path(),
        "items.csv",
        &[
            "sku,current_stock,daily_sales_rate,price",
            "SKU001,0,2.0,10.00",
            "SKU002,100,0.1,5.00",
        ],
    );

    let rows = UniversalFileParser.parse(&input).unwrap();
    let policy = PolicyConfig {
        safety_factor: 1.0,
        ..PolicyConfig::default()
    };
    let report = ReplenishmentOrchestrator::new().run(&rows, &policy).unwrap();

    let out = dir.path().join("orders.csv");
    OrderExporter::new().write_csv(&report, &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(
        lines[0],
        "sku,required_stock,target_stock,capacity_cap,raw_quantity,order_quantity,order_value,diagnostics"
    );
    // 每个有效行各占一条记录, 顺序与输入一致
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("SKU001,"));
    assert!(lines[2].starts_with("SKU002,"));
}

// ==========================================
// 错误传播: 文件不存在
// ==========================================
#[test]
fn test_missing_input_file() {
    let result = UniversalFileParser.parse("каталог/нет_такого.csv");
    assert!(result.is_err());
}
