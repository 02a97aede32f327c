// ==========================================
// 库存补货决策系统 - 命令行入口
// ==========================================
// 用途: 表格文件 → 补货引擎 → 汇总输出 + 订货清单 CSV
// 系统定位: 决策支持（订货量建议, 人工最终确认）
// ==========================================

use anyhow::{bail, Context, Result};
use inventory_replenish::config::PolicySettings;
use inventory_replenish::exporter::OrderExporter;
use inventory_replenish::i18n;
use inventory_replenish::importer::UniversalFileParser;
use inventory_replenish::logging;
use inventory_replenish::ReplenishmentOrchestrator;

/// 解析后的命令行参数
struct CliArgs {
    input: String,
    out: Option<String>,
    settings_file: Option<String>,
    locale: Option<String>,
    overrides: PolicySettings,
}

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", inventory_replenish::APP_NAME);
    tracing::info!("系统版本: {}", inventory_replenish::VERSION);
    tracing::info!("==================================================");

    let args = match parse_args(std::env::args().skip(1).collect())? {
        Some(args) => args,
        None => {
            println!("{}", i18n::t("app.usage"));
            return Ok(());
        }
    };

    if let Some(locale) = &args.locale {
        i18n::set_locale(locale);
    }

    // 1. 构建本次运行的策略参数（设置文件 + 命令行覆盖）
    let mut settings = match &args.settings_file {
        Some(path) => PolicySettings::load_from_file(path)
            .with_context(|| format!("加载设置文件失败: {}", path))?,
        None => PolicySettings::default(),
    };
    merge_overrides(&mut settings, &args.overrides);
    let policy = settings.into_policy();

    // 2. 解析输入文件
    let rows = UniversalFileParser
        .parse(&args.input)
        .with_context(|| format!("解析输入文件失败: {}", args.input))?;

    // 3. 执行补货计算
    let orchestrator = ReplenishmentOrchestrator::new();
    let report = orchestrator.run(&rows, &policy)?;

    // 4. 汇总输出
    let summary = &report.summary;
    println!(
        "{}",
        i18n::t_with_args(
            "report.items",
            &[
                ("received", &summary.items_received.to_string()),
                ("valid", &summary.items_validated.to_string()),
                ("rejected", &summary.items_rejected.to_string()),
            ],
        )
    );
    println!(
        "{}",
        i18n::t_with_args(
            "report.orders",
            &[
                ("items", &summary.items_ordered.to_string()),
                ("quantity", &summary.total_order_quantity.to_string()),
                ("slots", &format!("{:.1}", summary.total_shelf_slots_used)),
            ],
        )
    );
    if summary.total_order_value > 0.0 {
        println!(
            "{}",
            i18n::t_with_args(
                "report.value",
                &[("value", &format!("{:.2}", summary.total_order_value))],
            )
        );
    }
    if summary.capacity_limited_count > 0 {
        println!(
            "{}",
            i18n::t_with_args(
                "report.capacity_limited",
                &[("count", &summary.capacity_limited_count.to_string())],
            )
        );
    }
    if report.has_row_errors() {
        println!(
            "{}",
            i18n::t_with_args(
                "report.row_errors",
                &[("count", &report.row_errors.len().to_string())],
            )
        );
        for error in &report.row_errors {
            println!("  - {}", error);
        }
    }

    // 5. 导出订货清单
    if let Some(out_path) = &args.out {
        OrderExporter::new().write_csv(&report, out_path)?;
        println!(
            "{}",
            i18n::t_with_args("export.written", &[("path", out_path)])
        );
    }

    Ok(())
}

/// 解析命令行参数; 无输入文件时返回 None（打印用法）
fn parse_args(args: Vec<String>) -> Result<Option<CliArgs>> {
    let mut input = None;
    let mut out = None;
    let mut settings_file = None;
    let mut locale = None;
    let mut overrides = PolicySettings::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--out" => out = Some(required_value(&mut iter, "--out")?),
            "--settings" => settings_file = Some(required_value(&mut iter, "--settings")?),
            "--locale" => locale = Some(required_value(&mut iter, "--locale")?),
            "--days-supply" => {
                overrides.days_supply =
                    Some(parse_number(&required_value(&mut iter, "--days-supply")?)?)
            }
            "--total-shelves" => {
                overrides.total_shelves =
                    Some(parse_number(&required_value(&mut iter, "--total-shelves")?)?)
            }
            "--safety-factor" => {
                overrides.safety_factor =
                    Some(parse_number(&required_value(&mut iter, "--safety-factor")?)?)
            }
            "--package-multiple" => {
                overrides.default_package_multiple = Some(parse_number(&required_value(
                    &mut iter,
                    "--package-multiple",
                )?)?)
            }
            "--use-package-multiples" => overrides.use_package_multiples = Some(true),
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => {
                if input.is_some() {
                    bail!("只能指定一个输入文件, 多余参数: {}", other);
                }
                input = Some(other.to_string());
            }
        }
    }

    Ok(input.map(|input| CliArgs {
        input,
        out,
        settings_file,
        locale,
        overrides,
    }))
}

fn required_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    iter.next()
        .ok_or_else(|| anyhow::anyhow!("参数 {} 缺少取值", flag))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("数值参数无法解析: {}", value))
}

/// 命令行覆盖项优先于设置文件
fn merge_overrides(settings: &mut PolicySettings, overrides: &PolicySettings) {
    if overrides.days_supply.is_some() {
        settings.days_supply = overrides.days_supply;
    }
    if overrides.safety_factor.is_some() {
        settings.safety_factor = overrides.safety_factor;
    }
    if overrides.total_shelves.is_some() {
        settings.total_shelves = overrides.total_shelves;
    }
    if overrides.use_package_multiples.is_some() {
        settings.use_package_multiples = overrides.use_package_multiples;
    }
    if overrides.default_package_multiple.is_some() {
        settings.default_package_multiple = overrides.default_package_multiple;
    }
}
