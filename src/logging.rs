// ==========================================
// 库存补货决策系统 - 日志系统
// ==========================================
// 工具: tracing + tracing-subscriber
// 约定: 引擎各步骤以结构化字段输出（行数/容量/压缩数）,
//       级别经 RUST_LOG 控制
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// RUST_LOG 设置过滤器, 未设置时默认 info。
/// 查看逐步骤计算明细: `RUST_LOG=inventory_replenish=debug`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// 初始化测试环境的日志系统
///
/// 捕获输出到测试框架, 重复初始化静默忽略
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("inventory_replenish=debug"))
        .with_test_writer()
        .try_init();
}
