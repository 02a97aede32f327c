// ==========================================
// 库存补货决策系统 - 国际化
// ==========================================
// 职责: 命令行汇总输出与用法文案的本地化
// 语言: zh-CN（默认）/ en, 文案位于 locales/
// 红线: 引擎诊断码不本地化（稳定机器码）, 仅展示层文案走此处
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带 %{name} 占位参数）
///
/// # 示例
/// ```no_run
/// use inventory_replenish::i18n::t_with_args;
/// let msg = t_with_args("export.written", &[("path", "orders.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
