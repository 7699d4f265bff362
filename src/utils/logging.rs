/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用不会报错（测试里会多次调用）。
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `base_url`: 面试服务地址
/// - `db_file`: 快照文件
/// - `cached`: 快照中已有的题目数量
pub fn log_startup(base_url: &str, db_file: &str, cached: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 服务地址: {}", base_url);
    info!("💾 快照文件: {} (已缓存 {} 条记录)", db_file, cached);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `answered`: 本次提交的题目数量
/// - `db_file`: 快照文件
pub fn log_finished(answered: usize, db_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("🎉 面试完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 本次提交: {} 题", answered);
    info!("{}", "=".repeat(60));
    info!("\n记录已保存至: {}", db_file);
}

/// 以缩进 JSON 输出题目或回执
pub fn log_payload<T: Serialize>(label: &str, payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(pretty) => info!("{}:\n{}", label, pretty),
        Err(e) => warn!("{}: 无法格式化输出 ({})", label, e),
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
