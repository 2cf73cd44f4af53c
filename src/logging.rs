//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 安装全局 tracing 订阅者，过滤规则来自 `RUST_LOG`，默认 `info`。
/// 重复调用时保持第一次安装的订阅者。
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
