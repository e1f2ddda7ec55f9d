//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 安装全局日志订阅器
///
/// 过滤规则取自 `RUST_LOG`，缺省为 info；重复调用为空操作。
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
