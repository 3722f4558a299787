// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认日志过滤规则
pub const DEFAULT_FILTER: &str = "info,recipes_to_notes=debug";

/// 初始化日志
///
/// 只应由进程入口调用一次。`RUST_LOG` 优先，其次是 `LOG_LEVEL`
/// （如 `DEBUG`、`warning`），都未设置时使用 [`DEFAULT_FILTER`]。
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(build_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            std::env::var("LOG_LEVEL").ok().as_deref(),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 根据 `RUST_LOG` / `LOG_LEVEL` 构建过滤器
pub fn build_filter(rust_log: Option<&str>, log_level: Option<&str>) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|f| EnvFilter::try_new(f).ok()) {
        return filter;
    }
    match log_level {
        Some(level) => EnvFilter::new(level_directive(level)),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// 将 `LOG_LEVEL` 的取值映射为过滤指令，无法识别时为 `info`
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" | "fatal" => "error",
        "off" => "off",
        _ => "info",
    }
}
