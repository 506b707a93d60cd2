//! etcd-monitor - etcd健康检测代理
//!
//! 定期通过双向TLS访问etcd的 `/health` 端点，并将结果以
//! `UnhealthyCount`（0.0 健康 / 1.0 不健康）指标上报到 AWS CloudWatch：
//! - 启动时立即检测一次，之后按固定间隔检测
//! - 任何探测失败都计为不健康
//! - 上报失败只记录日志，不影响监控循环
//! - 收到终止信号后等待进行中的检测完成再退出

pub mod cli;
pub mod config;
pub mod daemon;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;

// 重新导出主要类型
pub use config::MonitorConfig;
pub use error::EtcdMonitorError;
pub use health::{HealthProbe, HealthStatus, HttpHealthProbe, Scheduler};
pub use metrics::{CloudWatchSink, MetricPoint, MetricSink};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
