//! 配置管理模块
//!
//! 提供启动配置的构造、验证以及TLS客户端加载功能

pub mod tls;
pub mod types;

// 重新导出主要类型
pub use tls::build_http_client;
pub use types::{validate_config, MonitorConfig, TlsConfig};
