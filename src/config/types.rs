//! 配置数据结构定义
//!
//! 启动时由命令行参数构造一次，之后不可变，以 `Arc` 共享给调度器、探测器和上报器

use crate::cli::Args;
use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// 秒数配置项允许的最大值
pub const MAX_SECONDS: u64 = u32::MAX as u64;

/// TLS材料文件路径
///
/// 三者均为必填项，由 [`validate_config`] 在启动时检查。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TlsConfig {
    /// CA证书文件
    pub ca_file: Option<PathBuf>,
    /// 客户端证书文件
    pub cert_file: Option<PathBuf>,
    /// 客户端私钥文件
    pub key_file: Option<PathBuf>,
}

impl TlsConfig {
    /// 返回第一个缺失的TLS材料对应的命令行参数与环境变量
    pub fn missing(&self) -> Option<&'static str> {
        if self.cert_file.is_none() {
            Some("--cert-file / ETCDMON_CERT_FILE")
        } else if self.key_file.is_none() {
            Some("--key-file / ETCDMON_KEY_FILE")
        } else if self.ca_file.is_none() {
            Some("--ca-file / ETCDMON_CA_FILE")
        } else {
            None
        }
    }
}

/// 监控配置
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// 检测间隔
    pub interval: Duration,
    /// etcd地址
    pub address: String,
    /// TLS材料
    pub tls: TlsConfig,
    /// 集群名称（指标维度值）
    pub cluster_name: String,
    /// CloudWatch命名空间
    pub namespace: String,
    /// AWS区域
    pub region: String,
    /// 单次指标上报超时
    pub sink_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(default_interval()),
            address: "https://127.0.0.1:2379".to_string(),
            tls: TlsConfig::default(),
            cluster_name: "etcd".to_string(),
            namespace: "etcd".to_string(),
            region: "us-east-1".to_string(),
            sink_timeout: Duration::from_secs(default_sink_timeout()),
        }
    }
}

// 默认值函数
fn default_interval() -> u64 {
    60
}
fn default_sink_timeout() -> u64 {
    5
}

/// 将秒数校验为不超过 [`MAX_SECONDS`] 的正数
fn positive_seconds(name: &str, value: i64) -> Result<Duration, ConfigError> {
    match u64::try_from(value) {
        Ok(secs) if secs > 0 && secs <= MAX_SECONDS => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::ValidationError(format!(
            "{name}必须为 1 到 {MAX_SECONDS} 之间的整数秒，实际为 {value}"
        ))),
    }
}

impl MonitorConfig {
    /// 由命令行参数构造并验证配置
    ///
    /// # 参数
    /// * `args` - 已解析的命令行参数（已合并环境变量）
    ///
    /// # 返回
    /// * `Result<Self, ConfigError>` - 验证后的配置
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let config = Self {
            interval: positive_seconds("检测间隔", args.interval)?,
            address: args.address.trim().to_string(),
            tls: TlsConfig {
                ca_file: args.ca_file.clone(),
                cert_file: args.cert_file.clone(),
                key_file: args.key_file.clone(),
            },
            cluster_name: args.name.clone(),
            namespace: args.namespace.clone(),
            region: args.region.clone(),
            sink_timeout: positive_seconds("指标上报超时", args.sink_timeout)?,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// 启动时打印的配置摘要
    pub fn banner(&self) -> String {
        format!(
            "==> etcd Monitor Configuration:\n\n\
             \t      Check interval: {} (seconds)\n\
             \t        etcd Address: {}\n\
             \t           etcd Name: {}\n\
             \tCloudWatch Namespace: {}\n\
             \t          AWS Region: {}\n",
            self.interval.as_secs(),
            self.address,
            self.cluster_name,
            self.namespace,
            self.region
        )
    }
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), ConfigError>` - 验证结果
pub fn validate_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    if config.interval.is_zero() {
        return Err(ConfigError::ValidationError("检测间隔不能为0".to_string()));
    }

    if config.sink_timeout.is_zero() {
        return Err(ConfigError::ValidationError("指标上报超时不能为0".to_string()));
    }

    // 过大的间隔会在计算下一次tick时间时溢出
    let limit = Duration::from_secs(MAX_SECONDS);
    if config.interval > limit || config.sink_timeout > limit {
        return Err(ConfigError::ValidationError(format!(
            "检测间隔与指标上报超时不能超过 {MAX_SECONDS} 秒"
        )));
    }

    // 验证URL格式
    let url = reqwest::Url::parse(&config.address).map_err(|e| {
        ConfigError::ValidationError(format!("etcd地址无效 {}: {}", config.address, e))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError(format!(
            "etcd地址必须以 http:// 或 https:// 开头: {}",
            config.address
        )));
    }

    // 双向TLS所需的证书、私钥和CA缺一不可
    if let Some(flag) = config.tls.missing() {
        return Err(ConfigError::ValidationError(format!("缺少TLS文件: {flag}")));
    }

    if config.cluster_name.trim().is_empty() {
        return Err(ConfigError::ValidationError("集群名称不能为空".to_string()));
    }

    if config.namespace.trim().is_empty() {
        return Err(ConfigError::ValidationError("指标命名空间不能为空".to_string()));
    }

    if config.region.trim().is_empty() {
        return Err(ConfigError::ValidationError("AWS区域不能为空".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LogFormat, LogLevel};

    fn create_test_args() -> Args {
        Args {
            interval: 60,
            address: "https://127.0.0.1:2379".to_string(),
            ca_file: Some(PathBuf::from("/etc/etcd/ca.crt")),
            cert_file: Some(PathBuf::from("/etc/etcd/client.crt")),
            key_file: Some(PathBuf::from("/etc/etcd/client.key")),
            name: "etcd".to_string(),
            namespace: "etcd".to_string(),
            region: "us-east-1".to_string(),
            sink_timeout: 5,
            once: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn test_from_args_defaults() {
        let config = MonitorConfig::from_args(&create_test_args()).unwrap();
        assert_eq!(
            config,
            MonitorConfig {
                tls: TlsConfig {
                    ca_file: Some(PathBuf::from("/etc/etcd/ca.crt")),
                    cert_file: Some(PathBuf::from("/etc/etcd/client.crt")),
                    key_file: Some(PathBuf::from("/etc/etcd/client.key")),
                },
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut args = create_test_args();
        args.interval = 0;
        let err = MonitorConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_negative_interval_rejected() {
        let mut args = create_test_args();
        args.interval = -30;
        assert!(MonitorConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_oversized_interval_rejected() {
        let mut args = create_test_args();
        args.interval = i64::MAX;
        let err = MonitorConfig::from_args(&args).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        args.interval = MAX_SECONDS as i64;
        assert!(MonitorConfig::from_args(&args).is_ok());
    }

    #[test]
    fn test_oversized_duration_rejected_by_validate() {
        let config = MonitorConfig {
            interval: Duration::MAX,
            ..MonitorConfig::from_args(&create_test_args()).unwrap()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_oversized_sink_timeout_rejected() {
        let mut args = create_test_args();
        args.sink_timeout = i64::MAX;
        assert!(MonitorConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_zero_sink_timeout_rejected() {
        let mut args = create_test_args();
        args.sink_timeout = 0;
        assert!(MonitorConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_invalid_address_rejected() {
        let mut args = create_test_args();
        args.address = "127.0.0.1:2379".to_string();
        assert!(MonitorConfig::from_args(&args).is_err());

        args.address = "ftp://127.0.0.1:2379".to_string();
        assert!(MonitorConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_missing_tls_material_rejected() {
        let mut args = create_test_args();
        args.ca_file = None;
        args.cert_file = None;
        args.key_file = None;
        let err = MonitorConfig::from_args(&args).unwrap_err().to_string();
        assert!(err.contains("--cert-file / ETCDMON_CERT_FILE"));

        args.cert_file = Some(PathBuf::from("/etc/etcd/client.crt"));
        let err = MonitorConfig::from_args(&args).unwrap_err().to_string();
        assert!(err.contains("--key-file / ETCDMON_KEY_FILE"));

        args.key_file = Some(PathBuf::from("/etc/etcd/client.key"));
        let err = MonitorConfig::from_args(&args).unwrap_err().to_string();
        assert!(err.contains("--ca-file / ETCDMON_CA_FILE"));

        args.ca_file = Some(PathBuf::from("/etc/etcd/ca.crt"));
        assert!(MonitorConfig::from_args(&args).is_ok());
    }

    #[test]
    fn test_banner() {
        let mut config = MonitorConfig::default();
        config.cluster_name = "prod-etcd".to_string();
        let banner = config.banner();

        assert!(banner.starts_with("==> etcd Monitor Configuration:"));
        assert!(banner.contains("Check interval: 60 (seconds)"));
        assert!(banner.contains("etcd Name: prod-etcd"));
        assert!(banner.contains("AWS Region: us-east-1"));
    }
}
