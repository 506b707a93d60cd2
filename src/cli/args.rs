//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口。
//! 每个参数都可由环境变量提供默认值，优先级：命令行 > 环境变量 > 内置默认值。

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// etcd-monitor - 定期检测etcd健康状态并上报CloudWatch指标
#[derive(Parser, Debug, Clone)]
#[command(
    name = "etcd-monitor",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 检测间隔（秒）
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 60,
        allow_negative_numbers = true,
        env = "CHECK_INTERVAL",
        help = "Time interval of how often to run the check (in seconds)"
    )]
    pub interval: i64,

    /// etcd地址
    #[arg(
        long,
        value_name = "URL",
        default_value = "https://127.0.0.1:2379",
        env = "ETCD_ADVERTISE_CLIENT_URLS",
        help = "The address of the etcd server"
    )]
    pub address: String,

    /// CA证书文件
    #[arg(
        long,
        value_name = "FILE",
        env = "ETCDMON_CA_FILE",
        help = "A PEM encoded CA's certificate file"
    )]
    pub ca_file: Option<PathBuf>,

    /// 客户端证书文件
    #[arg(
        long,
        value_name = "FILE",
        env = "ETCDMON_CERT_FILE",
        help = "A PEM encoded certificate file"
    )]
    pub cert_file: Option<PathBuf>,

    /// 客户端私钥文件
    #[arg(
        long,
        value_name = "FILE",
        env = "ETCDMON_KEY_FILE",
        help = "A PEM encoded private key file"
    )]
    pub key_file: Option<PathBuf>,

    /// 集群名称，作为CloudWatch维度值
    #[arg(
        long,
        value_name = "NAME",
        default_value = "etcd",
        env = "ETCD_NAME",
        help = "The name of the etcd cluster, used as the CloudWatch dimension value"
    )]
    pub name: String,

    /// CloudWatch命名空间
    #[arg(
        long,
        value_name = "NAMESPACE",
        default_value = "etcd",
        env = "METRIC_NAMESPACE",
        help = "AWS CloudWatch metric namespace"
    )]
    pub namespace: String,

    /// AWS区域
    #[arg(
        long,
        value_name = "REGION",
        default_value = "us-east-1",
        env = "AWS_REGION",
        help = "AWS CloudWatch region"
    )]
    pub region: String,

    /// 指标上报超时（秒）
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 5,
        allow_negative_numbers = true,
        env = "ETCDMON_SINK_TIMEOUT",
        help = "Timeout of a single CloudWatch call (in seconds)"
    )]
    pub sink_timeout: i64,

    /// 只执行一次检测后退出
    #[arg(long, help = "Run a single check, report it and exit")]
    pub once: bool,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "ETCDMON_LOG_LEVEL",
        help = "日志级别"
    )]
    pub log_level: LogLevel,

    /// 日志格式
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "ETCDMON_LOG_FORMAT",
        help = "日志格式"
    )]
    pub log_format: LogFormat,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 日志输出格式
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LogFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}

impl Args {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 9] = [
        "CHECK_INTERVAL",
        "ETCD_ADVERTISE_CLIENT_URLS",
        "ETCDMON_CA_FILE",
        "ETCDMON_CERT_FILE",
        "ETCDMON_KEY_FILE",
        "ETCD_NAME",
        "METRIC_NAMESPACE",
        "AWS_REGION",
        "ETCDMON_SINK_TIMEOUT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let args = Args::try_parse_from(["etcd-monitor"]).unwrap();

        assert_eq!(args.interval, 60);
        assert_eq!(args.address, "https://127.0.0.1:2379");
        assert_eq!(args.name, "etcd");
        assert_eq!(args.namespace, "etcd");
        assert_eq!(args.region, "us-east-1");
        assert_eq!(args.sink_timeout, 5);
        assert!(args.ca_file.is_none());
        assert!(!args.once);
        assert_eq!(args.log_level, LogLevel::Info);
        assert_eq!(args.log_format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_env_overrides_default() {
        clear_env();
        std::env::set_var("CHECK_INTERVAL", "15");
        std::env::set_var("ETCD_NAME", "prod-etcd");
        std::env::set_var("AWS_REGION", "eu-west-1");

        let args = Args::try_parse_from(["etcd-monitor"]).unwrap();
        assert_eq!(args.interval, 15);
        assert_eq!(args.name, "prod-etcd");
        assert_eq!(args.region, "eu-west-1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_flag_overrides_env() {
        clear_env();
        std::env::set_var("CHECK_INTERVAL", "15");
        std::env::set_var("METRIC_NAMESPACE", "from-env");

        let args = Args::try_parse_from([
            "etcd-monitor",
            "--interval",
            "30",
            "--namespace",
            "from-flag",
        ])
        .unwrap();
        assert_eq!(args.interval, 30);
        assert_eq!(args.namespace, "from-flag");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_negative_interval_is_parsed_for_validation() {
        clear_env();
        let args = Args::try_parse_from(["etcd-monitor", "--interval", "-5"]).unwrap();
        assert_eq!(args.interval, -5);
    }

    #[test]
    #[serial]
    fn test_malformed_interval_rejected() {
        clear_env();
        assert!(Args::try_parse_from(["etcd-monitor", "--interval", "soon"]).is_err());
    }
}
