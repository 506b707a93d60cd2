//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use std::path::PathBuf;
use thiserror::Error;

/// etcd-monitor 启动阶段的错误类型
///
/// 探测和上报错误只在单次tick内处理，不会上升为进程级错误。
#[derive(Error, Debug)]
pub enum EtcdMonitorError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置错误类型，均为启动期致命错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 证书/私钥/CA文件无法读取
    #[error("无法读取TLS文件 {path}: {source}")]
    TlsFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TLS材料格式无效
    #[error("TLS材料无效: {0}")]
    InvalidTls(String),

    /// HTTP客户端构建失败
    #[error("HTTP客户端构建失败: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// 探测失败的诊断分类
///
/// 仅用于日志与状态，不影响指标值（所有失败都计为不健康）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeErrorKind {
    /// 连接/TLS/HTTP传输失败
    Transport,
    /// 超过探测超时时间
    Timeout,
    /// 响应体读取失败
    Body,
    /// 响应体无法解码
    Decode,
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Transport => "transport",
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::Body => "body",
            ProbeErrorKind::Decode => "decode",
        }
    }
}

impl std::fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 健康探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 连接失败
    #[error("Failed to connect to etcd: {0}")]
    Transport(#[source] reqwest::Error),

    /// 请求超时
    #[error("Failed to connect to etcd: request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// 响应体读取失败
    #[error("Failed to get etcd health: {0}")]
    Body(#[source] reqwest::Error),

    /// 响应负载无效
    #[error("Invalid health response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProbeError {
    /// 获取错误的诊断分类
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Transport(_) => ProbeErrorKind::Transport,
            ProbeError::Timeout(_) => ProbeErrorKind::Timeout,
            ProbeError::Body(_) => ProbeErrorKind::Body,
            ProbeError::Decode(_) => ProbeErrorKind::Decode,
        }
    }
}

/// 指标上报错误类型
#[derive(Error, Debug)]
pub enum SinkError {
    /// 后端调用失败
    #[error("指标上报失败: {0}")]
    Backend(String),

    /// 上报超时
    #[error("指标上报超时: {0:?}")]
    Timeout(std::time::Duration),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, EtcdMonitorError>;
