//! HTTP健康探测器实现
//!
//! 对etcd的 `/health` 端点执行单次GET请求并解码健康状态

use crate::error::ProbeError;
use crate::health::result::HealthStatus;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::debug;

/// 单次探测的总超时时间
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 健康探测器trait，定义探测接口
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// 执行一次健康探测
    ///
    /// # 参数
    /// * `endpoint` - 目标基础地址，如 `https://127.0.0.1:2379`
    ///
    /// # 返回
    /// * `Result<HealthStatus, ProbeError>` - 探测结果，不做重试
    async fn check(&self, endpoint: &str) -> Result<HealthStatus, ProbeError>;
}

/// 拼接健康检查URL
///
/// 地址末尾的 `/` 会被去掉，避免出现 `//health`。
pub fn health_url(endpoint: &str) -> String {
    format!("{}/health", endpoint.trim_end_matches('/'))
}

/// HTTP健康探测器实现
pub struct HttpHealthProbe {
    /// 预先配置好TLS的HTTP客户端
    client: Client,
    /// 总超时时间
    timeout: Duration,
}

impl HttpHealthProbe {
    /// 创建新的HTTP健康探测器
    ///
    /// 客户端的证书/私钥/CA由 [`crate::config::tls::build_http_client`] 负责加载。
    pub fn new(client: Client) -> Self {
        Self::with_timeout(client, PROBE_TIMEOUT)
    }

    /// 使用自定义超时创建探测器
    pub fn with_timeout(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// 获取超时时间
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 发送请求并读取完整响应体
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_request_error(e, self.timeout))?;

        debug!("收到健康检查响应: {} {}", url, response.status());

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(self.timeout)
            } else {
                ProbeError::Body(e)
            }
        })?;

        Ok(body.to_vec())
    }
}

/// 区分传输错误与超时
fn classify_request_error(error: reqwest::Error, limit: Duration) -> ProbeError {
    if error.is_timeout() {
        ProbeError::Timeout(limit)
    } else {
        ProbeError::Transport(error)
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check(&self, endpoint: &str) -> Result<HealthStatus, ProbeError> {
        let url = health_url(endpoint);
        let start_time = Instant::now();

        // 整个请求（连接、发送、读取响应体）共享同一个超时预算
        let body = match timeout(self.timeout, self.fetch(&url)).await {
            Ok(result) => result?,
            Err(_) => return Err(ProbeError::Timeout(self.timeout)),
        };

        debug!(
            "健康检查耗时 {}ms, 响应体 {} 字节",
            start_time.elapsed().as_millis(),
            body.len()
        );

        HealthStatus::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url() {
        assert_eq!(
            health_url("https://127.0.0.1:2379"),
            "https://127.0.0.1:2379/health"
        );
        assert_eq!(
            health_url("https://127.0.0.1:2379/"),
            "https://127.0.0.1:2379/health"
        );
    }

    #[test]
    fn test_probe_creation() {
        let probe = HttpHealthProbe::new(Client::new());
        assert_eq!(probe.timeout(), PROBE_TIMEOUT);

        let probe = HttpHealthProbe::with_timeout(Client::new(), Duration::from_millis(200));
        assert_eq!(probe.timeout(), Duration::from_millis(200));
    }
}
