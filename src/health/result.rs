//! 健康检测结果数据结构
//!
//! 定义etcd `/health` 响应的解码结果，以及探测结果到指标值的映射

use crate::error::ProbeError;
use serde::{Deserialize, Deserializer};

/// 健康时的指标值
pub const HEALTHY_COUNT: f64 = 0.0;

/// 不健康时的指标值
pub const UNHEALTHY_COUNT: f64 = 1.0;

/// etcd健康状态
///
/// 对应响应体 `{"health": "true"}`，布尔值以字符串形式编码。
/// 其余字段（如较新版本etcd返回的 `reason`）被忽略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// 服务是否健康
    #[serde(rename = "health", deserialize_with = "bool_from_string")]
    pub is_healthy: bool,
}

impl HealthStatus {
    /// 从原始响应体解码
    pub fn from_slice(body: &[u8]) -> Result<Self, ProbeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// 转换为指标值：健康为0.0，不健康为1.0
    pub fn unhealthy_count(&self) -> f64 {
        if self.is_healthy {
            HEALTHY_COUNT
        } else {
            UNHEALTHY_COUNT
        }
    }
}

fn bool_from_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<bool>().map_err(|_| {
        serde::de::Error::invalid_value(serde::de::Unexpected::Str(&raw), &"\"true\" or \"false\"")
    })
}

/// 将一次探测的结果映射为指标值
///
/// 任何探测失败都视为不健康，不存在"未知"状态。
pub fn unhealthy_count(outcome: &Result<HealthStatus, ProbeError>) -> f64 {
    match outcome {
        Ok(status) => status.unhealthy_count(),
        Err(_) => UNHEALTHY_COUNT,
    }
}
