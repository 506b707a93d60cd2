//! 指标上报器模块
//!
//! 定义指标上报的trait

use crate::error::SinkError;
use crate::metrics::point::MetricPoint;
use async_trait::async_trait;

/// 指标上报器trait
///
/// 每次调用同步上报一个数据点，不做缓冲、批量或重试。
#[async_trait]
pub trait MetricSink: Send + Sync {
    /// 上报一个数据点
    ///
    /// # 参数
    /// * `point` - 指标数据点
    ///
    /// # 返回
    /// * `Result<(), SinkError>` - 上报结果，失败由调用方记录并丢弃
    async fn emit(&self, point: &MetricPoint) -> Result<(), SinkError>;
}
