//! CloudWatch指标上报器
//!
//! 通过 `PutMetricData` 上报 `UnhealthyCount` 指标

use crate::error::SinkError;
use crate::metrics::point::MetricPoint;
use crate::metrics::sink::MetricSink;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::operation::put_metric_data::builders::PutMetricDataFluentBuilder;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit, StatisticSet};
use aws_sdk_cloudwatch::Client;
use tracing::debug;

/// CloudWatch指标上报器
pub struct CloudWatchSink {
    /// CloudWatch客户端
    client: Client,
}

impl CloudWatchSink {
    /// 使用指定区域创建上报器
    ///
    /// 凭证按AWS默认链加载（环境变量、配置文件、实例角色等）。
    pub async fn new(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
        }
    }

    /// 构建CloudWatch数据点
    fn build_datum(point: &MetricPoint) -> MetricDatum {
        let stats = point.statistics();

        MetricDatum::builder()
            .metric_name(point.metric_name())
            .dimensions(
                Dimension::builder()
                    .name(point.dimension_name())
                    .value(point.dimension_value())
                    .build(),
            )
            .statistic_values(
                StatisticSet::builder()
                    .maximum(stats.maximum)
                    .minimum(stats.minimum)
                    .sample_count(stats.sample_count)
                    .sum(stats.sum)
                    .build(),
            )
            .timestamp(DateTime::from_millis(point.timestamp().timestamp_millis()))
            .unit(StandardUnit::Count)
            .build()
    }

    /// 构建单个数据点的 `PutMetricData` 请求
    fn request(&self, point: &MetricPoint) -> PutMetricDataFluentBuilder {
        self.client
            .put_metric_data()
            .namespace(point.namespace())
            .metric_data(Self::build_datum(point))
    }
}

#[async_trait]
impl MetricSink for CloudWatchSink {
    async fn emit(&self, point: &MetricPoint) -> Result<(), SinkError> {
        debug!(
            "上报指标 {}/{} {}={} count={}",
            point.namespace(),
            point.metric_name(),
            point.dimension_name(),
            point.dimension_value(),
            point.count()
        );

        self.request(point)
            .send()
            .await
            .map_err(|e| SinkError::Backend(DisplayErrorContext(e).to_string()))?;

        Ok(())
    }
}
