//! 指标数据点
//!
//! 一个数据点对应一次检测（tick），构造后不可变

use chrono::{DateTime, Utc};

/// 指标名称
pub const METRIC_NAME: &str = "UnhealthyCount";

/// 维度名称，维度值为集群名
pub const DIMENSION_NAME: &str = "By cluster";

/// 指标单位
pub const METRIC_UNIT: &str = "Count";

/// 单样本统计集
///
/// 每次检测只上报自身的精确值，因此 min = max = sum = count。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticSet {
    pub sample_count: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub sum: f64,
}

impl StatisticSet {
    /// 由单个样本值构造统计集
    pub fn single(value: f64) -> Self {
        Self {
            sample_count: 1.0,
            minimum: value,
            maximum: value,
            sum: value,
        }
    }
}

/// 指标数据点
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    metric_name: &'static str,
    namespace: String,
    dimension_name: &'static str,
    dimension_value: String,
    unit: &'static str,
    timestamp: DateTime<Utc>,
    statistics: StatisticSet,
}

impl MetricPoint {
    /// 创建 `UnhealthyCount` 数据点，时间戳为当前时间
    ///
    /// # 参数
    /// * `count` - 0.0（健康）或 1.0（不健康）
    /// * `target` - 维度值，即集群名称
    /// * `namespace` - 指标命名空间
    pub fn unhealthy_count(count: f64, target: &str, namespace: &str) -> Self {
        Self::unhealthy_count_at(count, target, namespace, Utc::now())
    }

    /// 使用指定时间戳创建数据点
    pub fn unhealthy_count_at(
        count: f64,
        target: &str,
        namespace: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            metric_name: METRIC_NAME,
            namespace: namespace.to_string(),
            dimension_name: DIMENSION_NAME,
            dimension_value: target.to_string(),
            unit: METRIC_UNIT,
            timestamp,
            statistics: StatisticSet::single(count),
        }
    }

    pub fn metric_name(&self) -> &str {
        self.metric_name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn dimension_name(&self) -> &str {
        self.dimension_name
    }

    pub fn dimension_value(&self) -> &str {
        &self.dimension_value
    }

    pub fn unit(&self) -> &str {
        self.unit
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn statistics(&self) -> StatisticSet {
        self.statistics
    }

    /// 数据点的计数值
    pub fn count(&self) -> f64 {
        self.statistics.sum
    }

    /// 是否表示不健康
    pub fn is_unhealthy(&self) -> bool {
        self.count() > 0.0
    }

    /// 忽略时间戳比较两个数据点
    pub fn same_measurement(&self, other: &MetricPoint) -> bool {
        MetricPoint {
            timestamp: other.timestamp,
            ..self.clone()
        } == *other
    }
}
