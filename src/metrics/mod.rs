//! 指标上报模块
//!
//! 将健康探测结果转换为指标数据点，并上报到CloudWatch

pub mod cloudwatch;
pub mod point;
pub mod sink;

// 重新导出主要类型
pub use cloudwatch::CloudWatchSink;
pub use point::MetricPoint;
pub use sink::MetricSink;
