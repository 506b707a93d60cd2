//! 健康检测模块
//!
//! 提供etcd健康探测、结果解码和周期调度功能

pub mod checker;
pub mod result;
pub mod scheduler;

// 重新导出主要类型
pub use checker::{HealthProbe, HttpHealthProbe, PROBE_TIMEOUT};
pub use result::{unhealthy_count, HealthStatus};
pub use scheduler::{Scheduler, SchedulerState, SchedulerStatus, TickReport};
