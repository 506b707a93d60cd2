//! 运行模式分发
//!
//! 单次模式只执行一个tick；常驻模式安装信号处理器后运行调度循环直到收到终止信号。

use crate::daemon::signal_handler::setup_signal_handlers;
use crate::error::Result;
use crate::health::{Scheduler, SchedulerStatus};
use tokio::sync::broadcast;
use tracing::info;

/// 按运行模式驱动调度器
///
/// # 参数
/// * `scheduler` - 已构造的调度器
/// * `once` - 为 `true` 时只检测一次，不安装信号处理器
///
/// # 返回
/// * `Result<SchedulerStatus>` - 停止时的调度器状态
pub async fn run_monitor(scheduler: &Scheduler, once: bool) -> Result<SchedulerStatus> {
    if once {
        let report = scheduler.run_tick().await;
        info!(
            "单次检测完成: count={}, emitted={}",
            report.count, report.emitted
        );
        return Ok(scheduler.status());
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    setup_signal_handlers(shutdown_tx).await?;

    Ok(scheduler.run(shutdown_rx).await)
}
