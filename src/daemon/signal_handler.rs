//! 信号处理模块
//!
//! 监听终止信号并通过广播通道通知调度器优雅关闭。
//! 信号处理在独立任务中运行，不会被进行中的HTTP请求阻塞。

use crate::error::Result;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
#[cfg(unix)]
use signal_hook_tokio::Signals;

/// 需要处理的终止信号
#[cfg(unix)]
pub const TERMINATION_SIGNALS: [i32; 4] = [SIGINT, SIGTERM, SIGHUP, SIGQUIT];

/// 设置信号处理器
///
/// 收到第一个终止信号后发送一次关闭通知并停止监听。
pub async fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>) -> Result<()> {
    #[cfg(unix)]
    {
        setup_unix_signals(shutdown_tx)
    }
    #[cfg(not(unix))]
    {
        setup_ctrl_c(shutdown_tx);
        Ok(())
    }
}

/// Unix/Linux系统信号处理
#[cfg(unix)]
fn setup_unix_signals(shutdown_tx: broadcast::Sender<()>) -> Result<()> {
    use futures::stream::StreamExt;

    let mut signals = Signals::new(TERMINATION_SIGNALS)?;
    let handle = signals.handle();

    tokio::spawn(async move {
        if let Some(signal) = signals.next().await {
            tracing::debug!("receiving signal: {}", signal_name(signal));
            info!("接收到 {} 信号，开始优雅关闭...", signal_name(signal));
            if let Err(e) = shutdown_tx.send(()) {
                error!("发送关闭信号失败: {e}");
            }
        }
        handle.close();
    });

    Ok(())
}

#[cfg(unix)]
fn signal_name(signal: i32) -> &'static str {
    match signal {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        SIGQUIT => "SIGQUIT",
        _ => "unknown",
    }
}

/// 非Unix系统只处理 Ctrl+C
#[cfg(not(unix))]
fn setup_ctrl_c(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("接收到 Ctrl+C，开始优雅关闭...");
                if let Err(e) = shutdown_tx.send(()) {
                    error!("发送关闭信号失败: {e}");
                }
            }
            Err(err) => error!("监听中断信号失败: {}", err),
        }
    });
}
