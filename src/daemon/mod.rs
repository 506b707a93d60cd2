//! 进程生命周期模块
//!
//! 将操作系统终止信号转换为调度器的关闭通知，并按运行模式驱动调度器

pub mod runner;
pub mod signal_handler;

pub use runner::run_monitor;
pub use signal_handler::setup_signal_handlers;
