//! etcd-monitor 主程序入口
//!
//! 定期检测etcd健康状态并上报CloudWatch指标

use anyhow::{Context, Result};
use etcd_monitor::cli::{Args, LogFormat};
use etcd_monitor::config::{build_http_client, MonitorConfig};
use etcd_monitor::daemon::run_monitor;
use etcd_monitor::health::{HttpHealthProbe, Scheduler};
use etcd_monitor::logging::{LogConfig, LoggingSystem};
use etcd_monitor::metrics::CloudWatchSink;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析命令行参数
    let args = Args::parse_args();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        json_format: args.log_format == LogFormat::Json,
        ..Default::default()
    };

    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("etcd-monitor v{} 启动", etcd_monitor::VERSION);

    // 启动期错误直接终止进程
    if let Err(e) = run(args).await {
        error!("启动失败: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 构造组件并运行调度循环
async fn run(args: Args) -> Result<()> {
    let config = Arc::new(MonitorConfig::from_args(&args).context("配置无效")?);

    let client = build_http_client(&config.tls).context("加载TLS证书失败")?;
    let probe = Arc::new(HttpHealthProbe::new(client));
    let sink = Arc::new(CloudWatchSink::new(&config.region).await);

    println!("{}", config.banner());

    let scheduler = Scheduler::new(Arc::clone(&config), probe, sink);

    run_monitor(&scheduler, args.once)
        .await
        .context("设置信号处理器失败")?;

    info!("服务已停止");
    Ok(())
}
