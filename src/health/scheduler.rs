//! 任务调度器模块
//!
//! 驱动周期性检测：每个tick依次执行健康探测和指标上报，收到关闭信号后停止。
//!
//! 状态流转：`Idle` → `Running`（立即执行首次检测，然后按间隔触发）→ `Terminating`。
//! tick严格串行执行；关闭信号与tick计时在同一个 `select!` 中等待，
//! 进行中的tick不会被取消，完成后才退出。

use crate::config::MonitorConfig;
use crate::error::{ProbeErrorKind, SinkError};
use crate::health::checker::HealthProbe;
use crate::health::result::unhealthy_count;
use crate::metrics::{MetricPoint, MetricSink};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// 调度器状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// 尚未执行首次检测
    Idle,
    /// 定时器运行中（等待或执行tick）
    Running,
    /// 已收到关闭信号，等待进行中的tick完成
    Terminating,
}

/// 调度器状态快照
#[derive(Debug, Clone)]
pub struct SchedulerStatus {
    /// 当前状态
    pub state: SchedulerState,
    /// 已完成的tick数量
    pub ticks_completed: u64,
    /// 上报失败的次数
    pub emit_failures: u64,
    /// 最近一次的指标值
    pub last_count: Option<f64>,
    /// 最近一次探测失败的分类（探测成功时为None）
    pub last_probe_error: Option<ProbeErrorKind>,
    /// 最近一次tick完成时间
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl Default for SchedulerStatus {
    fn default() -> Self {
        Self {
            state: SchedulerState::Idle,
            ticks_completed: 0,
            emit_failures: 0,
            last_count: None,
            last_probe_error: None,
            last_tick_at: None,
        }
    }
}

/// 单次tick的结果
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// 指标值，0.0或1.0
    pub count: f64,
    /// 探测失败分类
    pub probe_error: Option<ProbeErrorKind>,
    /// 指标是否成功上报
    pub emitted: bool,
}

/// 任务调度器
pub struct Scheduler {
    /// 不可变配置
    config: Arc<MonitorConfig>,
    /// 健康探测器
    probe: Arc<dyn HealthProbe>,
    /// 指标上报器
    sink: Arc<dyn MetricSink>,
    /// 状态广播
    status: watch::Sender<SchedulerStatus>,
}

impl Scheduler {
    /// 创建新的调度器
    ///
    /// # 参数
    /// * `config` - 启动时构造的配置
    /// * `probe` - 健康探测器
    /// * `sink` - 指标上报器
    pub fn new(
        config: Arc<MonitorConfig>,
        probe: Arc<dyn HealthProbe>,
        sink: Arc<dyn MetricSink>,
    ) -> Self {
        let (status, _) = watch::channel(SchedulerStatus::default());
        Self {
            config,
            probe,
            sink,
            status,
        }
    }

    /// 获取当前状态快照
    pub fn status(&self) -> SchedulerStatus {
        self.status.borrow().clone()
    }

    /// 订阅状态变化
    pub fn subscribe(&self) -> watch::Receiver<SchedulerStatus> {
        self.status.subscribe()
    }

    fn set_state(&self, state: SchedulerState) {
        self.status.send_modify(|status| {
            if status.state != state {
                debug!("调度器状态: {:?} -> {:?}", status.state, state);
                status.state = state;
            }
        });
    }

    /// 执行一次检测：探测后无条件上报一个数据点
    pub async fn run_tick(&self) -> TickReport {
        let outcome = self.probe.check(&self.config.address).await;
        let count = unhealthy_count(&outcome);

        let probe_error = match &outcome {
            Ok(_) => None,
            Err(e) => {
                error!(kind = %e.kind(), "{}", e);
                Some(e.kind())
            }
        };

        if count > 0.0 {
            info!(cluster = %self.config.cluster_name, "etcd IS NOT healthy");
        } else {
            info!(cluster = %self.config.cluster_name, "etcd is healthy");
        }

        let point =
            MetricPoint::unhealthy_count(count, &self.config.cluster_name, &self.config.namespace);
        let emitted = self.emit(&point).await;

        self.status.send_modify(|status| {
            status.ticks_completed += 1;
            if !emitted {
                status.emit_failures += 1;
            }
            status.last_count = Some(count);
            status.last_probe_error = probe_error;
            status.last_tick_at = Some(Utc::now());
        });

        TickReport {
            count,
            probe_error,
            emitted,
        }
    }

    /// 上报数据点，失败只记录日志，不重试
    async fn emit(&self, point: &MetricPoint) -> bool {
        let limit = self.config.sink_timeout;
        match timeout(limit, self.sink.emit(point)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!("{}", e);
                false
            }
            Err(_) => {
                error!("{}", SinkError::Timeout(limit));
                false
            }
        }
    }

    /// 执行tick，同时监听关闭信号
    ///
    /// 返回 `true` 表示tick期间收到了关闭信号。
    async fn tick_until_done(&self, shutdown_rx: &mut broadcast::Receiver<()>) -> bool {
        let tick = self.run_tick();
        tokio::pin!(tick);

        tokio::select! {
            _ = &mut tick => false,
            _ = shutdown_rx.recv() => {
                info!("收到关闭信号，等待当前检测完成...");
                self.set_state(SchedulerState::Terminating);
                tick.await;
                true
            }
        }
    }

    /// 运行调度循环直到收到关闭信号
    ///
    /// # 参数
    /// * `shutdown_rx` - 关闭信号接收器，发送端关闭也视为关闭信号
    ///
    /// # 返回
    /// * `SchedulerStatus` - 停止时的状态
    pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> SchedulerStatus {
        let period = self.config.interval;
        info!("启动任务调度器，检测间隔: {}s", period.as_secs());
        self.set_state(SchedulerState::Running);

        if !self.tick_until_done(&mut shutdown_rx).await {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        info!("收到关闭信号，停止调度");
                        break;
                    }
                    _ = ticker.tick() => {
                        if self.tick_until_done(&mut shutdown_rx).await {
                            break;
                        }
                    }
                }
            }
        }

        self.set_state(SchedulerState::Terminating);
        let status = self.status();
        info!("任务调度器已停止，共完成 {} 次检测", status.ticks_completed);
        status
    }
}
