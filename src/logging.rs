//! 日志系统模块
//!
//! 基于 tracing-subscriber 的结构化日志配置，`log` 宏通过 LogTracer 桥接

use log::LevelFilter;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局日志初始化状态
#[derive(Debug, Default)]
struct GlobalLoggingState {
    /// 是否已初始化
    initialized: bool,
    /// 当前配置
    current_config: Option<LogConfig>,
}

/// 全局日志状态管理器
static GLOBAL_LOGGING_STATE: OnceLock<Mutex<GlobalLoggingState>> = OnceLock::new();

fn lock_state() -> MutexGuard<'static, GlobalLoggingState> {
    GLOBAL_LOGGING_STATE
        .get_or_init(|| Mutex::new(GlobalLoggingState::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 是否使用JSON格式
    pub json_format: bool,
    /// 模块级别日志控制
    pub module_levels: HashMap<String, LevelFilter>,
}

impl Default for LogConfig {
    fn default() -> Self {
        // AWS SDK 在 info 级别输出较多凭证加载日志
        let module_levels = [
            ("aws_config", LevelFilter::Warn),
            ("aws_smithy_runtime", LevelFilter::Warn),
            ("hyper_util", LevelFilter::Warn),
        ]
        .into_iter()
        .map(|(module, level)| (module.to_string(), level))
        .collect();

        Self {
            level: LevelFilter::Info,
            json_format: false,
            module_levels,
        }
    }
}

/// 日志系统管理器
pub struct LoggingSystem {
    /// 配置
    config: LogConfig,
}

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 进程内只真正初始化一次，重复调用返回新的句柄而不会重复注册subscriber。
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        let mut state = lock_state();
        if !state.initialized {
            Self::init_log_tracer()?;
            Self::init_tracing_subscriber(&config)?;
            state.initialized = true;
        }
        state.current_config = Some(config.clone());

        Ok(Self { config })
    }

    /// 获取配置
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// 检查日志系统是否已初始化
    pub fn is_initialized() -> bool {
        lock_state().initialized
    }

    /// 获取当前日志配置（如果已初始化）
    pub fn current_config() -> Option<LogConfig> {
        lock_state().current_config.clone()
    }

    /// 初始化 LogTracer
    fn init_log_tracer() -> anyhow::Result<()> {
        use tracing_log::LogTracer;

        static LOG_TRACER_INIT: OnceLock<Result<(), String>> = OnceLock::new();

        let result = LOG_TRACER_INIT.get_or_init(|| LogTracer::init().map_err(|e| e.to_string()));

        result
            .as_ref()
            .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;
        Ok(())
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        let mut env_filter = EnvFilter::from_default_env()
            .add_directive(Self::convert_level_to_directive(config.level));

        for (module, level) in &config.module_levels {
            let directive = format!("{}={}", module, Self::level_to_string(*level))
                .parse()
                .map_err(|e| anyhow::anyhow!("无效的日志过滤指令 {}: {}", module, e))?;
            env_filter = env_filter.add_directive(directive);
        }

        let fmt_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_ansi(true)
                .with_target(false)
                .boxed()
        };

        match registry().with(env_filter).with(fmt_layer).try_init() {
            Ok(()) => {
                tracing::debug!("日志配置: {:?}", config);
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains(
                    "attempted to set a logger after the logging system was already initialized",
                ) || error_msg.contains("a global default trace dispatcher has already been set")
                {
                    // LogTracer 已由 init_log_tracer 注册，subscriber 本身已生效
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("tracing subscriber初始化失败: {}", error_msg))
                }
            }
        }
    }

    /// 将 log::LevelFilter 转换为 tracing 的指令
    fn convert_level_to_directive(level: LevelFilter) -> tracing_subscriber::filter::Directive {
        use tracing_subscriber::filter::{Directive, LevelFilter as TracingLevel};
        match level {
            LevelFilter::Off => Directive::from(TracingLevel::OFF),
            LevelFilter::Error => Directive::from(tracing::Level::ERROR),
            LevelFilter::Warn => Directive::from(tracing::Level::WARN),
            LevelFilter::Info => Directive::from(tracing::Level::INFO),
            LevelFilter::Debug => Directive::from(tracing::Level::DEBUG),
            LevelFilter::Trace => Directive::from(tracing::Level::TRACE),
        }
    }

    /// 将 log::LevelFilter 转换为字符串
    fn level_to_string(level: LevelFilter) -> &'static str {
        match level {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
            LevelFilter::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_quiets_aws() {
        let config = LogConfig::default();
        assert_eq!(config.level, LevelFilter::Info);
        assert_eq!(
            config.module_levels.get("aws_config"),
            Some(&LevelFilter::Warn)
        );
    }

    #[test]
    fn test_logging_system_repeated_initialization() {
        let first = LoggingSystem::setup_logging(LogConfig::default());
        assert!(first.is_ok());
        assert!(LoggingSystem::is_initialized());

        let mut config = LogConfig::default();
        config.json_format = true;
        let second = LoggingSystem::setup_logging(config).unwrap();
        assert!(second.config().json_format);

        let current = LoggingSystem::current_config().unwrap();
        assert!(current.json_format);
    }

    #[test]
    fn test_level_to_string() {
        assert_eq!(LoggingSystem::level_to_string(LevelFilter::Debug), "debug");
        assert_eq!(LoggingSystem::level_to_string(LevelFilter::Off), "off");
    }
}
