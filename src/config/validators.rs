//! 配置值验证模块
//!
//! 在打开串口之前检查静态配置是否合法。

use super::StaticConfig;
use crate::errors::{Result, TeleopError};

/// tracing 支持的日志级别
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 验证完整配置，返回第一个不合法的字段
pub fn validate_config(config: &StaticConfig) -> Result<()> {
    validate_port(&config.serial.port).map_err(TeleopError::config)?;
    validate_baud_rate(config.serial.baud_rate).map_err(TeleopError::config)?;
    validate_poll_delay(config.timing.poll_delay_ms).map_err(TeleopError::config)?;
    validate_log_level(&config.logging.level).map_err(TeleopError::config)?;
    Ok(())
}

pub fn validate_port(port: &str) -> std::result::Result<(), String> {
    if port.trim().is_empty() {
        return Err("serial.port must not be empty".to_string());
    }
    Ok(())
}

pub fn validate_baud_rate(baud_rate: u32) -> std::result::Result<(), String> {
    if baud_rate == 0 {
        return Err("serial.baud_rate must be greater than 0".to_string());
    }
    Ok(())
}

/// 发送间隔为 0 时无法限制发送速率
pub fn validate_poll_delay(poll_delay_ms: u64) -> std::result::Result<(), String> {
    if poll_delay_ms == 0 {
        return Err("timing.poll_delay_ms must be greater than 0".to_string());
    }
    Ok(())
}

/// 只验证简单级别名；带 target 的过滤指令（如 `teleop=debug`）直接放行
pub fn validate_log_level(level: &str) -> std::result::Result<(), String> {
    if level.contains('=') || level.contains(',') {
        return Ok(());
    }
    if LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        Ok(())
    } else {
        Err(format!(
            "Invalid log level '{}'. Valid options: {:?}",
            level, LOG_LEVELS
        ))
    }
}
