use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::errors::{Result, TeleopError};

/// 默认配置文件名
pub const DEFAULT_CONFIG_PATH: &str = "teleop.toml";

/// 环境变量前缀，分隔符为 `__`
pub const ENV_PREFIX: &str = "TELEOP";

/// 日志输出格式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::iter()
            .find(|v| v.as_ref().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid log format: '{}'. Valid: text, json", s))
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - serial: 串口设备、波特率、读超时
/// - timing: 初始化等待、发送间隔、空闲间隔
/// - keyboard: 终端按键保持窗口
/// - logging: 日志配置
///
/// 按键映射不在配置中，固定于 `CommandTable`。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML > 默认值
    /// 示例：TELEOP__SERIAL__PORT=/dev/ttyACM0
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// 同 [`StaticConfig::load`]，`env` 为 `Some` 时用它代替进程环境变量
    pub fn load_with_env(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        use config::{Config, Environment, File};

        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        if explicit && !path.exists() {
            return Err(TeleopError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（默认路径可选）
            .add_source(File::from(path).required(explicit))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config = settings.try_deserialize::<StaticConfig>()?;
        if path.exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path.display());
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 串口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// 时序配置（毫秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_init_delay_ms")]
    pub init_delay_ms: u64,
    #[serde(default = "default_poll_delay_ms")]
    pub poll_delay_ms: u64,
    #[serde(default = "default_idle_delay_ms")]
    pub idle_delay_ms: u64,
}

impl TimingConfig {
    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }

    pub fn poll_delay(&self) -> Duration {
        Duration::from_millis(self.poll_delay_ms)
    }

    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}

/// 终端按键配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    /// 终端不上报按键释放时，自动重复开始后每个事件的有效时长
    #[serde(default = "default_hold_window_ms")]
    pub hold_window_ms: u64,
    /// 首次按下到第一次自动重复之间视为仍按住的时长，需覆盖系统的重复延迟
    #[serde(default = "default_repeat_delay_ms")]
    pub repeat_delay_ms: u64,
    /// 终端上报释放时，超过该时长没有任何事件也视为已释放（释放事件丢失）
    #[serde(default = "default_release_timeout_ms")]
    pub release_timeout_ms: u64,
}

impl KeyboardConfig {
    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_window_ms)
    }

    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    pub fn release_timeout(&self) -> Duration {
        Duration::from_millis(self.release_timeout_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_serial_port() -> String {
    if cfg!(windows) {
        "COM6".to_string()
    } else {
        "/dev/ttyUSB0".to_string()
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_read_timeout_ms() -> u64 {
    100
}

fn default_init_delay_ms() -> u64 {
    2000
}

fn default_poll_delay_ms() -> u64 {
    100
}

fn default_idle_delay_ms() -> u64 {
    10
}

fn default_hold_window_ms() -> u64 {
    // 略大于常见的自动重复间隔（约 33 ms）
    120
}

fn default_repeat_delay_ms() -> u64 {
    // 常见系统重复延迟为 250~500 ms
    600
}

fn default_release_timeout_ms() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

// 运行时终端处于 raw 模式，日志默认写文件
fn default_log_file() -> Option<String> {
    Some("logs/teleop.log".to_string())
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            init_delay_ms: default_init_delay_ms(),
            poll_delay_ms: default_poll_delay_ms(),
            idle_delay_ms: default_idle_delay_ms(),
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            hold_window_ms: default_hold_window_ms(),
            repeat_delay_ms: default_repeat_delay_ms(),
            release_timeout_ms: default_release_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_robot() {
        let config = StaticConfig::default();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.read_timeout(), Duration::from_millis(100));
        assert_eq!(config.timing.init_delay(), Duration::from_secs(2));
        assert_eq!(config.timing.poll_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config().unwrap();
        assert!(sample.contains("[serial]"));
        assert!(sample.contains("baud_rate = 9600"));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.timing.poll_delay_ms, 100);
        assert_eq!(parsed.logging.format, LogFormat::Text);
    }
}
