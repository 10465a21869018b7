use std::fmt;

#[derive(Debug, Clone)]
pub enum TeleopError {
    Connection(String),
    Transport(String),
    Config(String),
    Terminal(String),
    SignalOperation(String),
    FileOperation(String),
    Serialization(String),
}

impl TeleopError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TeleopError::Connection(_) => "E001",
            TeleopError::Transport(_) => "E002",
            TeleopError::Config(_) => "E003",
            TeleopError::Terminal(_) => "E004",
            TeleopError::SignalOperation(_) => "E005",
            TeleopError::FileOperation(_) => "E006",
            TeleopError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TeleopError::Connection(_) => "Connection Error",
            TeleopError::Transport(_) => "Transport Error",
            TeleopError::Config(_) => "Configuration Error",
            TeleopError::Terminal(_) => "Terminal Error",
            TeleopError::SignalOperation(_) => "Signal Operation Error",
            TeleopError::FileOperation(_) => "File Operation Error",
            TeleopError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TeleopError::Connection(msg)
            | TeleopError::Transport(msg)
            | TeleopError::Config(msg)
            | TeleopError::Terminal(msg)
            | TeleopError::SignalOperation(msg)
            | TeleopError::FileOperation(msg)
            | TeleopError::Serialization(msg) => msg,
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TeleopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TeleopError {}

// 便捷的构造函数
impl TeleopError {
    pub fn connection<T: Into<String>>(msg: T) -> Self {
        TeleopError::Connection(msg.into())
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        TeleopError::Transport(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TeleopError::Config(msg.into())
    }

    pub fn terminal<T: Into<String>>(msg: T) -> Self {
        TeleopError::Terminal(msg.into())
    }

    pub fn signal_operation<T: Into<String>>(msg: T) -> Self {
        TeleopError::SignalOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TeleopError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TeleopError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<serialport::Error> for TeleopError {
    fn from(err: serialport::Error) -> Self {
        TeleopError::Connection(err.to_string())
    }
}

impl From<std::io::Error> for TeleopError {
    fn from(err: std::io::Error) -> Self {
        TeleopError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for TeleopError {
    fn from(err: config::ConfigError) -> Self {
        TeleopError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TeleopError {
    fn from(err: toml::ser::Error) -> Self {
        TeleopError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TeleopError>;
