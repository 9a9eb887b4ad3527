use std::fmt;

#[derive(Debug, Clone)]
pub enum IpWhereError {
    GeoIpDatabase(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
    ServerStartup(String),
}

impl IpWhereError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpWhereError::GeoIpDatabase(_) => "E001",
            IpWhereError::Config(_) => "E002",
            IpWhereError::FileOperation(_) => "E003",
            IpWhereError::Serialization(_) => "E004",
            IpWhereError::ServerStartup(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpWhereError::GeoIpDatabase(_) => "GeoIP Database Error",
            IpWhereError::Config(_) => "Configuration Error",
            IpWhereError::FileOperation(_) => "File Operation Error",
            IpWhereError::Serialization(_) => "Serialization Error",
            IpWhereError::ServerStartup(_) => "Server Startup Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpWhereError::GeoIpDatabase(msg) => msg,
            IpWhereError::Config(msg) => msg,
            IpWhereError::FileOperation(msg) => msg,
            IpWhereError::Serialization(msg) => msg,
            IpWhereError::ServerStartup(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于启动失败时输出到终端）
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

impl fmt::Display for IpWhereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpWhereError {}

// 便捷的构造函数
impl IpWhereError {
    pub fn geoip_database<T: Into<String>>(msg: T) -> Self {
        IpWhereError::GeoIpDatabase(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        IpWhereError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        IpWhereError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        IpWhereError::Serialization(msg.into())
    }

    pub fn server_startup<T: Into<String>>(msg: T) -> Self {
        IpWhereError::ServerStartup(msg.into())
    }
}

impl From<maxminddb::MaxMindDbError> for IpWhereError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        IpWhereError::GeoIpDatabase(err.to_string())
    }
}

impl From<config::ConfigError> for IpWhereError {
    fn from(err: config::ConfigError) -> Self {
        IpWhereError::Config(err.to_string())
    }
}

impl From<std::io::Error> for IpWhereError {
    fn from(err: std::io::Error) -> Self {
        IpWhereError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for IpWhereError {
    fn from(err: serde_json::Error) -> Self {
        IpWhereError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for IpWhereError {
    fn from(err: toml::ser::Error) -> Self {
        IpWhereError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpWhereError>;
