use serde::{Deserialize, Serialize};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Cookie SameSite 策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum SameSitePolicy {
    Strict,
    #[default]
    Lax,
    None,
}

impl std::fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "Strict"),
            Self::Lax => write!(f, "Lax"),
            Self::None => write!(f, "None"),
        }
    }
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            _ => Err(format!(
                "Invalid SameSite policy: '{}'. Valid: Strict, Lax, None",
                s
            )),
        }
    }
}

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 监听地址、端口、对外 URL
/// - database: 数据库连接配置
/// - admin: 管理员密钥与 cookie 策略
/// - images: 二维码图片缓存
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：部署变量 (PORT / DATABASE_URL / ADMIN_KEY) > DQR__* > config.toml > 默认值
    /// 示例：DQR__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let config = Self::try_load(path)?;
        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    pub fn try_load(path: &str) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let admin_key = std::env::var("ADMIN_KEY")
            .or_else(|_| std::env::var("adminkey"))
            .ok();

        Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 DQR，分隔符 __
            .add_source(
                Environment::with_prefix("DQR")
                    .separator("__")
                    .try_parsing(true),
            )
            // 3. 兼容部署平台常用的变量名
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("database.database_url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("admin.key", admin_key)?
            .build()?
            .try_deserialize::<StaticConfig>()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
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

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Absolute base URL encoded into the QR codes, without trailing slash.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

impl ServerConfig {
    /// `public_url` with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.public_url.trim_end_matches('/')
    }
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 管理后台配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Base64 SHA-256 digest of the admin password. Empty disables the admin.
    #[serde(default)]
    pub key: String,
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
    #[serde(default)]
    pub cookie_same_site: SameSitePolicy,
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: u64,
}

/// 二维码图片配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Max number of rendered PNGs kept in memory.
    #[serde(default = "default_image_cache_capacity")]
    pub cache_capacity: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "daily_qr_code.sqlite".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_cookie_secure() -> bool {
    true
}

fn default_cookie_max_age_days() -> u64 {
    30
}

fn default_image_cache_capacity() -> u64 {
    512
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            public_url: default_public_url(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            cookie_secure: default_cookie_secure(),
            cookie_same_site: SameSitePolicy::default(),
            cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_image_cache_capacity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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
    fn test_same_site_from_str() {
        assert_eq!("strict".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Strict));
        assert_eq!("LAX".parse::<SameSitePolicy>(), Ok(SameSitePolicy::Lax));
        assert_eq!("None".parse::<SameSitePolicy>(), Ok(SameSitePolicy::None));
        assert!("sideways".parse::<SameSitePolicy>().is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let server = ServerConfig {
            public_url: "https://da.ilyqrco.de/".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(server.base_url(), "https://da.ilyqrco.de");
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("[admin]"));

        let parsed: StaticConfig = toml::from_str(&sample).expect("sample should parse");
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.database.database_url, "daily_qr_code.sqlite");
        assert_eq!(parsed.admin.cookie_same_site, SameSitePolicy::Lax);
    }

    #[test]
    fn test_load_reads_toml_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("dailyqr.toml");
        std::fs::write(
            &path,
            "[server]\npublic_url = \"https://qr.example.com\"\n\n[images]\ncache_capacity = 7\n",
        )
        .expect("write config");

        let config = StaticConfig::try_load(path.to_str().expect("utf-8 path"))
            .expect("config should load");
        assert_eq!(config.server.public_url, "https://qr.example.com");
        assert_eq!(config.images.cache_capacity, 7);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_rejects_unparsable_config() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(
            &path,
            "[server]\nport = \"abc\"\n\n[database]\ndatabase_url = \"prod.sqlite\"\n",
        )
        .expect("write config");

        // 解析失败必须报错，不能静默退回默认配置
        let result = StaticConfig::load(Some(path.to_str().expect("utf-8 path")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.toml");

        let config = StaticConfig::load(Some(path.to_str().expect("utf-8 path")))
            .expect("missing file is not an error");
        assert_eq!(config.images.cache_capacity, 512);
    }
}
