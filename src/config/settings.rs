use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    pub aws: AwsConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// AWS account settings used to build the SES client.
///
/// When `access_key_id`/`secret_key` are absent the default AWS credential
/// provider chain (environment, profile, container, instance) is used.
#[derive(Clone, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_key: Option<String>,
    /// Sender identity verified with SES
    pub from_email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    /// "ses" or "log"
    #[serde(default = "default_delivery_backend")]
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u32,
    /// Apply embedded migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// "postgres" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024 // 2 MiB
}

fn default_region() -> String {
    "ap-southeast-1".to_string()
}

fn default_delivery_backend() -> String {
    "ses".to_string()
}

fn default_database_url() -> String {
    "postgres://localhost:5432/notification".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_idle_timeout() -> u32 {
    300 // 5 minutes
}

fn default_true() -> bool {
    true
}

fn default_store_backend() -> String {
    "postgres".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "appointment-notification-service".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("aws.region", "ap-southeast-1")?
            .set_default("delivery.backend", "ses")?
            .set_default("store.backend", "postgres")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // NOTIFY_SERVER__PORT, NOTIFY_AWS__FROM_EMAIL, NOTIFY_DATABASE__URL, etc.
            .add_source(
                Environment::with_prefix("NOTIFY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl AwsConfig {
    /// Access key id reduced to its first four characters, for logging
    pub fn masked_access_key_id(&self) -> String {
        match &self.access_key_id {
            Some(key) => format!("{}***", key.chars().take(4).collect::<String>()),
            None => "<default provider chain>".to_string(),
        }
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.masked_access_key_id())
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("from_email", &self.from_email)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            backend: default_delivery_backend(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            pool_size: default_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            run_migrations: default_true(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aws(access_key_id: Option<&str>) -> AwsConfig {
        AwsConfig {
            region: default_region(),
            access_key_id: access_key_id.map(str::to_string),
            secret_key: Some("super-secret".to_string()),
            from_email: "noreply@hospital.com".to_string(),
        }
    }

    #[test]
    fn test_default_values() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        assert_eq!(DeliveryConfig::default().backend, "ses");
        assert_eq!(StoreConfig::default().backend, "postgres");
        assert!(DatabaseConfig::default().run_migrations);
        assert!(!OtelConfig::default().enabled);
    }

    #[test]
    fn test_access_key_masking() {
        assert_eq!(aws(Some("AKIAEXAMPLE")).masked_access_key_id(), "AKIA***");
        assert_eq!(aws(Some("AK")).masked_access_key_id(), "AK***");
        assert_eq!(
            aws(None).masked_access_key_id(),
            "<default provider chain>"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", aws(Some("AKIAEXAMPLE")));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("AKIAEXAMPLE"));
        assert!(debug.contains("noreply@hospital.com"));
    }

    #[test]
    fn test_deserialize_from_sources() {
        let settings: Settings = Config::builder()
            .set_override("aws.from_email", "noreply@hospital.com")
            .unwrap()
            .set_override("store.backend", "memory")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.aws.from_email, "noreply@hospital.com");
        assert_eq!(settings.aws.region, "ap-southeast-1");
        assert_eq!(settings.store.backend, "memory");
        assert_eq!(settings.delivery.backend, "ses");
        assert_eq!(settings.server_addr(), "0.0.0.0:8080");
    }
}
