mod settings;

pub use settings::{
    AwsConfig, DatabaseConfig, DeliveryConfig, OtelConfig, ServerConfig, Settings, StoreConfig,
};
