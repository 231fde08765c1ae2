//! Delivery client factory

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::config::Credentials;

use crate::config::{AwsConfig, DeliveryConfig};

use super::backend::DeliveryClient;
use super::log_backend::LogDeliveryClient;
use super::ses_backend::SesDeliveryClient;

/// Build the SES client once from process configuration.
///
/// Static credentials are used when both key id and secret are configured;
/// otherwise the default AWS provider chain resolves them.
pub async fn build_ses_client(aws: &AwsConfig) -> aws_sdk_sesv2::Client {
    tracing::info!(
        region = %aws.region,
        from_email = %aws.from_email,
        access_key_id = %aws.masked_access_key_id(),
        "Initializing SES client"
    );

    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(aws.region.clone()));

    if let (Some(access_key_id), Some(secret_key)) = (&aws.access_key_id, &aws.secret_key) {
        loader = loader.credentials_provider(Credentials::new(
            access_key_id.clone(),
            secret_key.clone(),
            None,
            None,
            "settings",
        ));
    }

    let sdk_config = loader.load().await;
    let client = aws_sdk_sesv2::Client::new(&sdk_config);

    tracing::info!("SES client initialized");
    client
}

/// Create a delivery client based on configuration.
///
/// - `"log"`: Returns a `LogDeliveryClient`
/// - `"ses"` (default): Returns a `SesDeliveryClient`
///
/// Unknown backends fall back to SES.
pub async fn create_delivery_client(
    settings: &DeliveryConfig,
    aws: &AwsConfig,
) -> Arc<dyn DeliveryClient> {
    match settings.backend.as_str() {
        "log" => {
            tracing::warn!(
                backend = "log",
                "Creating log-only delivery client, emails will not be sent"
            );
            Arc::new(LogDeliveryClient::new())
        }
        "ses" => Arc::new(SesDeliveryClient::new(build_ses_client(aws).await)),
        other => {
            tracing::warn!(
                backend = %other,
                "Unknown delivery backend, falling back to SES"
            );
            Arc::new(SesDeliveryClient::new(build_ses_client(aws).await))
        }
    }
}
