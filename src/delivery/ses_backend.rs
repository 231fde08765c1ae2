//! AWS SES v2 delivery client.

use async_trait::async_trait;
use aws_sdk_sesv2::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::send_email::SendEmailError,
    types::{Body, Content, Destination, EmailContent, Message},
    Client,
};

use super::backend::{DeliveryClient, DeliveryError, DeliveryReceipt, OutgoingEmail};

/// Status reported when SES accepts a message
const SES_ACCEPTED_STATUS: u16 = 200;

/// Delivery client backed by AWS SES v2.
///
/// Wraps an `aws_sdk_sesv2::Client` built once at startup. The sender
/// address on each [`OutgoingEmail`] must be verified with SES.
#[derive(Debug, Clone)]
pub struct SesDeliveryClient {
    client: Client,
}

impl SesDeliveryClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeliveryClient for SesDeliveryClient {
    fn backend_type(&self) -> &'static str {
        "ses"
    }

    #[tracing::instrument(
        name = "delivery.ses",
        skip_all,
        fields(to = %email.to, subject = %email.subject)
    )]
    async fn deliver(&self, email: &OutgoingEmail) -> Result<DeliveryReceipt, DeliveryError> {
        email.validate()?;

        let content = build_content(email)?;
        let destination = Destination::builder().to_addresses(&email.to).build();

        tracing::info!(from = %email.from, to = %email.to, "Calling AWS SES");

        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(classify_error)?;

        let receipt = receipt_for(output.message_id());

        tracing::info!(
            message_id = %receipt.message_id,
            status = receipt.status_code,
            "AWS SES accepted message"
        );

        Ok(receipt)
    }
}

/// SES returns no transport status on success, so accepted sends report 200.
fn receipt_for(message_id: Option<&str>) -> DeliveryReceipt {
    let message_id = match message_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            tracing::warn!("AWS SES accepted message without a message id");
            String::new()
        }
    };

    DeliveryReceipt {
        message_id,
        status_code: SES_ACCEPTED_STATUS,
    }
}

fn build_content(email: &OutgoingEmail) -> Result<EmailContent, DeliveryError> {
    let subject = Content::builder()
        .data(&email.subject)
        .charset("UTF-8")
        .build()
        .map_err(|e| DeliveryError::MalformedMessage(format!("invalid subject: {e}")))?;

    let text = Content::builder()
        .data(&email.body)
        .charset("UTF-8")
        .build()
        .map_err(|e| DeliveryError::MalformedMessage(format!("invalid body: {e}")))?;

    Ok(EmailContent::builder()
        .simple(
            Message::builder()
                .subject(subject)
                .body(Body::builder().text(text).build())
                .build(),
        )
        .build())
}

fn classify_error(err: SdkError<SendEmailError>) -> DeliveryError {
    match err {
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let service_error = context.into_err();
            let message = service_error
                .message()
                .unwrap_or("no error message")
                .to_string();

            if service_error.is_too_many_requests_exception()
                || service_error.is_limit_exceeded_exception()
                || service_error.code() == Some("Throttling")
            {
                DeliveryError::Throttled(message)
            } else if service_error.is_message_rejected()
                || service_error.is_mail_from_domain_not_verified_exception()
            {
                DeliveryError::InvalidIdentity(message)
            } else {
                DeliveryError::Rejected { status, message }
            }
        }
        other => DeliveryError::Transport(DisplayErrorContext(&other).to_string()),
    }
}
