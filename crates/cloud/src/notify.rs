//! Notification dispatcher: transactional email via SES, broadcast via SNS.

use async_trait::async_trait;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

/// Outbound email and broadcast alert delivery.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send a transactional email. Returns `true` on success.
    async fn email(&self, to: &str, subject: &str, body: &str) -> bool;

    /// Publish a broadcast alert to the configured topic.
    async fn broadcast(&self, message: &str, subject: Option<&str>) -> bool;
}

/// AWS implementation: SESv2 for email, SNS for broadcast.
pub struct AwsNotificationDispatcher {
    ses: aws_sdk_sesv2::Client,
    sns: aws_sdk_sns::Client,
    sender_email: String,
    topic_arn: String,
}

impl AwsNotificationDispatcher {
    pub fn new(
        sdk_config: &aws_config::SdkConfig,
        sender_email: impl Into<String>,
        topic_arn: impl Into<String>,
    ) -> Self {
        Self {
            ses: aws_sdk_sesv2::Client::new(sdk_config),
            sns: aws_sdk_sns::Client::new(sdk_config),
            sender_email: sender_email.into(),
            topic_arn: topic_arn.into(),
        }
    }
}

/// Build a plain-text email payload, or `None` if a required field is empty.
fn text_email(subject: &str, body: &str) -> Option<EmailContent> {
    let subject = Content::builder().data(subject).build().ok()?;
    let body_text = Content::builder().data(body).build().ok()?;
    let message = Message::builder()
        .subject(subject)
        .body(Body::builder().text(body_text).build())
        .build();
    Some(EmailContent::builder().simple(message).build())
}

#[async_trait]
impl NotificationDispatcher for AwsNotificationDispatcher {
    async fn email(&self, to: &str, subject: &str, body: &str) -> bool {
        let Some(content) = text_email(subject, body) else {
            tracing::warn!("Failed to build email content");
            return false;
        };

        match self
            .ses
            .send_email()
            .from_email_address(&self.sender_email)
            .destination(Destination::builder().to_addresses(to).build())
            .content(content)
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %aws_sdk_sesv2::error::DisplayErrorContext(&err),
                    to = %to, "Failed to send email notification");
                false
            }
        }
    }

    async fn broadcast(&self, message: &str, subject: Option<&str>) -> bool {
        let mut request = self
            .sns
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message);
        if let Some(subject) = subject {
            request = request.subject(subject);
        }

        match request.send().await {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %aws_sdk_sns::error::DisplayErrorContext(&err),
                    "Failed to publish broadcast alert");
                false
            }
        }
    }
}
