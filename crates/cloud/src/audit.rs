//! Audit sink: durable, append-only activity trail in CloudWatch Logs.

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::types::InputLogEvent;
use tokio::sync::Mutex;

use buildtrack_core::activity::{stream_name_for, ActivityEvent};

/// Fire-and-forget destination for structured activity events.
///
/// Implementations must not panic or return errors past this boundary; the
/// boolean exists only for optional internal bookkeeping by callers.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: &ActivityEvent) -> bool;
}

/// CloudWatch Logs implementation.
///
/// Appends JSON-line events to a day-stamped stream inside a fixed log
/// group. Group and stream are created lazily on first use of a given day;
/// the last ensured stream name is cached so steady-state recording is a
/// single `PutLogEvents` call.
pub struct CloudWatchAuditSink {
    client: aws_sdk_cloudwatchlogs::Client,
    log_group: String,
    ensured_stream: Mutex<Option<String>>,
}

impl CloudWatchAuditSink {
    pub fn new(sdk_config: &aws_config::SdkConfig, log_group: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_cloudwatchlogs::Client::new(sdk_config),
            log_group: log_group.into(),
            ensured_stream: Mutex::new(None),
        }
    }

    /// Make sure the log group and today's stream exist, creating either on
    /// demand. Returns the stream name, or `None` if creation failed.
    async fn ensure_stream(&self) -> Option<String> {
        let today = chrono::Utc::now().date_naive();
        let stream = stream_name_for(today);

        let mut ensured = self.ensured_stream.lock().await;
        if ensured.as_deref() == Some(stream.as_str()) {
            return Some(stream);
        }

        if let Err(err) = self
            .client
            .create_log_group()
            .log_group_name(&self.log_group)
            .send()
            .await
        {
            let already_exists = err
                .as_service_error()
                .is_some_and(|e| e.is_resource_already_exists_exception());
            if !already_exists {
                tracing::warn!(error = %aws_sdk_cloudwatchlogs::error::DisplayErrorContext(&err),
                    log_group = %self.log_group, "Failed to create audit log group");
                return None;
            }
        }

        if let Err(err) = self
            .client
            .create_log_stream()
            .log_group_name(&self.log_group)
            .log_stream_name(&stream)
            .send()
            .await
        {
            let already_exists = err
                .as_service_error()
                .is_some_and(|e| e.is_resource_already_exists_exception());
            if !already_exists {
                tracing::warn!(error = %aws_sdk_cloudwatchlogs::error::DisplayErrorContext(&err),
                    stream = %stream, "Failed to create audit log stream");
                return None;
            }
        }

        *ensured = Some(stream.clone());
        Some(stream)
    }
}

#[async_trait]
impl AuditSink for CloudWatchAuditSink {
    async fn record(&self, event: &ActivityEvent) -> bool {
        let Some(stream) = self.ensure_stream().await else {
            return false;
        };

        let message = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize activity event");
                return false;
            }
        };

        let log_event = match InputLogEvent::builder()
            .timestamp(event.timestamp.timestamp_millis())
            .message(message)
            .build()
        {
            Ok(log_event) => log_event,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to build log event");
                return false;
            }
        };

        match self
            .client
            .put_log_events()
            .log_group_name(&self.log_group)
            .log_stream_name(&stream)
            .log_events(log_event)
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %aws_sdk_cloudwatchlogs::error::DisplayErrorContext(&err),
                    activity_type = %event.activity_type, "Failed to record activity event");
                false
            }
        }
    }
}
