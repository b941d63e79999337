//! Outbound text messages. Delivery is an external collaborator; the shipped sender only logs.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("SMS delivery to {phone} failed: {reason}")]
    Delivery { phone: i64, reason: String },
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Tell `phone` that a notice titled `title` was published.
    async fn send_notice(&self, phone: i64, title: &str) -> Result<(), SmsError>;
}

/// Writes each message to the log instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send_notice(&self, phone: i64, title: &str) -> Result<(), SmsError> {
        info!(phone, title, "SMS notice queued");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every message for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSmsSender {
        pub sent: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl SmsSender for RecordingSmsSender {
        async fn send_notice(&self, phone: i64, title: &str) -> Result<(), SmsError> {
            if phone < 0 {
                return Err(SmsError::Delivery {
                    phone,
                    reason: "invalid number".to_string(),
                });
            }
            self.sent.lock().unwrap().push((phone, title.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn log_sender_accepts_everything() {
        assert!(LogSmsSender.send_notice(13800000000, "Drill").await.is_ok());
    }
}
