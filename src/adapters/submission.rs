use crate::core::{ConfigProvider, RegistrationDraft, SubmissionReceipt, SubmissionService};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_secs(2);
pub const SUCCESS_MESSAGE: &str =
    "Registration submitted successfully! You will receive a confirmation email shortly.";

/// Waits for the configured delay and then always succeeds.
#[derive(Debug)]
pub struct SimulatedSubmissionService {
    delay: Duration,
    submissions: AtomicU64,
}

impl SimulatedSubmissionService {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            submissions: AtomicU64::new(0),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.submission_delay())
    }

    pub fn submission_count(&self) -> u64 {
        self.submissions.load(Ordering::SeqCst)
    }
}

impl Default for SimulatedSubmissionService {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_DELAY)
    }
}

#[async_trait]
impl SubmissionService for SimulatedSubmissionService {
    async fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt> {
        tracing::debug!(
            "Simulating submission for {} {} ({:?})",
            draft.first_name,
            draft.last_name,
            self.delay
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let sequence = self.submissions.fetch_add(1, Ordering::SeqCst) + 1;
        let submitted_at = Utc::now();
        Ok(SubmissionReceipt {
            reference: format!("REG-{}-{:04}", submitted_at.format("%Y%m%d"), sequence),
            submitted_at,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }
}
