use crate::domain::model::{FileHandle, RegistrationDraft, SubmissionReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Mobile-number verification capability.
#[async_trait]
pub trait OtpVerifier: Send + Sync {
    async fn send_code(&self, mobile_number: &str) -> Result<()>;
    async fn verify(&self, mobile_number: &str, code: &str) -> Result<bool>;
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(&self, draft: &RegistrationDraft) -> Result<SubmissionReceipt>;
}

/// Derives a biography from an uploaded resume.
pub trait ResumeParser: Send + Sync {
    fn extract_bio(&self, resume: &FileHandle) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn otp_code(&self) -> &str;
    fn otp_send_delay(&self) -> Duration;
    fn otp_code_length(&self) -> usize;
    fn mobile_number_length(&self) -> usize;
    fn submission_delay(&self) -> Duration;
    fn guard_double_submission(&self) -> bool;
    fn placeholder_bio(&self) -> &str;
}
