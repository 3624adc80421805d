use crate::core::{ConfigProvider, OtpVerifier};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_OTP_CODE: &str = "123456";
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_millis(500);

/// Accepts a single configured code for every number. No message is sent.
#[derive(Debug, Clone)]
pub struct FixedCodeOtpVerifier {
    code: String,
    send_delay: Duration,
}

impl FixedCodeOtpVerifier {
    pub fn new(code: impl Into<String>, send_delay: Duration) -> Self {
        Self {
            code: code.into(),
            send_delay,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.otp_code(), config.otp_send_delay())
    }
}

impl Default for FixedCodeOtpVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_CODE, DEFAULT_SEND_DELAY)
    }
}

#[async_trait]
impl OtpVerifier for FixedCodeOtpVerifier {
    async fn send_code(&self, mobile_number: &str) -> Result<()> {
        tracing::debug!("Simulating OTP delivery to {}", mobile_number);
        if !self.send_delay.is_zero() {
            tokio::time::sleep(self.send_delay).await;
        }
        tracing::info!("📨 OTP sent to your mobile number");
        Ok(())
    }

    async fn verify(&self, _mobile_number: &str, code: &str) -> Result<bool> {
        Ok(code == self.code)
    }
}
