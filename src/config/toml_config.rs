use crate::adapters::otp::{DEFAULT_OTP_CODE, DEFAULT_SEND_DELAY};
use crate::adapters::resume::PLACEHOLDER_BIO;
use crate::adapters::submission::DEFAULT_SUBMISSION_DELAY;
use crate::core::ConfigProvider;
use crate::utils::error::{RegistrationError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub resume: ResumeConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtpConfig {
    pub code: Option<String>,
    pub send_delay_ms: Option<u64>,
    pub code_length: Option<usize>,
    pub mobile_number_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionConfig {
    pub delay_ms: Option<u64>,
    pub guard_double_submission: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeConfig {
    pub placeholder_bio: Option<String>,
}

impl WizardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${OTP_CODE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistrationError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let code_length = self.otp_code_length();
        validation::validate_positive_number("otp.code_length", code_length, 1)?;
        validation::validate_range(
            "otp.mobile_number_length",
            self.mobile_number_length(),
            6,
            15,
        )?;

        let code = self.otp_code();
        validation::validate_digits("otp.code", code)?;
        if code.chars().count() != code_length {
            return Err(RegistrationError::InvalidConfigValueError {
                field: "otp.code".to_string(),
                value: code.to_string(),
                reason: format!("Code must be {} digits long", code_length),
            });
        }

        validation::validate_non_empty_string("resume.placeholder_bio", self.placeholder_bio())?;
        Ok(())
    }
}

impl ConfigProvider for WizardConfig {
    fn otp_code(&self) -> &str {
        self.otp.code.as_deref().unwrap_or(DEFAULT_OTP_CODE)
    }

    fn otp_send_delay(&self) -> Duration {
        self.otp
            .send_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SEND_DELAY)
    }

    fn otp_code_length(&self) -> usize {
        self.otp.code_length.unwrap_or(6)
    }

    fn mobile_number_length(&self) -> usize {
        self.otp.mobile_number_length.unwrap_or(10)
    }

    fn submission_delay(&self) -> Duration {
        self.submission
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUBMISSION_DELAY)
    }

    fn guard_double_submission(&self) -> bool {
        self.submission.guard_double_submission.unwrap_or(false)
    }

    fn placeholder_bio(&self) -> &str {
        self.resume.placeholder_bio.as_deref().unwrap_or(PLACEHOLDER_BIO)
    }
}

impl Validate for WizardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
