use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Mobile number must be exactly {expected} digits, got '{value}'")]
    InvalidMobileNumber { value: String, expected: usize },

    #[error("Mobile number is already verified")]
    AlreadyVerified,

    #[error("No OTP has been sent for this mobile number")]
    OtpNotSent,

    #[error("OTP must be exactly {expected} characters")]
    MalformedOtp { expected: usize },

    #[error("Invalid OTP. Please try again.")]
    OtpMismatch,

    #[error("Script error at action {index}: {message}")]
    ScriptError { index: usize, message: String },

    #[error("Registration was already submitted")]
    AlreadySubmitted,

    #[error("Submission failed: {message}")]
    SubmissionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Verification,
    Submission,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RegistrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::InvalidMobileNumber { .. } | Self::ScriptError { .. } => ErrorCategory::Input,
            Self::AlreadyVerified
            | Self::OtpNotSent
            | Self::MalformedOtp { .. }
            | Self::OtpMismatch => ErrorCategory::Verification,
            Self::AlreadySubmitted | Self::SubmissionError { .. } => ErrorCategory::Submission,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyVerified | Self::AlreadySubmitted => ErrorSeverity::Low,
            Self::OtpMismatch | Self::OtpNotSent | Self::MalformedOtp { .. } => {
                ErrorSeverity::Medium
            }
            Self::InvalidMobileNumber { .. }
            | Self::ScriptError { .. }
            | Self::SubmissionError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Verification => format!("Mobile verification: {}", self),
            ErrorCategory::Submission => format!("Submission: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::TomlError(_) | Self::ConfigError { .. } => {
                "Check that the configuration file is valid TOML"
            }
            Self::InvalidConfigValueError { .. } => {
                "Fix the reported configuration field and retry"
            }
            Self::InvalidMobileNumber { .. } => "Enter a complete mobile number before sending an OTP",
            Self::AlreadyVerified => "The mobile number is verified, no action needed",
            Self::OtpNotSent => "Send an OTP before trying to verify it",
            Self::MalformedOtp { .. } | Self::OtpMismatch => {
                "Re-enter the code from the OTP message"
            }
            Self::ScriptError { .. } => "Fix the reported action in the session script",
            Self::AlreadySubmitted => "The registration was already submitted",
            Self::SubmissionError { .. } => "Retry the submission from the review step",
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Check the JSON content of the input",
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
