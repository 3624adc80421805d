use crate::utils::error::{RegistrationError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// OTP 只允許數字
pub fn validate_digits(field_name: &str, value: &str) -> Result<()> {
    let re = Regex::new(r"^[0-9]+$").map_err(|e| RegistrationError::ConfigError {
        message: e.to_string(),
    })?;
    if !re.is_match(value) {
        return Err(RegistrationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must contain digits only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("otp.code_length", 6, 1).is_ok());
        assert!(validate_positive_number("otp.code_length", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("resume.placeholder_bio", "bio").is_ok());
        assert!(validate_non_empty_string("resume.placeholder_bio", "   ").is_err());
    }

    #[test]
    fn test_validate_digits() {
        assert!(validate_digits("otp.code", "123456").is_ok());
        assert!(validate_digits("otp.code", "12ab56").is_err());
        assert!(validate_digits("otp.code", "").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("otp.mobile_number_length", 10, 6, 15).is_ok());
        assert!(validate_range("otp.mobile_number_length", 3, 6, 15).is_err());
    }
}
