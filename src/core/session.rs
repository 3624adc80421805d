use crate::adapters::{FixedCodeOtpVerifier, PlaceholderResumeParser, SimulatedSubmissionService};
use crate::core::store::FormStateStore;
use crate::core::summary::ReviewSummary;
use crate::core::{
    ConfigProvider, DraftPatch, FileHandle, OtpVerifier, ResumeParser, Step, SubmissionReceipt,
    SubmissionService, ValidationResult,
};
use crate::utils::error::{RegistrationError, Result};

/// Outcome of pressing "Next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(Step),
    Blocked(ValidationResult),
    AtLastStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub mobile_number_length: usize,
    pub otp_code_length: usize,
    pub guard_double_submission: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mobile_number_length: 10,
            otp_code_length: 6,
            guard_double_submission: false,
        }
    }
}

impl SessionSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            mobile_number_length: config.mobile_number_length(),
            otp_code_length: config.otp_code_length(),
            guard_double_submission: config.guard_double_submission(),
        }
    }
}

/// One user's pass through the wizard: the store plus its external collaborators.
pub struct RegistrationSession<O: OtpVerifier, S: SubmissionService, R: ResumeParser> {
    store: FormStateStore,
    otp: O,
    submission: S,
    resume_parser: R,
    settings: SessionSettings,
    otp_sent: bool,
    last_receipt: Option<SubmissionReceipt>,
    submissions: u32,
}

pub type DefaultSession =
    RegistrationSession<FixedCodeOtpVerifier, SimulatedSubmissionService, PlaceholderResumeParser>;

impl DefaultSession {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        RegistrationSession::new(
            FixedCodeOtpVerifier::from_config(config),
            SimulatedSubmissionService::from_config(config),
            PlaceholderResumeParser::new(config.placeholder_bio()),
        )
        .with_settings(SessionSettings::from_config(config))
    }
}

impl<O: OtpVerifier, S: SubmissionService, R: ResumeParser> RegistrationSession<O, S, R> {
    pub fn new(otp: O, submission: S, resume_parser: R) -> Self {
        Self {
            store: FormStateStore::new(),
            otp,
            submission,
            resume_parser,
            settings: SessionSettings::default(),
            otp_sent: false,
            last_receipt: None,
            submissions: 0,
        }
    }

    pub fn with_settings(mut self, settings: SessionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn store(&self) -> &FormStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStateStore {
        &mut self.store
    }

    pub fn submission_service(&self) -> &S {
        &self.submission
    }

    pub fn current_step(&self) -> Step {
        self.store.current_step()
    }

    pub fn update(&mut self, patch: DraftPatch) {
        self.store.update(patch);
    }

    /// Forward navigation gated on the current step being complete.
    pub fn next(&mut self) -> NextOutcome {
        if self.store.is_last_step() {
            return NextOutcome::AtLastStep;
        }
        let validation = self.store.current_validation();
        if !validation.valid {
            tracing::debug!(
                "Next blocked on {}: missing {:?}",
                validation.step,
                validation.missing_fields
            );
            return NextOutcome::Blocked(validation);
        }
        self.store.go_next();
        NextOutcome::Advanced(self.store.current_step())
    }

    pub fn previous(&mut self) {
        self.store.go_previous();
    }

    pub fn go_to(&mut self, step: u8) {
        self.store.go_to(step);
    }

    /// Screen-side defaults of the current step. While Contact Info is
    /// shown an empty phone number follows the mobile number.
    pub fn refresh_screen_defaults(&mut self) -> bool {
        match self.store.current_step() {
            Step::ContactInfo => self.store.prefill_contact_phone(),
            _ => false,
        }
    }

    pub fn is_otp_sent(&self) -> bool {
        self.otp_sent
    }

    pub async fn send_otp(&mut self) -> Result<()> {
        let draft = self.store.draft();
        if draft.is_mobile_verified {
            return Err(RegistrationError::AlreadyVerified);
        }
        if draft.mobile_number.chars().count() != self.settings.mobile_number_length {
            return Err(RegistrationError::InvalidMobileNumber {
                value: draft.mobile_number.clone(),
                expected: self.settings.mobile_number_length,
            });
        }

        let mobile_number = draft.mobile_number.clone();
        self.otp.send_code(&mobile_number).await?;
        self.otp_sent = true;
        Ok(())
    }

    /// On a match the mobile number becomes verified; a mismatch leaves the draft untouched.
    pub async fn verify_otp(&mut self, code: &str) -> Result<()> {
        if !self.otp_sent {
            return Err(RegistrationError::OtpNotSent);
        }
        if code.chars().count() != self.settings.otp_code_length {
            return Err(RegistrationError::MalformedOtp {
                expected: self.settings.otp_code_length,
            });
        }

        let mobile_number = self.store.draft().mobile_number.clone();
        if self.otp.verify(&mobile_number, code).await? {
            self.store.mark_mobile_verified();
            tracing::info!("✅ Mobile number verified successfully");
            Ok(())
        } else {
            tracing::warn!("❌ Invalid OTP entered for {}", mobile_number);
            Err(RegistrationError::OtpMismatch)
        }
    }

    pub fn attach_resume(&mut self, file: FileHandle) {
        let bio = self.resume_parser.extract_bio(&file);
        self.store.attach_resume(file, bio);
    }

    pub fn review(&self) -> ReviewSummary {
        ReviewSummary::from_draft(self.store.draft())
    }

    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn submission_count(&self) -> u32 {
        self.submissions
    }

    /// Hands the draft to the submission service. Validity is not checked here.
    pub async fn submit(&mut self) -> Result<SubmissionReceipt> {
        if self.settings.guard_double_submission && self.last_receipt.is_some() {
            tracing::warn!("Rejecting repeated submission");
            return Err(RegistrationError::AlreadySubmitted);
        }

        tracing::info!("🚀 Submitting registration from {}", self.store.current_step());
        let receipt = self.submission.submit(self.store.draft()).await?;
        self.submissions += 1;
        self.last_receipt = Some(receipt.clone());
        tracing::info!("✅ {} (ref {})", receipt.message, receipt.reference);
        Ok(receipt)
    }
}
