//! Scripted wizard sessions.
//!
//! A script is a TOML list of user actions. Replaying it drives a
//! [`RegistrationSession`] exactly as the screens would: "Next" stays
//! gated, sidebar jumps do not, and OTP or submission rejections are
//! recorded as events instead of aborting the replay.

use crate::core::session::{NextOutcome, RegistrationSession};
use crate::core::store::{ClinicDayField, ClinicField, OnlineDayField};
use crate::core::summary::ReviewSummary;
use crate::core::{
    ClinicId, DayOfWeek, DraftPatch, FieldId, FileHandle, OtpVerifier, PaymentMethod,
    ResumeParser, Step, SubmissionReceipt, SubmissionService, ValidationResult,
};
use crate::utils::error::{RegistrationError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub actions: Vec<ScriptAction>,
}

/// Clinics are referenced by their position in the clinic list, since ids
/// are generated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Set { patch: DraftPatch },
    Next,
    Previous,
    Goto { step: u8 },
    ToggleLanguage { language: String },
    AddAward { award: String },
    RemoveAward { index: usize },
    SendOtp,
    VerifyOtp { code: String },
    AttachProfilePicture { file: FileHandle },
    AttachResume { file: FileHandle },
    RemoveResume,
    AddClinic { name: String, address: String },
    RemoveClinic { clinic: usize },
    UpdateClinic { clinic: usize, field: ClinicField },
    AttachLicense { file: FileHandle },
    RemoveLicense,
    SelectSpeciality { speciality: String },
    ToggleService { service: String },
    AddCustomService { service: String },
    RemoveCustomService { index: usize },
    ClinicDay {
        clinic: usize,
        day: DayOfWeek,
        field: ClinicDayField,
    },
    OnlineDay { day: DayOfWeek, field: OnlineDayField },
    TogglePaymentMethod { method: PaymentMethod },
    Submit,
}

impl ScriptAction {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptAction::Set { .. } => "set",
            ScriptAction::Next => "next",
            ScriptAction::Previous => "previous",
            ScriptAction::Goto { .. } => "goto",
            ScriptAction::ToggleLanguage { .. } => "toggle_language",
            ScriptAction::AddAward { .. } => "add_award",
            ScriptAction::RemoveAward { .. } => "remove_award",
            ScriptAction::SendOtp => "send_otp",
            ScriptAction::VerifyOtp { .. } => "verify_otp",
            ScriptAction::AttachProfilePicture { .. } => "attach_profile_picture",
            ScriptAction::AttachResume { .. } => "attach_resume",
            ScriptAction::RemoveResume => "remove_resume",
            ScriptAction::AddClinic { .. } => "add_clinic",
            ScriptAction::RemoveClinic { .. } => "remove_clinic",
            ScriptAction::UpdateClinic { .. } => "update_clinic",
            ScriptAction::AttachLicense { .. } => "attach_license",
            ScriptAction::RemoveLicense => "remove_license",
            ScriptAction::SelectSpeciality { .. } => "select_speciality",
            ScriptAction::ToggleService { .. } => "toggle_service",
            ScriptAction::AddCustomService { .. } => "add_custom_service",
            ScriptAction::RemoveCustomService { .. } => "remove_custom_service",
            ScriptAction::ClinicDay { .. } => "clinic_day",
            ScriptAction::OnlineDay { .. } => "online_day",
            ScriptAction::TogglePaymentMethod { .. } => "toggle_payment_method",
            ScriptAction::Submit => "submit",
        }
    }
}

impl SessionScript {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    Applied,
    Moved { step: Step },
    Blocked { missing: Vec<FieldId> },
    Ignored,
    Rejected { message: String },
    Submitted { reference: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptEvent {
    pub index: usize,
    pub action: &'static str,
    #[serde(flatten)]
    pub outcome: EventOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub final_step: Step,
    pub progress_percent: u8,
    pub events: Vec<ScriptEvent>,
    pub validation: Vec<ValidationResult>,
    pub review: ReviewSummary,
    pub receipt: Option<SubmissionReceipt>,
}

impl ReplayReport {
    pub fn blocked_events(&self) -> impl Iterator<Item = &ScriptEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event.outcome, EventOutcome::Blocked { .. }))
    }
}

pub struct ScriptRunner<'a, O: OtpVerifier, S: SubmissionService, R: ResumeParser> {
    session: &'a mut RegistrationSession<O, S, R>,
}

impl<'a, O: OtpVerifier, S: SubmissionService, R: ResumeParser> ScriptRunner<'a, O, S, R> {
    pub fn new(session: &'a mut RegistrationSession<O, S, R>) -> Self {
        Self { session }
    }

    pub async fn run(&mut self, script: &SessionScript) -> Result<ReplayReport> {
        tracing::info!("▶️ Replaying {} actions", script.actions.len());

        let mut events = Vec::with_capacity(script.actions.len());
        for (index, action) in script.actions.iter().enumerate() {
            let outcome = self.apply(index, action).await?;
            if self.session.refresh_screen_defaults() {
                tracing::debug!("Contact phone pre-filled after action #{}", index);
            }
            tracing::debug!("#{} {} -> {:?}", index, action.name(), outcome);
            if let EventOutcome::Rejected { message } = &outcome {
                tracing::warn!("⚠️ Action #{} ({}) rejected: {}", index, action.name(), message);
            }
            events.push(ScriptEvent {
                index,
                action: action.name(),
                outcome,
            });
        }

        let store = self.session.store();
        Ok(ReplayReport {
            final_step: store.current_step(),
            progress_percent: store.progress_percent(),
            events,
            validation: Step::ALL.iter().map(|step| store.validation(*step)).collect(),
            review: self.session.review(),
            receipt: self.session.last_receipt().cloned(),
        })
    }

    fn clinic_id(&self, index: usize, position: usize) -> Result<ClinicId> {
        self.session
            .store()
            .draft()
            .clinics
            .get(position)
            .map(|clinic| clinic.id.clone())
            .ok_or_else(|| RegistrationError::ScriptError {
                index,
                message: format!("no clinic at position {}", position),
            })
    }

    async fn apply(&mut self, index: usize, action: &ScriptAction) -> Result<EventOutcome> {
        let outcome = match action {
            ScriptAction::Set { patch } => {
                self.session.update(patch.clone());
                EventOutcome::Applied
            }
            ScriptAction::Next => match self.session.next() {
                NextOutcome::Advanced(step) => EventOutcome::Moved { step },
                NextOutcome::Blocked(validation) => EventOutcome::Blocked {
                    missing: validation.missing_fields,
                },
                NextOutcome::AtLastStep => EventOutcome::Ignored,
            },
            ScriptAction::Previous => {
                self.session.previous();
                EventOutcome::Moved {
                    step: self.session.current_step(),
                }
            }
            ScriptAction::Goto { step } => {
                if Step::from_number(*step).is_none() {
                    EventOutcome::Ignored
                } else {
                    self.session.go_to(*step);
                    EventOutcome::Moved {
                        step: self.session.current_step(),
                    }
                }
            }
            ScriptAction::ToggleLanguage { language } => {
                self.session.store_mut().toggle_language(language);
                EventOutcome::Applied
            }
            ScriptAction::AddAward { award } => applied_if(self.session.store_mut().add_award(award)),
            ScriptAction::RemoveAward { index } => {
                self.session.store_mut().remove_award(*index);
                EventOutcome::Applied
            }
            ScriptAction::SendOtp => rejected_on_err(self.session.send_otp().await),
            ScriptAction::VerifyOtp { code } => rejected_on_err(self.session.verify_otp(code).await),
            ScriptAction::AttachProfilePicture { file } => {
                self.session.store_mut().attach_profile_picture(file.clone());
                EventOutcome::Applied
            }
            ScriptAction::AttachResume { file } => {
                self.session.attach_resume(file.clone());
                EventOutcome::Applied
            }
            ScriptAction::RemoveResume => {
                self.session.store_mut().remove_resume();
                EventOutcome::Applied
            }
            ScriptAction::AddClinic { name, address } => {
                applied_if(self.session.store_mut().add_clinic(name, address).is_some())
            }
            ScriptAction::RemoveClinic { clinic } => {
                let id = self.clinic_id(index, *clinic)?;
                applied_if(self.session.store_mut().remove_clinic(&id))
            }
            ScriptAction::UpdateClinic { clinic, field } => {
                let id = self.clinic_id(index, *clinic)?;
                applied_if(self.session.store_mut().update_clinic(&id, field.clone()))
            }
            ScriptAction::AttachLicense { file } => {
                self.session.store_mut().attach_license_document(file.clone());
                EventOutcome::Applied
            }
            ScriptAction::RemoveLicense => {
                self.session.store_mut().remove_license_document();
                EventOutcome::Applied
            }
            ScriptAction::SelectSpeciality { speciality } => {
                self.session.store_mut().select_speciality(speciality);
                EventOutcome::Applied
            }
            ScriptAction::ToggleService { service } => {
                self.session.store_mut().toggle_service(service);
                EventOutcome::Applied
            }
            ScriptAction::AddCustomService { service } => {
                applied_if(self.session.store_mut().add_custom_service(service))
            }
            ScriptAction::RemoveCustomService { index } => {
                self.session.store_mut().remove_custom_service(*index);
                EventOutcome::Applied
            }
            ScriptAction::ClinicDay { clinic, day, field } => {
                let id = self.clinic_id(index, *clinic)?;
                applied_if(
                    self.session
                        .store_mut()
                        .update_clinic_day(&id, *day, field.clone()),
                )
            }
            ScriptAction::OnlineDay { day, field } => {
                applied_if(self.session.store_mut().update_online_day(*day, field.clone()))
            }
            ScriptAction::TogglePaymentMethod { method } => {
                self.session.store_mut().toggle_payment_method(*method);
                EventOutcome::Applied
            }
            ScriptAction::Submit => match self.session.submit().await {
                Ok(receipt) => EventOutcome::Submitted {
                    reference: receipt.reference,
                },
                Err(e) => EventOutcome::Rejected {
                    message: e.to_string(),
                },
            },
        };
        Ok(outcome)
    }
}

fn applied_if(applied: bool) -> EventOutcome {
    if applied {
        EventOutcome::Applied
    } else {
        EventOutcome::Ignored
    }
}

fn rejected_on_err(result: Result<()>) -> EventOutcome {
    match result {
        Ok(()) => EventOutcome::Applied,
        Err(e) => EventOutcome::Rejected {
            message: e.to_string(),
        },
    }
}
