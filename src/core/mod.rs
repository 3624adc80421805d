pub mod catalog;
pub mod session;
pub mod store;
pub mod summary;
pub mod validators;

pub use crate::domain::model::{
    Clinic, ClinicDay, ClinicId, ClinicSchedule, DayOfWeek, DraftPatch, FieldId, FileHandle,
    OnlineDay, PaymentMethod, RegistrationDraft, Step, StepStatus, SubmissionReceipt, TimeRange,
    ValidationResult,
};
pub use crate::domain::ports::{ConfigProvider, OtpVerifier, ResumeParser, SubmissionService};
pub use crate::utils::error::Result;
