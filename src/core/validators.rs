//! Per-step completeness predicates.
//!
//! Each predicate reads only its own step's slice of the draft and lists the
//! fields that keep the step from being complete. An empty list means the
//! "Next" button is enabled.

use crate::domain::model::{FieldId, RegistrationDraft, Step, ValidationResult};

fn require_text(missing: &mut Vec<FieldId>, field: FieldId, value: &str) {
    if value.is_empty() {
        missing.push(field);
    }
}

pub fn validate_doctor_details(draft: &RegistrationDraft) -> ValidationResult {
    let mut missing = Vec::new();
    require_text(&mut missing, FieldId::FirstName, &draft.first_name);
    require_text(&mut missing, FieldId::LastName, &draft.last_name);
    require_text(&mut missing, FieldId::DateOfBirth, &draft.date_of_birth);
    require_text(&mut missing, FieldId::MobileNumber, &draft.mobile_number);
    if !draft.is_mobile_verified {
        missing.push(FieldId::IsMobileVerified);
    }
    if draft.languages.is_empty() {
        missing.push(FieldId::Languages);
    }
    require_text(&mut missing, FieldId::Bio, &draft.bio);
    ValidationResult::from_missing(Step::DoctorDetails, missing)
}

pub fn validate_contact_info(draft: &RegistrationDraft) -> ValidationResult {
    let mut missing = Vec::new();
    require_text(&mut missing, FieldId::PhoneNumber, &draft.phone_number);
    require_text(&mut missing, FieldId::Email, &draft.email);
    if draft.clinics.is_empty() || !draft.clinics.iter().all(|c| c.is_complete()) {
        missing.push(FieldId::Clinics);
    }
    ValidationResult::from_missing(Step::ContactInfo, missing)
}

pub fn validate_education(draft: &RegistrationDraft) -> ValidationResult {
    let mut missing = Vec::new();
    require_text(&mut missing, FieldId::HighestDegree, &draft.highest_degree);
    require_text(&mut missing, FieldId::University, &draft.university);
    require_text(
        &mut missing,
        FieldId::MedicalLicenseNumber,
        &draft.medical_license_number,
    );
    require_text(&mut missing, FieldId::IssuingAuthority, &draft.issuing_authority);
    require_text(
        &mut missing,
        FieldId::LicenseExpiryDate,
        &draft.license_expiry_date,
    );
    if draft.license_document.is_none() {
        missing.push(FieldId::LicenseDocument);
    }
    ValidationResult::from_missing(Step::Education, missing)
}

pub fn validate_specialization(draft: &RegistrationDraft) -> ValidationResult {
    let mut missing = Vec::new();
    require_text(&mut missing, FieldId::Speciality, &draft.speciality);
    if draft.services.is_empty() && draft.custom_services.is_empty() {
        missing.push(FieldId::Services);
    }
    ValidationResult::from_missing(Step::Specialization, missing)
}

/// With no clinics the step is blocked even if online hours are set.
/// Otherwise any working clinic day or any available online day suffices.
/// Availability entries of removed clinics still count.
pub fn validate_availability(draft: &RegistrationDraft) -> ValidationResult {
    if draft.clinics.is_empty() {
        return ValidationResult::from_missing(Step::Availability, vec![FieldId::Clinics]);
    }

    let has_clinic_day = draft
        .clinic_availability
        .values()
        .any(|schedule| schedule.days.values().any(|day| day.is_working));
    let has_online_day = draft
        .online_consultation_hours
        .values()
        .any(|day| day.is_available);

    let missing = if has_clinic_day || has_online_day {
        Vec::new()
    } else {
        vec![FieldId::ClinicAvailability, FieldId::OnlineConsultationHours]
    };
    ValidationResult::from_missing(Step::Availability, missing)
}

pub fn validate_payment(draft: &RegistrationDraft) -> ValidationResult {
    let mut missing = Vec::new();
    if draft.clinic_visit_charges == 0 {
        missing.push(FieldId::ClinicVisitCharges);
    }
    if draft.online_consultation_charges == 0 {
        missing.push(FieldId::OnlineConsultationCharges);
    }
    if draft.payment_methods.is_empty() {
        missing.push(FieldId::PaymentMethods);
    }
    ValidationResult::from_missing(Step::Payment, missing)
}

pub fn validate_review(_draft: &RegistrationDraft) -> ValidationResult {
    ValidationResult::from_missing(Step::Review, Vec::new())
}

pub fn validate_step(step: Step, draft: &RegistrationDraft) -> ValidationResult {
    match step {
        Step::DoctorDetails => validate_doctor_details(draft),
        Step::ContactInfo => validate_contact_info(draft),
        Step::Education => validate_education(draft),
        Step::Specialization => validate_specialization(draft),
        Step::Availability => validate_availability(draft),
        Step::Payment => validate_payment(draft),
        Step::Review => validate_review(draft),
    }
}

pub fn is_step_valid(step: Step, draft: &RegistrationDraft) -> bool {
    validate_step(step, draft).valid
}

pub fn validate_all(draft: &RegistrationDraft) -> Vec<ValidationResult> {
    Step::ALL
        .iter()
        .map(|step| validate_step(*step, draft))
        .collect()
}
