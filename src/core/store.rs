//! Owner of the draft and the current step.
//!
//! Every edit, including the typed helpers below, is funnelled through
//! [`FormStateStore::update`] as a whole-field replacement.

use crate::core::{catalog, validators};
use crate::domain::model::{
    Clinic, ClinicDay, ClinicId, DayOfWeek, DraftPatch, FieldId, FileHandle, OnlineDay,
    PaymentMethod, RegistrationDraft, Step, StepStatus, TimeRange, ValidationResult,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicField {
    Name(String),
    Address(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicDayField {
    IsWorking(bool),
    WorkHours(TimeRange),
    BreakTime(TimeRange),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineDayField {
    IsAvailable(bool),
    Hours(TimeRange),
    BreakTime(TimeRange),
}

#[derive(Debug, Clone)]
pub struct FormStateStore {
    draft: RegistrationDraft,
    current_step: Step,
    clinic_seq: u64,
}

impl Default for FormStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::with_draft(RegistrationDraft::default())
    }

    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            draft,
            current_step: Step::first(),
            clinic_seq: 0,
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn current_step(&self) -> Step {
        self.current_step
    }

    pub fn current_step_number(&self) -> u8 {
        self.current_step.number()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == Step::last()
    }

    /// Shallow merge: present fields replace the old value, absent ones stay.
    pub fn update(&mut self, patch: DraftPatch) -> Vec<FieldId> {
        let changed = patch.apply_to(&mut self.draft);
        if !changed.is_empty() {
            tracing::debug!(
                "Draft updated: {}",
                changed
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        for (field, value) in self.unlisted_values(&changed) {
            tracing::warn!("'{}' is not one of the offered {} options", value, field);
        }
        changed
    }

    /// Values of `changed` fields that fall outside their offered option list.
    fn unlisted_values(&self, changed: &[FieldId]) -> Vec<(FieldId, String)> {
        let mut unlisted = Vec::new();
        for field in changed {
            let Some(options) = catalog::options_for(*field) else {
                continue;
            };
            let values: Vec<&String> = match field {
                FieldId::Languages => self.draft.languages.iter().collect(),
                FieldId::HighestDegree => vec![&self.draft.highest_degree],
                FieldId::University => vec![&self.draft.university],
                FieldId::IssuingAuthority => vec![&self.draft.issuing_authority],
                _ => Vec::new(),
            };
            unlisted.extend(
                values
                    .into_iter()
                    .filter(|value| !value.is_empty() && !catalog::is_listed(options, value))
                    .map(|value| (*field, value.clone())),
            );
        }
        unlisted
    }

    pub fn go_next(&mut self) {
        if let Some(next) = self.current_step.next() {
            self.enter(next);
        }
    }

    pub fn go_previous(&mut self) {
        if let Some(previous) = self.current_step.previous() {
            self.enter(previous);
        }
    }

    /// Sidebar jump. Not gated by validity; out-of-range numbers are ignored.
    pub fn go_to(&mut self, step: u8) {
        match Step::from_number(step) {
            Some(target) => self.enter(target),
            None => tracing::debug!("Ignoring jump to out-of-range step {}", step),
        }
    }

    /// Moves the step index only; the draft is never touched by navigation.
    fn enter(&mut self, step: Step) {
        tracing::debug!("Moving from {} to {}", self.current_step, step);
        self.current_step = step;
    }

    // 聯絡電話預設帶入手機號碼
    /// Copies the mobile number into an empty phone number. Called by the
    /// contact screen while it is shown, never by navigation.
    pub fn prefill_contact_phone(&mut self) -> bool {
        if self.draft.mobile_number.is_empty() || !self.draft.phone_number.is_empty() {
            return false;
        }
        let phone_number = self.draft.mobile_number.clone();
        self.update(DraftPatch {
            phone_number: Some(phone_number),
            ..Default::default()
        });
        true
    }

    pub fn validation(&self, step: Step) -> ValidationResult {
        validators::validate_step(step, &self.draft)
    }

    pub fn current_validation(&self) -> ValidationResult {
        self.validation(self.current_step)
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_last_step() && self.current_validation().valid
    }

    pub fn progress_percent(&self) -> u8 {
        let percent = f64::from(self.current_step.number()) / f64::from(Step::COUNT) * 100.0;
        percent.round() as u8
    }

    pub fn step_statuses(&self) -> Vec<(Step, StepStatus)> {
        Step::ALL
            .iter()
            .map(|step| {
                let status = match step.cmp(&self.current_step) {
                    std::cmp::Ordering::Less => StepStatus::Completed,
                    std::cmp::Ordering::Equal => StepStatus::Current,
                    std::cmp::Ordering::Greater => StepStatus::Upcoming,
                };
                (*step, status)
            })
            .collect()
    }

    // ---- Doctor details ----

    pub fn toggle_language(&mut self, language: &str) {
        let mut languages = self.draft.languages.clone();
        toggle(&mut languages, language.to_string());
        self.update(DraftPatch {
            languages: Some(languages),
            ..Default::default()
        });
    }

    pub fn add_award(&mut self, award: &str) -> bool {
        let award = award.trim();
        if award.is_empty() {
            return false;
        }
        let mut awards = self.draft.awards.clone();
        awards.push(award.to_string());
        self.update(DraftPatch {
            awards: Some(awards),
            ..Default::default()
        });
        true
    }

    pub fn remove_award(&mut self, index: usize) {
        if index >= self.draft.awards.len() {
            return;
        }
        let mut awards = self.draft.awards.clone();
        awards.remove(index);
        self.update(DraftPatch {
            awards: Some(awards),
            ..Default::default()
        });
    }

    pub fn attach_profile_picture(&mut self, file: FileHandle) {
        self.update(DraftPatch {
            profile_picture: Some(Some(file)),
            ..Default::default()
        });
    }

    /// Stores the resume together with the biography derived from it.
    pub fn attach_resume(&mut self, file: FileHandle, bio: String) {
        self.update(DraftPatch {
            resume: Some(Some(file)),
            bio: Some(bio),
            ..Default::default()
        });
    }

    pub fn remove_resume(&mut self) {
        self.update(DraftPatch {
            resume: Some(None),
            bio: Some(String::new()),
            ..Default::default()
        });
    }

    pub fn mark_mobile_verified(&mut self) {
        self.update(DraftPatch {
            is_mobile_verified: Some(true),
            ..Default::default()
        });
    }

    // ---- Contact ----

    /// Returns `None` when the trimmed name or address is blank.
    pub fn add_clinic(&mut self, name: &str, address: &str) -> Option<Clinic> {
        let (name, address) = (name.trim(), address.trim());
        if name.is_empty() || address.is_empty() {
            return None;
        }

        let clinic = Clinic {
            id: self.fresh_clinic_id(),
            name: name.to_string(),
            address: address.to_string(),
        };
        let mut clinics = self.draft.clinics.clone();
        clinics.push(clinic.clone());
        self.update(DraftPatch {
            clinics: Some(clinics),
            ..Default::default()
        });
        Some(clinic)
    }

    fn fresh_clinic_id(&mut self) -> ClinicId {
        loop {
            self.clinic_seq += 1;
            let id = ClinicId::new(format!("clinic-{}", self.clinic_seq));
            if self.draft.clinic(&id).is_none() && !self.draft.clinic_availability.contains_key(&id)
            {
                return id;
            }
        }
    }

    /// Removes the clinic only; its availability entry is left in place.
    pub fn remove_clinic(&mut self, id: &ClinicId) -> bool {
        if self.draft.clinic(id).is_none() {
            return false;
        }
        let clinics = self
            .draft
            .clinics
            .iter()
            .filter(|clinic| &clinic.id != id)
            .cloned()
            .collect();
        self.update(DraftPatch {
            clinics: Some(clinics),
            ..Default::default()
        });
        true
    }

    pub fn update_clinic(&mut self, id: &ClinicId, field: ClinicField) -> bool {
        if self.draft.clinic(id).is_none() {
            return false;
        }
        let clinics = self
            .draft
            .clinics
            .iter()
            .map(|clinic| {
                if &clinic.id != id {
                    return clinic.clone();
                }
                let mut clinic = clinic.clone();
                match &field {
                    ClinicField::Name(name) => clinic.name = name.clone(),
                    ClinicField::Address(address) => clinic.address = address.clone(),
                }
                clinic
            })
            .collect();
        self.update(DraftPatch {
            clinics: Some(clinics),
            ..Default::default()
        });
        true
    }

    // ---- Education ----

    pub fn attach_license_document(&mut self, file: FileHandle) {
        self.update(DraftPatch {
            license_document: Some(Some(file)),
            ..Default::default()
        });
    }

    pub fn remove_license_document(&mut self) {
        self.update(DraftPatch {
            license_document: Some(None),
            ..Default::default()
        });
    }

    // ---- Specialization ----

    /// Picking a speciality discards every previously chosen service.
    pub fn select_speciality(&mut self, speciality: &str) {
        if catalog::services_for(speciality).is_empty() {
            tracing::warn!("Speciality '{}' has no standard services", speciality);
        }
        self.update(DraftPatch {
            speciality: Some(speciality.to_string()),
            services: Some(Vec::new()),
            custom_services: Some(Vec::new()),
            ..Default::default()
        });
    }

    pub fn toggle_service(&mut self, service: &str) {
        let mut services = self.draft.services.clone();
        toggle(&mut services, service.to_string());
        self.update(DraftPatch {
            services: Some(services),
            ..Default::default()
        });
    }

    pub fn add_custom_service(&mut self, service: &str) -> bool {
        let service = service.trim();
        if service.is_empty() {
            return false;
        }
        let mut custom_services = self.draft.custom_services.clone();
        custom_services.push(service.to_string());
        self.update(DraftPatch {
            custom_services: Some(custom_services),
            ..Default::default()
        });
        true
    }

    pub fn remove_custom_service(&mut self, index: usize) {
        if index >= self.draft.custom_services.len() {
            return;
        }
        let mut custom_services = self.draft.custom_services.clone();
        custom_services.remove(index);
        self.update(DraftPatch {
            custom_services: Some(custom_services),
            ..Default::default()
        });
    }

    // ---- Availability ----

    pub fn clinic_day(&self, clinic_id: &ClinicId, day: DayOfWeek) -> ClinicDay {
        self.draft
            .clinic_availability
            .get(clinic_id)
            .and_then(|schedule| schedule.days.get(&day))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `false` (and changes nothing) for hours outside the slot list.
    pub fn update_clinic_day(
        &mut self,
        clinic_id: &ClinicId,
        day: DayOfWeek,
        field: ClinicDayField,
    ) -> bool {
        if let ClinicDayField::WorkHours(range) | ClinicDayField::BreakTime(range) = &field {
            if !is_slot_range(range) {
                tracing::warn!("Ignoring off-slot clinic hours {} for {}", range, day.name());
                return false;
            }
        }
        let mut availability = self.draft.clinic_availability.clone();
        let entry = availability
            .entry(clinic_id.clone())
            .or_default()
            .days
            .entry(day)
            .or_default();
        match field {
            ClinicDayField::IsWorking(is_working) => entry.is_working = is_working,
            ClinicDayField::WorkHours(hours) => entry.work_hours = hours,
            ClinicDayField::BreakTime(range) => entry.break_time = range,
        }
        self.update(DraftPatch {
            clinic_availability: Some(availability),
            ..Default::default()
        });
        true
    }

    pub fn online_day(&self, day: DayOfWeek) -> OnlineDay {
        self.draft
            .online_consultation_hours
            .get(&day)
            .cloned()
            .unwrap_or_default()
    }

    pub fn update_online_day(&mut self, day: DayOfWeek, field: OnlineDayField) -> bool {
        if let OnlineDayField::Hours(range) | OnlineDayField::BreakTime(range) = &field {
            if !is_slot_range(range) {
                tracing::warn!("Ignoring off-slot online hours {} for {}", range, day.name());
                return false;
            }
        }
        let mut hours = self.draft.online_consultation_hours.clone();
        let entry = hours.entry(day).or_default();
        match field {
            OnlineDayField::IsAvailable(is_available) => entry.is_available = is_available,
            OnlineDayField::Hours(range) => entry.hours = range,
            OnlineDayField::BreakTime(range) => entry.break_time = range,
        }
        self.update(DraftPatch {
            online_consultation_hours: Some(hours),
            ..Default::default()
        });
        true
    }

    // ---- Payment ----

    pub fn toggle_payment_method(&mut self, method: PaymentMethod) {
        let mut methods = self.draft.payment_methods.clone();
        toggle(&mut methods, method);
        self.update(DraftPatch {
            payment_methods: Some(methods),
            ..Default::default()
        });
    }
}

fn is_slot_range(range: &TimeRange) -> bool {
    catalog::is_time_slot(&range.start) && catalog::is_time_slot(&range.end)
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(position) = items.iter().position(|existing| existing == &item) {
        items.remove(position);
    } else {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let store = FormStateStore::new();
        assert_eq!(store.current_step_number(), 1);
        assert_eq!(store.draft(), &RegistrationDraft::default());
        assert_eq!(store.progress_percent(), 14);
    }

    #[test]
    fn test_go_to_is_unguarded() {
        let mut store = FormStateStore::new();
        for step in 1..=7 {
            store.go_to(step);
            assert_eq!(store.current_step_number(), step);
        }
        store.go_to(0);
        assert_eq!(store.current_step_number(), 7);
        store.go_to(8);
        assert_eq!(store.current_step_number(), 7);
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut store = FormStateStore::new();
        store.go_previous();
        assert_eq!(store.current_step(), Step::DoctorDetails);

        store.go_to(7);
        store.go_next();
        assert_eq!(store.current_step(), Step::Review);
        assert_eq!(store.progress_percent(), 100);

        store.go_previous();
        assert_eq!(store.current_step(), Step::Payment);
    }

    #[test]
    fn test_step_statuses_follow_position() {
        let mut store = FormStateStore::new();
        store.go_to(3);
        let statuses = store.step_statuses();
        assert_eq!(statuses[0].1, StepStatus::Completed);
        assert_eq!(statuses[1].1, StepStatus::Completed);
        assert_eq!(statuses[2].1, StepStatus::Current);
        assert_eq!(statuses[6].1, StepStatus::Upcoming);
    }

    #[test]
    fn test_navigation_leaves_draft_untouched() {
        let mut store = FormStateStore::new();
        store.update(DraftPatch {
            mobile_number: Some("9876543210".to_string()),
            ..Default::default()
        });
        let before = store.draft().clone();

        store.go_next();
        assert_eq!(store.draft(), &before);
        store.go_previous();
        store.go_to(2);
        assert_eq!(store.current_step(), Step::ContactInfo);
        assert_eq!(store.draft(), &before);
        assert!(store.draft().phone_number.is_empty());
    }

    #[test]
    fn test_prefill_contact_phone_only_fills_empty_phone() {
        let mut store = FormStateStore::new();
        assert!(!store.prefill_contact_phone());

        store.update(DraftPatch {
            mobile_number: Some("9876543210".to_string()),
            ..Default::default()
        });
        assert!(store.prefill_contact_phone());
        assert_eq!(store.draft().phone_number, "9876543210");

        store.update(DraftPatch {
            phone_number: Some("0441234567".to_string()),
            ..Default::default()
        });
        assert!(!store.prefill_contact_phone());
        assert_eq!(store.draft().phone_number, "0441234567");
    }

    #[test]
    fn test_unlisted_values_are_kept_but_reported() {
        let mut store = FormStateStore::new();
        let changed = store.update(DraftPatch {
            highest_degree: Some("PhD in Astrology".to_string()),
            university: Some("Christian Medical College".to_string()),
            languages: Some(vec!["English".to_string(), "Klingon".to_string()]),
            ..Default::default()
        });

        assert_eq!(store.draft().highest_degree, "PhD in Astrology");
        assert_eq!(
            store.unlisted_values(&changed),
            vec![
                (FieldId::Languages, "Klingon".to_string()),
                (FieldId::HighestDegree, "PhD in Astrology".to_string()),
            ]
        );
    }

    #[test]
    fn test_off_slot_hours_are_rejected() {
        let mut store = FormStateStore::new();
        let id = ClinicId::new("clinic-1");
        assert!(!store.update_clinic_day(
            &id,
            DayOfWeek::Monday,
            ClinicDayField::WorkHours(TimeRange::new("25:99", "17:00")),
        ));
        assert!(!store.update_online_day(
            DayOfWeek::Friday,
            OnlineDayField::BreakTime(TimeRange::new("13:00", "13:15")),
        ));
        assert!(store.draft().clinic_availability.is_empty());
        assert!(store.draft().online_consultation_hours.is_empty());

        assert!(store.update_clinic_day(
            &id,
            DayOfWeek::Monday,
            ClinicDayField::WorkHours(TimeRange::new("09:30", "20:30")),
        ));
        assert_eq!(
            store.clinic_day(&id, DayOfWeek::Monday).work_hours,
            TimeRange::new("09:30", "20:30")
        );
    }

    #[test]
    fn test_add_clinic_rejects_blank_fields() {
        let mut store = FormStateStore::new();
        assert!(store.add_clinic("  ", "12 Main St").is_none());
        assert!(store.add_clinic("City Clinic", "").is_none());

        let clinic = store.add_clinic("  City Clinic ", " 12 Main St").unwrap();
        assert_eq!(clinic.name, "City Clinic");
        assert_eq!(clinic.address, "12 Main St");

        let second = store.add_clinic("Lake Clinic", "4 Lake Rd").unwrap();
        assert_ne!(clinic.id, second.id);
        assert_eq!(store.draft().clinics.len(), 2);
    }

    #[test]
    fn test_remove_clinic_keeps_availability() {
        let mut store = FormStateStore::new();
        let clinic = store.add_clinic("City Clinic", "12 Main St").unwrap();
        store.update_clinic_day(&clinic.id, DayOfWeek::Monday, ClinicDayField::IsWorking(true));

        assert!(store.remove_clinic(&clinic.id));
        assert!(store.draft().clinics.is_empty());
        assert!(store.draft().clinic_availability.contains_key(&clinic.id));
        assert!(!store.remove_clinic(&clinic.id));
    }

    #[test]
    fn test_update_clinic_in_place() {
        let mut store = FormStateStore::new();
        let clinic = store.add_clinic("City Clinic", "12 Main St").unwrap();
        assert!(store.update_clinic(&clinic.id, ClinicField::Address(String::new())));
        assert_eq!(store.draft().clinics[0].address, "");
        assert_eq!(store.draft().clinics[0].name, "City Clinic");
        assert!(!store.update_clinic(&ClinicId::new("missing"), ClinicField::Name("x".into())));
    }

    #[test]
    fn test_clinic_day_update_keeps_other_fields() {
        let mut store = FormStateStore::new();
        let id = ClinicId::new("clinic-1");
        assert_eq!(store.clinic_day(&id, DayOfWeek::Monday), ClinicDay::default());

        store.update_clinic_day(&id, DayOfWeek::Monday, ClinicDayField::IsWorking(true));
        store.update_clinic_day(
            &id,
            DayOfWeek::Monday,
            ClinicDayField::WorkHours(TimeRange::new("10:00", "18:00")),
        );

        let day = store.clinic_day(&id, DayOfWeek::Monday);
        assert!(day.is_working);
        assert_eq!(day.work_hours, TimeRange::new("10:00", "18:00"));
        assert_eq!(day.break_time, TimeRange::default_break());
        assert!(!store.clinic_day(&id, DayOfWeek::Tuesday).is_working);
    }

    #[test]
    fn test_online_day_update() {
        let mut store = FormStateStore::new();
        store.update_online_day(DayOfWeek::Sunday, OnlineDayField::IsAvailable(true));
        store.update_online_day(
            DayOfWeek::Sunday,
            OnlineDayField::BreakTime(TimeRange::new("12:00", "12:30")),
        );
        let day = store.online_day(DayOfWeek::Sunday);
        assert!(day.is_available);
        assert_eq!(day.hours, TimeRange::default_hours());
        assert_eq!(day.break_time, TimeRange::new("12:00", "12:30"));
    }

    #[test]
    fn test_select_speciality_resets_services() {
        let mut store = FormStateStore::new();
        store.select_speciality("Cardiology");
        store.toggle_service("ECG");
        assert!(store.add_custom_service(" Holter review "));
        assert_eq!(store.draft().custom_services, vec!["Holter review"]);

        store.select_speciality("Neurology");
        assert!(store.draft().services.is_empty());
        assert!(store.draft().custom_services.is_empty());
    }

    #[test]
    fn test_toggles_add_and_remove() {
        let mut store = FormStateStore::new();
        store.toggle_language("Tamil");
        store.toggle_language("English");
        store.toggle_language("Tamil");
        assert_eq!(store.draft().languages, vec!["English"]);

        store.toggle_payment_method(PaymentMethod::Upi);
        store.toggle_payment_method(PaymentMethod::Paytm);
        store.toggle_payment_method(PaymentMethod::Upi);
        assert_eq!(store.draft().payment_methods, vec![PaymentMethod::Paytm]);
    }

    #[test]
    fn test_awards_edit() {
        let mut store = FormStateStore::new();
        assert!(!store.add_award("   "));
        assert!(store.add_award("Best Resident 2015"));
        assert!(store.add_award("Gold Medal"));
        store.remove_award(5);
        store.remove_award(0);
        assert_eq!(store.draft().awards, vec!["Gold Medal"]);
    }

    #[test]
    fn test_remove_resume_clears_bio() {
        let mut store = FormStateStore::new();
        store.attach_resume(FileHandle::new("cv.pdf", 10_240), "Bio".to_string());
        assert_eq!(store.draft().bio, "Bio");

        store.remove_resume();
        assert!(store.draft().resume.is_none());
        assert!(store.draft().bio.is_empty());
    }

    #[test]
    fn test_can_go_next_reflects_validity() {
        let mut store = FormStateStore::new();
        assert!(!store.can_go_next());
        store.go_to(7);
        assert!(!store.can_go_next());
    }
}
