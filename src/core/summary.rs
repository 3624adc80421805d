use crate::domain::model::{
    ClinicSchedule, DayOfWeek, FileHandle, OnlineDay, RegistrationDraft, TimeRange,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicAvailabilitySummary {
    pub clinic_id: String,
    /// Empty when the clinic was removed after its schedule was set.
    pub clinic_name: String,
    pub working_days: usize,
    pub schedule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub name: String,
    pub size_kb: u64,
}

/// What the review screen shows before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub display_name: String,
    pub initials: String,
    pub speciality: String,
    pub is_mobile_verified: bool,
    pub email: String,
    pub phone_number: String,
    pub clinics: Vec<String>,
    pub highest_degree: String,
    pub university: String,
    pub medical_license_number: String,
    pub issuing_authority: String,
    pub license_expiry_date: String,
    pub license_document: Option<UploadSummary>,
    pub services: Vec<String>,
    pub clinic_visit_charges: u32,
    pub online_consultation_charges: u32,
    pub payment_methods: Vec<String>,
    pub clinic_availability: Vec<ClinicAvailabilitySummary>,
    pub online_days: usize,
    pub online_schedule: String,
    pub languages: Vec<String>,
    pub awards: Vec<String>,
    pub bio: String,
    pub resume: Option<UploadSummary>,
    pub profile_picture: Option<UploadSummary>,
}

impl ReviewSummary {
    pub fn from_draft(draft: &RegistrationDraft) -> Self {
        let clinic_availability = draft
            .clinic_availability
            .iter()
            .map(|(id, schedule)| ClinicAvailabilitySummary {
                clinic_id: id.to_string(),
                clinic_name: draft
                    .clinic(id)
                    .map(|clinic| clinic.name.clone())
                    .unwrap_or_default(),
                working_days: schedule.working_days(),
                schedule: format_clinic_schedule(schedule),
            })
            .collect();

        let upload = |file: &FileHandle| UploadSummary {
            name: file.name.clone(),
            size_kb: file.size_kb(),
        };

        Self {
            display_name: format!("Dr. {} {}", draft.first_name, draft.last_name),
            initials: initials(&draft.first_name, &draft.last_name),
            speciality: draft.speciality.clone(),
            is_mobile_verified: draft.is_mobile_verified,
            email: draft.email.clone(),
            phone_number: draft.phone_number.clone(),
            clinics: draft
                .clinics
                .iter()
                .map(|clinic| format!("{}, {}", clinic.name, clinic.address))
                .collect(),
            highest_degree: draft.highest_degree.clone(),
            university: draft.university.clone(),
            medical_license_number: draft.medical_license_number.clone(),
            issuing_authority: draft.issuing_authority.clone(),
            license_expiry_date: draft.license_expiry_date.clone(),
            license_document: draft.license_document.as_ref().map(upload),
            services: draft
                .services
                .iter()
                .chain(draft.custom_services.iter())
                .cloned()
                .collect(),
            clinic_visit_charges: draft.clinic_visit_charges,
            online_consultation_charges: draft.online_consultation_charges,
            payment_methods: draft
                .payment_methods
                .iter()
                .map(|method| method.display_name().to_string())
                .collect(),
            clinic_availability,
            online_days: draft
                .online_consultation_hours
                .values()
                .filter(|day| day.is_available)
                .count(),
            online_schedule: format_online_hours(&draft.online_consultation_hours),
            languages: draft.languages.clone(),
            awards: draft.awards.clone(),
            bio: draft.bio.clone(),
            resume: draft.resume.as_ref().map(upload),
            profile_picture: draft.profile_picture.as_ref().map(upload),
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} ({})", self.display_name, self.speciality),
            format!(
                "  Mobile verified: {}",
                if self.is_mobile_verified { "yes" } else { "no" }
            ),
            format!("  Email: {}  Phone: {}", self.email, self.phone_number),
            format!(
                "  Education: {}, {} (license {})",
                self.highest_degree, self.university, self.medical_license_number
            ),
            format!(
                "  License document: {}",
                self.license_document
                    .as_ref()
                    .map(|file| format!("{} ({} KB)", file.name, file.size_kb))
                    .unwrap_or_else(|| "Not uploaded".to_string())
            ),
            format!("  Services: {}", self.services.join(", ")),
            format!(
                "  Charges: clinic ₹{}, online ₹{}",
                self.clinic_visit_charges, self.online_consultation_charges
            ),
            format!("  Payment methods: {}", self.payment_methods.join(", ")),
        ];
        for clinic in &self.clinic_availability {
            lines.push(format!(
                "  {}: {} days/week",
                clinic.clinic_name, clinic.working_days
            ));
        }
        lines.push(format!("  Online consultation: {} days/week", self.online_days));
        lines
    }
}

fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .next()
        .into_iter()
        .chain(last_name.chars().next())
        .collect()
}

fn format_days<'a>(days: impl Iterator<Item = (DayOfWeek, bool, &'a TimeRange)>) -> String {
    let active: Vec<String> = days
        .filter(|(_, active, _)| *active)
        .map(|(day, _, hours)| format!("{}: {}", day, hours))
        .collect();
    if active.is_empty() {
        "No working days set".to_string()
    } else {
        active.join(", ")
    }
}

pub fn format_clinic_schedule(schedule: &ClinicSchedule) -> String {
    if schedule.days.is_empty() {
        return "Not set".to_string();
    }
    format_days(
        schedule
            .days
            .iter()
            .map(|(day, entry)| (*day, entry.is_working, &entry.work_hours)),
    )
}

pub fn format_online_hours(hours: &BTreeMap<DayOfWeek, OnlineDay>) -> String {
    if hours.is_empty() {
        return "Not set".to_string();
    }
    format_days(
        hours
            .iter()
            .map(|(day, entry)| (*day, entry.is_available, &entry.hours)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Clinic, ClinicDay, ClinicId, PaymentMethod};

    #[test]
    fn test_format_online_hours() {
        let mut hours = BTreeMap::new();
        assert_eq!(format_online_hours(&hours), "Not set");

        hours.insert(DayOfWeek::Wednesday, OnlineDay::default());
        assert_eq!(format_online_hours(&hours), "No working days set");

        hours.insert(
            DayOfWeek::Monday,
            OnlineDay {
                is_available: true,
                hours: TimeRange::new("10:00", "12:00"),
                ..Default::default()
            },
        );
        hours.insert(
            DayOfWeek::Friday,
            OnlineDay {
                is_available: true,
                ..Default::default()
            },
        );
        assert_eq!(
            format_online_hours(&hours),
            "Monday: 10:00 - 12:00, Friday: 09:00 - 17:00"
        );
    }

    #[test]
    fn test_summary_of_filled_draft() {
        let mut draft = RegistrationDraft {
            first_name: "Meera".to_string(),
            last_name: "Iyer".to_string(),
            speciality: "Cardiology".to_string(),
            services: vec!["ECG".to_string()],
            custom_services: vec!["Holter review".to_string()],
            payment_methods: vec![PaymentMethod::GooglePay, PaymentMethod::NetBanking],
            clinics: vec![Clinic {
                id: ClinicId::new("clinic-1"),
                name: "City Clinic".to_string(),
                address: "12 Main St".to_string(),
            }],
            resume: Some(FileHandle::new("cv.pdf", 204_800)),
            license_document: Some(FileHandle::new("license.pdf", 80_000)),
            ..Default::default()
        };
        let mut schedule = ClinicSchedule::default();
        for day in [DayOfWeek::Monday, DayOfWeek::Thursday] {
            schedule.days.insert(
                day,
                ClinicDay {
                    is_working: true,
                    ..Default::default()
                },
            );
        }
        draft
            .clinic_availability
            .insert(ClinicId::new("clinic-1"), schedule.clone());
        draft
            .clinic_availability
            .insert(ClinicId::new("clinic-0"), schedule);

        let summary = ReviewSummary::from_draft(&draft);
        assert_eq!(summary.display_name, "Dr. Meera Iyer");
        assert_eq!(summary.initials, "MI");
        assert_eq!(summary.services, vec!["ECG", "Holter review"]);
        assert_eq!(summary.payment_methods, vec!["Google Pay", "Net Banking"]);
        assert_eq!(summary.resume.as_ref().map(|r| r.size_kb), Some(200));
        assert_eq!(
            summary.license_document,
            Some(UploadSummary {
                name: "license.pdf".to_string(),
                size_kb: 78,
            })
        );

        let orphan = &summary.clinic_availability[0];
        assert_eq!(orphan.clinic_id, "clinic-0");
        assert_eq!(orphan.clinic_name, "");
        let city = &summary.clinic_availability[1];
        assert_eq!(city.clinic_name, "City Clinic");
        assert_eq!(city.working_days, 2);
        assert!(summary
            .to_lines()
            .contains(&"  City Clinic: 2 days/week".to_string()));
    }
}
