use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 註冊精靈的七個步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    DoctorDetails,
    ContactInfo,
    Education,
    Specialization,
    Availability,
    Payment,
    Review,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::DoctorDetails,
        Step::ContactInfo,
        Step::Education,
        Step::Specialization,
        Step::Availability,
        Step::Payment,
        Step::Review,
    ];

    pub const COUNT: u8 = 7;

    pub fn first() -> Self {
        Step::DoctorDetails
    }

    pub fn last() -> Self {
        Step::Review
    }

    /// 1-based step number as shown in the sidebar.
    pub fn number(self) -> u8 {
        match self {
            Step::DoctorDetails => 1,
            Step::ContactInfo => 2,
            Step::Education => 3,
            Step::Specialization => 4,
            Step::Availability => 5,
            Step::Payment => 6,
            Step::Review => 7,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::ALL[usize::from(number - 1)]),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::DoctorDetails => "Doctor Details",
            Step::ContactInfo => "Contact Information",
            Step::Education => "Education & Qualification",
            Step::Specialization => "Specialization",
            Step::Availability => "Availability",
            Step::Payment => "Charges & Payment",
            Step::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} ({})", self.number(), self.title())
    }
}

/// Sidebar badge of a step relative to the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Current,
    Upcoming,
}

/// An uploaded file as seen by the wizard: only name and size are inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content_type: None,
        }
    }

    /// Size rounded to the nearest kilobyte.
    pub fn size_kb(&self) -> u64 {
        (self.size_bytes + 512) / 1024
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicId(pub String);

impl ClinicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClinicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub address: String,
}

impl Clinic {
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.address.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `HH:MM` start/end pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn default_hours() -> Self {
        Self::new("09:00", "17:00")
    }

    pub fn default_break() -> Self {
        Self::new("13:00", "14:00")
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicDay {
    pub is_working: bool,
    pub work_hours: TimeRange,
    pub break_time: TimeRange,
}

impl Default for ClinicDay {
    fn default() -> Self {
        Self {
            is_working: false,
            work_hours: TimeRange::default_hours(),
            break_time: TimeRange::default_break(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicSchedule {
    #[serde(default)]
    pub days: BTreeMap<DayOfWeek, ClinicDay>,
}

impl ClinicSchedule {
    pub fn working_days(&self) -> usize {
        self.days.values().filter(|day| day.is_working).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnlineDay {
    pub is_available: bool,
    pub hours: TimeRange,
    pub break_time: TimeRange,
}

impl Default for OnlineDay {
    fn default() -> Self {
        Self {
            is_available: false,
            hours: TimeRange::default_hours(),
            break_time: TimeRange::default_break(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "gpay")]
    GooglePay,
    #[serde(rename = "paytm")]
    Paytm,
    #[serde(rename = "phonepe")]
    PhonePe,
    #[serde(rename = "netbanking")]
    NetBanking,
    #[serde(rename = "upi")]
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::GooglePay,
        PaymentMethod::Paytm,
        PaymentMethod::PhonePe,
        PaymentMethod::NetBanking,
        PaymentMethod::Upi,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PaymentMethod::GooglePay => "gpay",
            PaymentMethod::Paytm => "paytm",
            PaymentMethod::PhonePe => "phonepe",
            PaymentMethod::NetBanking => "netbanking",
            PaymentMethod::Upi => "upi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::Paytm => "Paytm",
            PaymentMethod::PhonePe => "PhonePe",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Upi => "UPI",
        }
    }
}

/// The single in-progress registration record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    // Doctor details
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub languages: Vec<String>,
    pub mobile_number: String,
    pub is_mobile_verified: bool,
    pub resume: Option<FileHandle>,
    pub profile_picture: Option<FileHandle>,
    pub bio: String,
    pub awards: Vec<String>,

    // Contact information
    pub phone_number: String,
    pub email: String,
    pub clinics: Vec<Clinic>,

    // Education and qualification
    pub highest_degree: String,
    pub university: String,
    pub medical_license_number: String,
    pub issuing_authority: String,
    pub license_document: Option<FileHandle>,
    pub license_expiry_date: String,

    // Specialization
    pub speciality: String,
    pub services: Vec<String>,
    pub custom_services: Vec<String>,

    // Availability
    pub clinic_availability: BTreeMap<ClinicId, ClinicSchedule>,
    pub online_consultation_hours: BTreeMap<DayOfWeek, OnlineDay>,

    // Charges and payment (whole rupees)
    pub clinic_visit_charges: u32,
    pub online_consultation_charges: u32,
    pub payment_methods: Vec<PaymentMethod>,
}

impl RegistrationDraft {
    pub fn clinic(&self, id: &ClinicId) -> Option<&Clinic> {
        self.clinics.iter().find(|clinic| &clinic.id == id)
    }
}

/// Whole-field replacement set for [`RegistrationDraft`]. `None` keeps the
/// prior value; nullable file fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub languages: Option<Vec<String>>,
    pub mobile_number: Option<String>,
    pub is_mobile_verified: Option<bool>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub resume: Option<Option<FileHandle>>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Option<FileHandle>>,
    pub bio: Option<String>,
    pub awards: Option<Vec<String>>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub clinics: Option<Vec<Clinic>>,
    pub highest_degree: Option<String>,
    pub university: Option<String>,
    pub medical_license_number: Option<String>,
    pub issuing_authority: Option<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub license_document: Option<Option<FileHandle>>,
    pub license_expiry_date: Option<String>,
    pub speciality: Option<String>,
    pub services: Option<Vec<String>>,
    pub custom_services: Option<Vec<String>>,
    pub clinic_availability: Option<BTreeMap<ClinicId, ClinicSchedule>>,
    pub online_consultation_hours: Option<BTreeMap<DayOfWeek, OnlineDay>>,
    pub clinic_visit_charges: Option<u32>,
    pub online_consultation_charges: Option<u32>,
    pub payment_methods: Option<Vec<PaymentMethod>>,
}

macro_rules! merge_fields {
    ($patch:ident, $draft:ident, $names:ident; $($field:ident => $id:ident),* $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $draft.$field = value;
                $names.push(FieldId::$id);
            }
        )*
    };
}

impl DraftPatch {
    /// Moves every present field into `draft`, returning the replaced field ids.
    pub fn apply_to(self, draft: &mut RegistrationDraft) -> Vec<FieldId> {
        let patch = self;
        let mut changed = Vec::new();
        merge_fields!(patch, draft, changed;
            first_name => FirstName,
            last_name => LastName,
            date_of_birth => DateOfBirth,
            languages => Languages,
            mobile_number => MobileNumber,
            is_mobile_verified => IsMobileVerified,
            resume => Resume,
            profile_picture => ProfilePicture,
            bio => Bio,
            awards => Awards,
            phone_number => PhoneNumber,
            email => Email,
            clinics => Clinics,
            highest_degree => HighestDegree,
            university => University,
            medical_license_number => MedicalLicenseNumber,
            issuing_authority => IssuingAuthority,
            license_document => LicenseDocument,
            license_expiry_date => LicenseExpiryDate,
            speciality => Speciality,
            services => Services,
            custom_services => CustomServices,
            clinic_availability => ClinicAvailability,
            online_consultation_hours => OnlineConsultationHours,
            clinic_visit_charges => ClinicVisitCharges,
            online_consultation_charges => OnlineConsultationCharges,
            payment_methods => PaymentMethods,
        );
        changed
    }
}

/// A present key deserializes to `Some(value)` even when the value is null.
mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Identifies one draft field, named as in the serialized draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FirstName,
    LastName,
    DateOfBirth,
    Languages,
    MobileNumber,
    IsMobileVerified,
    Resume,
    ProfilePicture,
    Bio,
    Awards,
    PhoneNumber,
    Email,
    Clinics,
    HighestDegree,
    University,
    MedicalLicenseNumber,
    IssuingAuthority,
    LicenseDocument,
    LicenseExpiryDate,
    Speciality,
    Services,
    CustomServices,
    ClinicAvailability,
    OnlineConsultationHours,
    ClinicVisitCharges,
    OnlineConsultationCharges,
    PaymentMethods,
}

impl FieldId {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::Languages => "languages",
            FieldId::MobileNumber => "mobileNumber",
            FieldId::IsMobileVerified => "isMobileVerified",
            FieldId::Resume => "resume",
            FieldId::ProfilePicture => "profilePicture",
            FieldId::Bio => "bio",
            FieldId::Awards => "awards",
            FieldId::PhoneNumber => "phoneNumber",
            FieldId::Email => "email",
            FieldId::Clinics => "clinics",
            FieldId::HighestDegree => "highestDegree",
            FieldId::University => "university",
            FieldId::MedicalLicenseNumber => "medicalLicenseNumber",
            FieldId::IssuingAuthority => "issuingAuthority",
            FieldId::LicenseDocument => "licenseDocument",
            FieldId::LicenseExpiryDate => "licenseExpiryDate",
            FieldId::Speciality => "speciality",
            FieldId::Services => "services",
            FieldId::CustomServices => "customServices",
            FieldId::ClinicAvailability => "clinicAvailability",
            FieldId::OnlineConsultationHours => "onlineConsultationHours",
            FieldId::ClinicVisitCharges => "clinicVisitCharges",
            FieldId::OnlineConsultationCharges => "onlineConsultationCharges",
            FieldId::PaymentMethods => "paymentMethods",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub step: Step,
    pub valid: bool,
    pub missing_fields: Vec<FieldId>,
}

impl ValidationResult {
    pub fn from_missing(step: Step, missing_fields: Vec<FieldId>) -> Self {
        Self {
            step,
            valid: missing_fields.is_empty(),
            missing_fields,
        }
    }

    pub fn is_missing(&self, field: FieldId) -> bool {
        self.missing_fields.contains(&field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbering_round_trips() {
        for step in Step::ALL {
            assert_eq!(Step::from_number(step.number()), Some(step));
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(8), None);
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::DoctorDetails.previous(), None);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut draft = RegistrationDraft {
            first_name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            ..Default::default()
        };

        let changed = DraftPatch {
            last_name: Some("Rao".to_string()),
            ..Default::default()
        }
        .apply_to(&mut draft);

        assert_eq!(changed, vec![FieldId::LastName]);
        assert_eq!(draft.first_name, "Asha");
        assert_eq!(draft.last_name, "Rao");
        assert_eq!(draft.email, "asha@example.com");
    }

    #[test]
    fn test_patch_can_clear_file_fields() {
        let mut draft = RegistrationDraft {
            resume: Some(FileHandle::new("cv.pdf", 2048)),
            ..Default::default()
        };
        DraftPatch {
            resume: Some(None),
            ..Default::default()
        }
        .apply_to(&mut draft);
        assert!(draft.resume.is_none());
    }

    #[test]
    fn test_patch_json_distinguishes_null_from_absent() {
        let patch: DraftPatch =
            serde_json::from_str(r#"{"resume": null, "firstName": "Ravi"}"#).unwrap();
        assert_eq!(patch.resume, Some(None));
        assert_eq!(patch.profile_picture, None);
        assert_eq!(patch.first_name.as_deref(), Some("Ravi"));
    }

    #[test]
    fn test_file_size_rounds_to_kb() {
        assert_eq!(FileHandle::new("a.pdf", 1536).size_kb(), 2);
        assert_eq!(FileHandle::new("a.pdf", 1535).size_kb(), 1);
        assert_eq!(FileHandle::new("a.pdf", 0).size_kb(), 0);
    }

    #[test]
    fn test_draft_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(RegistrationDraft::default()).unwrap();
        assert!(json.get("isMobileVerified").is_some());
        assert!(json.get("onlineConsultationHours").is_some());
    }
}
