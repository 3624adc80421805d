//! Selectable options offered by the registration screens.

use crate::domain::model::FieldId;

pub const LANGUAGES: &[&str] = &[
    "English", "Hindi", "Tamil", "Telugu", "Marathi", "Bengali", "Gujarati", "Kannada",
    "Malayalam", "Punjabi", "Urdu", "Odia", "Assamese",
];

pub const DEGREES: &[&str] = &[
    "MBBS",
    "MD",
    "MS",
    "MCh",
    "DM",
    "DNB",
    "BHMS",
    "BAMS",
    "BDS",
    "MDS",
    "BPT",
    "MPT",
    "BSc Nursing",
    "MSc Nursing",
    "Other",
];

pub const UNIVERSITIES: &[&str] = &[
    "All Institute of Medical Sciences (AIIMS)",
    "Maulana Azad Medical College",
    "King George Medical University",
    "Jawaharlal Institute of Postgraduate Medical Education and Research",
    "Christian Medical College",
    "Armed Forces Medical College",
    "Bangalore Medical College and Research Institute",
    "Government Medical College",
    "Sri Ramachandra Institute of Higher Education and Research",
    "Kasturba Medical College",
    "Madras Medical College",
    "Grant Medical College",
    "Seth Gordhandas Sunderdas Medical College",
    "University College of Medical Sciences",
    "Lady Hardinge Medical College",
    "Vardhman Mahavir Medical College",
    "Topiwala National Medical College",
    "Lokmanya Tilak Municipal Medical College",
    "Rajiv Gandhi University of Health Sciences",
    "Maharashtra University of Health Sciences",
];

pub const ISSUING_AUTHORITIES: &[&str] = &[
    "Medical Council of India (MCI)",
    "National Medical Commission (NMC)",
    "State Medical Council",
    "Dental Council of India",
    "Central Council of Homoeopathy",
    "Central Council of Indian Medicine",
    "Indian Association of Physiotherapists",
    "Nursing Council of India",
    "Other",
];

/// Speciality name paired with its standard services.
pub const SPECIALITIES: &[(&str, &[&str])] = &[
    (
        "Cardiology",
        &[
            "ECG",
            "Echocardiography",
            "Stress Testing",
            "Heart Surgery Consultation",
            "Arrhythmia Treatment",
            "Heart Disease Prevention",
            "Cholesterol Management",
        ],
    ),
    (
        "Dermatology",
        &[
            "Acne Treatment",
            "Skin Cancer Screening",
            "Mole Removal",
            "Laser Therapy",
            "Anti-aging Treatments",
            "Psoriasis Treatment",
            "Eczema Management",
        ],
    ),
    (
        "Neurology",
        &[
            "Migraine Treatment",
            "Epilepsy Management",
            "Stroke Care",
            "Memory Disorders",
            "Parkinson Disease Treatment",
            "Multiple Sclerosis Care",
            "Nerve Disorders",
        ],
    ),
    (
        "Orthopedics",
        &[
            "Joint Replacement",
            "Fracture Treatment",
            "Sports Injury",
            "Arthritis Care",
            "Spine Surgery",
            "Physical Therapy",
            "Pain Management",
        ],
    ),
    (
        "Pediatrics",
        &[
            "Child Health Checkups",
            "Vaccination",
            "Growth Monitoring",
            "Developmental Assessment",
            "Childhood Infections",
            "Nutrition Counseling",
            "Behavioral Issues",
        ],
    ),
    (
        "Psychiatry",
        &[
            "Depression Treatment",
            "Anxiety Therapy",
            "Counseling",
            "Medication Management",
            "Addiction Treatment",
            "Stress Management",
            "Trauma Therapy",
        ],
    ),
    (
        "General Medicine",
        &[
            "Routine Checkups",
            "Diabetes Management",
            "Hypertension Treatment",
            "Preventive Care",
            "Health Screening",
            "Minor Procedures",
            "Chronic Disease Management",
        ],
    ),
    (
        "Gynecology",
        &[
            "Prenatal Care",
            "Family Planning",
            "Menstrual Disorders",
            "Fertility Treatment",
            "Gynecological Surgery",
            "Menopause Management",
            "Cancer Screening",
        ],
    ),
    (
        "ENT",
        &[
            "Hearing Tests",
            "Sinus Treatment",
            "Throat Surgery",
            "Voice Disorders",
            "Sleep Apnea Treatment",
            "Allergy Management",
            "Ear Infections",
        ],
    ),
    (
        "Ophthalmology",
        &[
            "Eye Exams",
            "Cataract Surgery",
            "Glaucoma Treatment",
            "Retinal Disorders",
            "LASIK Surgery",
            "Diabetic Eye Care",
            "Contact Lens Fitting",
        ],
    ),
    (
        "Dentistry",
        &[
            "Dental Checkups",
            "Teeth Cleaning",
            "Fillings",
            "Root Canal Treatment",
            "Orthodontics",
            "Cosmetic Dentistry",
            "Oral Surgery",
        ],
    ),
    (
        "Urology",
        &[
            "Kidney Stone Treatment",
            "Prostate Care",
            "Bladder Disorders",
            "Male Infertility",
            "Urinary Tract Infections",
            "Minimally Invasive Surgery",
            "Cancer Treatment",
        ],
    ),
    (
        "Gastroenterology",
        &[
            "Endoscopy",
            "Colonoscopy",
            "Liver Disease Treatment",
            "Digestive Disorders",
            "IBD Management",
            "Acid Reflux Treatment",
            "Nutritional Counseling",
        ],
    ),
    (
        "Pulmonology",
        &[
            "Asthma Treatment",
            "COPD Management",
            "Sleep Studies",
            "Lung Function Tests",
            "Bronchoscopy",
            "Respiratory Infections",
            "Smoking Cessation",
        ],
    ),
    (
        "Oncology",
        &[
            "Cancer Screening",
            "Chemotherapy",
            "Radiation Therapy",
            "Immunotherapy",
            "Palliative Care",
            "Clinical Trials",
            "Genetic Counseling",
        ],
    ),
    (
        "Radiology",
        &[
            "X-rays",
            "MRI Scans",
            "CT Scans",
            "Ultrasound",
            "Mammography",
            "Nuclear Medicine",
            "Interventional Procedures",
        ],
    ),
    (
        "Anesthesiology",
        &[
            "Surgical Anesthesia",
            "Pain Management",
            "Critical Care",
            "Regional Blocks",
            "Sedation",
            "Post-operative Care",
            "Chronic Pain Treatment",
        ],
    ),
    (
        "Emergency Medicine",
        &[
            "Trauma Care",
            "Emergency Surgery",
            "Critical Care",
            "Poison Treatment",
            "Cardiac Emergencies",
            "Respiratory Emergencies",
            "Wound Care",
        ],
    ),
    (
        "Pathology",
        &[
            "Laboratory Tests",
            "Biopsy Analysis",
            "Blood Tests",
            "Tissue Examination",
            "Autopsy",
            "Molecular Diagnostics",
            "Cytology",
        ],
    ),
    (
        "Physical Medicine",
        &[
            "Rehabilitation",
            "Physical Therapy",
            "Occupational Therapy",
            "Pain Management",
            "Sports Medicine",
            "Injury Recovery",
            "Mobility Training",
        ],
    ),
];

/// Half-hour slots offered for work, break and online hours.
pub const TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00", "18:30",
    "19:00", "19:30", "20:00", "20:30",
];

pub fn speciality_names() -> impl Iterator<Item = &'static str> {
    SPECIALITIES.iter().map(|(name, _)| *name)
}

/// Standard services of a speciality; empty for unknown names.
pub fn services_for(speciality: &str) -> &'static [&'static str] {
    SPECIALITIES
        .iter()
        .find(|(name, _)| *name == speciality)
        .map(|(_, services)| *services)
        .unwrap_or(&[])
}

/// Offered list that backs a free-text draft field, if any.
pub fn options_for(field: FieldId) -> Option<&'static [&'static str]> {
    match field {
        FieldId::Languages => Some(LANGUAGES),
        FieldId::HighestDegree => Some(DEGREES),
        FieldId::University => Some(UNIVERSITIES),
        FieldId::IssuingAuthority => Some(ISSUING_AUTHORITIES),
        _ => None,
    }
}

pub fn is_listed(options: &[&str], value: &str) -> bool {
    options.contains(&value)
}

pub fn is_time_slot(value: &str) -> bool {
    TIME_SLOTS.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_speciality_has_services() {
        assert_eq!(SPECIALITIES.len(), 20);
        for name in speciality_names() {
            assert_eq!(services_for(name).len(), 7, "{}", name);
        }
    }

    #[test]
    fn test_unknown_speciality_has_no_services() {
        assert!(services_for("Astrology").is_empty());
    }

    #[test]
    fn test_listed_options_per_field() {
        let degrees = options_for(FieldId::HighestDegree).unwrap();
        assert!(is_listed(degrees, "MD"));
        assert!(!is_listed(degrees, "PhD in Astrology"));
        assert!(is_listed(options_for(FieldId::Languages).unwrap(), "English"));
        assert!(options_for(FieldId::Email).is_none());
    }

    #[test]
    fn test_time_slots() {
        assert_eq!(TIME_SLOTS.len(), 24);
        assert!(is_time_slot("13:30"));
        assert!(!is_time_slot("21:00"));
    }
}
