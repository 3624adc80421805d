use anyhow::Result;
use doctor_registration::app::script::EventOutcome;
use doctor_registration::core::{FieldId, Step};
use doctor_registration::utils::validation::Validate;
use doctor_registration::{DefaultSession, ScriptRunner, SessionScript, WizardConfig};
use tempfile::TempDir;

const INSTANT_CONFIG: &str = r#"
[otp]
send_delay_ms = 0

[submission]
delay_ms = 0
"#;

const FULL_SCRIPT: &str = r#"
[[actions]]
action = "set"
[actions.patch]
firstName = "Meera"
lastName = "Iyer"
dateOfBirth = "1985-04-12"
mobileNumber = "9876543210"
languages = ["English"]

[[actions]]
action = "attach_resume"
file = { name = "cv.pdf", sizeBytes = 150000 }

[[actions]]
action = "next"

[[actions]]
action = "send_otp"

[[actions]]
action = "verify_otp"
code = "000000"

[[actions]]
action = "verify_otp"
code = "123456"

[[actions]]
action = "next"

[[actions]]
action = "set"
patch = { email = "meera@example.com" }

[[actions]]
action = "add_clinic"
name = "City Clinic"
address = "12 Main St"

[[actions]]
action = "next"

[[actions]]
action = "goto"
step = 5

[[actions]]
action = "clinic_day"
clinic = 0
day = "Tuesday"
field = { is_working = true }

[[actions]]
action = "online_day"
day = "Saturday"
field = { is_available = true }

[[actions]]
action = "goto"
step = 6

[[actions]]
action = "set"
patch = { clinicVisitCharges = 500, onlineConsultationCharges = 300 }

[[actions]]
action = "toggle_payment_method"
method = "gpay"

[[actions]]
action = "next"

[[actions]]
action = "submit"
"#;

async fn replay(config: &str, script: &str) -> Result<doctor_registration::ReplayReport> {
    let config = WizardConfig::from_toml_str(config)?;
    config.validate()?;
    let script = SessionScript::from_toml_str(script)?;
    let mut session = DefaultSession::from_config(&config);
    Ok(ScriptRunner::new(&mut session).run(&script).await?)
}

#[tokio::test]
async fn test_full_script_replay() -> Result<()> {
    let report = replay(INSTANT_CONFIG, FULL_SCRIPT).await?;

    assert_eq!(report.final_step, Step::Review);
    assert_eq!(report.progress_percent, 100);

    // First "next" is blocked until the mobile number is verified
    assert_eq!(
        report.events[2].outcome,
        EventOutcome::Blocked {
            missing: vec![FieldId::IsMobileVerified]
        }
    );
    assert!(matches!(
        report.events[4].outcome,
        EventOutcome::Rejected { .. }
    ));
    assert_eq!(report.events[6].outcome, EventOutcome::Moved { step: Step::ContactInfo });

    // Jumping past education and specialization is allowed, they stay invalid
    let invalid: Vec<Step> = report
        .validation
        .iter()
        .filter(|result| !result.valid)
        .map(|result| result.step)
        .collect();
    assert_eq!(invalid, vec![Step::Education, Step::Specialization]);

    assert!(matches!(
        report.events.last().map(|event| &event.outcome),
        Some(EventOutcome::Submitted { .. })
    ));
    assert!(report.receipt.is_some());
    assert_eq!(report.review.online_days, 1);
    assert_eq!(report.review.phone_number, "9876543210");
    assert_eq!(report.review.resume.as_ref().map(|r| r.size_kb), Some(146));
    Ok(())
}

#[tokio::test]
async fn test_guarded_double_submission_is_recorded() -> Result<()> {
    let config = r#"
[otp]
send_delay_ms = 0

[submission]
delay_ms = 0
guard_double_submission = true
"#;
    let script = r#"
[[actions]]
action = "submit"

[[actions]]
action = "submit"
"#;
    let report = replay(config, script).await?;

    assert!(matches!(report.events[0].outcome, EventOutcome::Submitted { .. }));
    assert!(matches!(report.events[1].outcome, EventOutcome::Rejected { .. }));
    Ok(())
}

#[tokio::test]
async fn test_contact_phone_follows_mobile_while_shown() -> Result<()> {
    let on_contact = r#"
[[actions]]
action = "set"
patch = { mobileNumber = "9876543210" }

[[actions]]
action = "goto"
step = 2

[[actions]]
action = "set"
patch = { phoneNumber = "" }
"#;
    let report = replay(INSTANT_CONFIG, on_contact).await?;
    assert_eq!(report.final_step, Step::ContactInfo);
    assert_eq!(report.review.phone_number, "9876543210");

    let after_contact = format!(
        "{}{}",
        on_contact,
        r#"
[[actions]]
action = "goto"
step = 3

[[actions]]
action = "set"
patch = { phoneNumber = "" }
"#
    );
    let report = replay(INSTANT_CONFIG, &after_contact).await?;

    // 離開聯絡步驟後不再自動帶入
    assert_eq!(report.final_step, Step::Education);
    assert_eq!(report.review.phone_number, "");
    Ok(())
}

#[tokio::test]
async fn test_off_slot_hours_are_ignored() -> Result<()> {
    let script = r#"
[[actions]]
action = "add_clinic"
name = "City Clinic"
address = "12 Main St"

[[actions]]
action = "clinic_day"
clinic = 0
day = "Monday"
field = { work_hours = { start = "25:99", end = "17:00" } }

[[actions]]
action = "online_day"
day = "Monday"
field = { hours = { start = "10:00", end = "12:00" } }
"#;
    let report = replay(INSTANT_CONFIG, script).await?;

    assert_eq!(report.events[1].outcome, EventOutcome::Ignored);
    assert_eq!(report.events[2].outcome, EventOutcome::Applied);
    assert!(report.review.clinic_availability.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_clinic_position_aborts_replay() -> Result<()> {
    let script = r#"
[[actions]]
action = "clinic_day"
clinic = 3
day = "Monday"
field = { is_working = true }
"#;
    let result = replay(INSTANT_CONFIG, script).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_script_and_config_from_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("wizard.toml");
    let script_path = temp_dir.path().join("session.toml");
    tokio::fs::write(&config_path, INSTANT_CONFIG).await?;
    tokio::fs::write(
        &script_path,
        r#"
[[actions]]
action = "goto"
step = 4

[[actions]]
action = "select_speciality"
speciality = "Dermatology"

[[actions]]
action = "add_custom_service"
service = "Tele-dermatology"

[[actions]]
action = "next"
"#,
    )
    .await?;

    let config = WizardConfig::from_file(&config_path)?;
    let script = SessionScript::from_file(&script_path)?;
    let mut session = DefaultSession::from_config(&config);
    let report = ScriptRunner::new(&mut session).run(&script).await?;

    assert_eq!(report.final_step, Step::Availability);
    assert_eq!(report.review.services, vec!["Tele-dermatology"]);

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["finalStep"], "availability");
    assert_eq!(json["events"][3]["outcome"], "moved");
    Ok(())
}
