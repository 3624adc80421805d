use clap::Parser;
use doctor_registration::utils::error::{ErrorSeverity, RegistrationError};
use doctor_registration::utils::{logger, validation::Validate};
use doctor_registration::{CliConfig, DefaultSession, ReplayReport, ScriptRunner, SessionScript};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting doctor-registration replay");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Replay failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), RegistrationError> {
    let config = cli.load_wizard_config()?;
    config.validate()?;

    let script = SessionScript::from_file(&cli.script)?;
    tracing::info!("📁 Loaded {} actions from {}", script.actions.len(), cli.script);

    let mut session = DefaultSession::from_config(&config);
    let report = ScriptRunner::new(&mut session).run(&script).await?;

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &ReplayReport) {
    println!(
        "📋 Finished at {} ({}% complete)",
        report.final_step, report.progress_percent
    );
    for result in &report.validation {
        let missing: Vec<&str> = result.missing_fields.iter().map(|f| f.as_str()).collect();
        if result.valid {
            println!("  ✅ {}", result.step);
        } else {
            println!("  ⛔ {} missing: {}", result.step, missing.join(", "));
        }
    }

    let blocked = report.blocked_events().count();
    if blocked > 0 {
        println!("  {} \"Next\" presses were blocked", blocked);
    }

    println!();
    for line in report.review.to_lines() {
        println!("{}", line);
    }

    if let Some(receipt) = &report.receipt {
        println!();
        println!("✅ {}", receipt.message);
        println!("🧾 Reference: {}", receipt.reference);
    }
}
