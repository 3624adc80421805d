pub mod toml_config;

pub use toml_config::WizardConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-registration")]
#[command(about = "Replay a doctor registration wizard session and report step validity")]
pub struct CliConfig {
    /// Path to the session script (TOML)
    #[arg(short, long)]
    pub script: String,

    /// Path to the wizard configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the full replay report as JSON
    #[arg(long)]
    pub report: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_wizard_config(&self) -> crate::utils::error::Result<WizardConfig> {
        match &self.config {
            Some(path) => WizardConfig::from_file(path),
            None => Ok(WizardConfig::default()),
        }
    }
}
