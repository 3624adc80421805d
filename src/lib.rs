pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::WizardConfig;

pub use crate::core::{
    session::{DefaultSession, NextOutcome, RegistrationSession},
    store::FormStateStore,
};
pub use app::{ReplayReport, ScriptRunner, SessionScript};
pub use utils::error::{RegistrationError, Result};
