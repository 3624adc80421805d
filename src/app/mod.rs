// Application layer: drives sessions from external input.

pub mod script;

pub use script::{ReplayReport, ScriptRunner, SessionScript};
