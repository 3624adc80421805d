use crate::core::{FileHandle, ResumeParser};

pub const PLACEHOLDER_BIO: &str = "Experienced medical professional with extensive background in patient care and clinical excellence. Dedicated to providing comprehensive healthcare services with a focus on patient-centered approach.";

/// Ignores the file content and always yields the same biography.
#[derive(Debug, Clone)]
pub struct PlaceholderResumeParser {
    bio: String,
}

impl PlaceholderResumeParser {
    pub fn new(bio: impl Into<String>) -> Self {
        Self { bio: bio.into() }
    }
}

impl Default for PlaceholderResumeParser {
    fn default() -> Self {
        Self::new(PLACEHOLDER_BIO)
    }
}

impl ResumeParser for PlaceholderResumeParser {
    fn extract_bio(&self, resume: &FileHandle) -> String {
        tracing::debug!("Filling bio from resume {} ({} KB)", resume.name, resume.size_kb());
        self.bio.clone()
    }
}
