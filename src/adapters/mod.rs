// Adapters layer: default stand-ins for the external capabilities (OTP, submission, resume parsing).

pub mod otp;
pub mod resume;
pub mod submission;

pub use otp::FixedCodeOtpVerifier;
pub use resume::PlaceholderResumeParser;
pub use submission::SimulatedSubmissionService;
