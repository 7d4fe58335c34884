pub mod pipeline;

pub use pipeline::{assemble, validate, PendingSubmission, SubmissionOutcome, SubmissionRequest};
