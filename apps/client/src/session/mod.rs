pub mod draft;

pub use draft::{ResumeFile, SessionDraft, SharedDraft};
