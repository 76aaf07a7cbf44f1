//! Review submission: validate a payload, then persist a new user and their
//! review in one transaction.

mod submission;
mod workflow;

pub use submission::{
    NumericInput, ReviewSubmission, ReviewSummary, SubmissionDraft, SubmissionField,
    SubmissionValidationError,
};
pub use workflow::{ReviewSubmissionError, ReviewSubmissionWorkflow, SubmissionStage};
