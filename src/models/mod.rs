pub mod record;
pub mod report;
pub mod request;

pub use record::{AnswerRecord, FeedbackRecord, GradeFailure, GradeOutcome};
pub use report::GradingReport;
pub use request::{GradingRequest, UploadKind};
