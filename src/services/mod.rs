pub mod auth;
pub mod extractor;
pub mod grader;
pub mod llm_service;
pub mod ocr_service;
pub mod score_parser;

pub use auth::LoginGate;
pub use grader::Grader;
pub use llm_service::{ChatModel, LlmService};
pub use ocr_service::HandwritingReader;
pub use score_parser::{parse_score, ScoreParseMode};
