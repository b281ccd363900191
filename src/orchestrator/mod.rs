//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (读取输入 / 展示结果)
//!     ↓
//! workflow::GradingFlow (提取 → 逐个评分 → 汇总)
//!     ↓
//! services (能力层：extractor / grader / llm / ocr / score_parser)
//! ```

pub mod app;

pub use app::{render_report, App, GradeOutput};
