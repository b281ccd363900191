//! 展示层
//!
//! 只负责把 [`GradingReport`](crate::models::GradingReport) 变成终端输出和 CSV 文件，
//! 不持有任何业务状态。

pub mod export;
pub mod histogram;
pub mod table;

pub use export::{feedback_file_name, read_feedback_csv, save_feedback, write_feedback_csv, write_sample};
pub use histogram::{Bin, Histogram};
pub use table::render_table;
