//! 反馈表格渲染

use crate::models::FeedbackRecord;
use crate::utils::logging::truncate_text;

const NAME_WIDTH: usize = 20;
const ANSWER_WIDTH: usize = 36;
const FEEDBACK_WIDTH: usize = 56;

/// 把多行文本压成一行预览
fn preview(text: &str, max_len: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_text(&flat, max_len)
}

/// 渲染反馈表格
pub fn render_table(records: &[FeedbackRecord]) -> String {
    let header = format!(
        "{:>3} | {:<nw$} | {:>5} | {:<aw$} | {}",
        "#",
        "Student Name",
        "Score",
        "Answer",
        "Feedback",
        nw = NAME_WIDTH,
        aw = ANSWER_WIDTH + 3,
    );
    let rule = "─".repeat(header.chars().count().max(NAME_WIDTH + ANSWER_WIDTH + FEEDBACK_WIDTH));

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for (idx, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} | {:<nw$} | {:>5} | {:<aw$} | {}\n",
            idx + 1,
            preview(&record.student_name, NAME_WIDTH),
            record.score,
            preview(&record.answer, ANSWER_WIDTH),
            preview(&record.feedback, FEEDBACK_WIDTH),
            nw = NAME_WIDTH,
            aw = ANSWER_WIDTH + 3,
        ));
    }
    out
}
