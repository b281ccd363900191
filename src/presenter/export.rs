//! 反馈 CSV 导出
//!
//! 表头固定为 `Student Name,Answer,Score,Feedback`，文件名带当天日期。

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{AppError, AppResult, FileError};
use crate::models::FeedbackRecord;

/// 示例 CSV 文件名
pub const SAMPLE_FILE_NAME: &str = "sample_responses.csv";

/// 示例 CSV 内容
pub const SAMPLE_CSV: &str = "Student Name,Answer\n\
John Doe,Photosynthesis is the process by which green plants make food using sunlight.\n\
Jane Smith,It is how plants use sunlight to convert carbon dioxide and water into glucose.\n";

/// 反馈文件名，如 `student_feedback_20241019.csv`
pub fn feedback_file_name(date: NaiveDate) -> String {
    format!("student_feedback_{}.csv", date.format("%Y%m%d"))
}

/// 将反馈记录写为 CSV
pub fn write_feedback_csv<W: Write>(writer: W, records: &[FeedbackRecord]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if records.is_empty() {
        wtr.write_record(["Student Name", "Answer", "Score", "Feedback"])?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// 从 CSV 读回反馈记录
pub fn read_feedback_csv<R: Read>(reader: R) -> csv::Result<Vec<FeedbackRecord>> {
    csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<csv::Result<Vec<FeedbackRecord>>>()
}

/// 把反馈记录保存到输出目录，返回文件路径
pub fn save_feedback(output_dir: &Path, records: &[FeedbackRecord], date: NaiveDate) -> AppResult<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| AppError::file_write_failed(output_dir.display().to_string(), e))?;

    let path = output_dir.join(feedback_file_name(date));
    let file = std::fs::File::create(&path)
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    write_feedback_csv(file, records).map_err(|source| FileError::CsvWriteFailed {
        path: path.display().to_string(),
        source,
    })?;

    info!("📥 反馈已导出: {}", path.display());
    Ok(path)
}

/// 写出示例 CSV，返回文件路径
pub fn write_sample(output_dir: &Path) -> AppResult<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| AppError::file_write_failed(output_dir.display().to_string(), e))?;

    let path = output_dir.join(SAMPLE_FILE_NAME);
    std::fs::write(&path, SAMPLE_CSV)
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    info!("📄 示例 CSV 已生成: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FeedbackRecord> {
        vec![
            FeedbackRecord {
                student_name: "John Doe".to_string(),
                answer: "Plants make food, using \"sunlight\".".to_string(),
                score: 8,
                feedback: "Score: 8\n\nGood use of terms, add chlorophyll.".to_string(),
            },
            FeedbackRecord {
                student_name: "Jane Smith".to_string(),
                answer: "CO2 + water -> glucose".to_string(),
                score: 0,
                feedback: "Error: LLM API 调用失败".to_string(),
            },
        ]
    }

    #[test]
    fn test_file_name_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(feedback_file_name(date), "student_feedback_20240307.csv");
    }

    #[test]
    fn test_header_matches_output_format() {
        let mut buf = Vec::new();
        write_feedback_csv(&mut buf, &records()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Student Name,Answer,Score,Feedback\n"));
    }

    #[test]
    fn test_written_csv_reads_back_same_records() {
        let original = records();
        let mut buf = Vec::new();
        write_feedback_csv(&mut buf, &original).unwrap();
        let restored = read_feedback_csv(buf.as_slice()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_empty_report_still_has_header() {
        let mut buf = Vec::new();
        write_feedback_csv(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Student Name,Answer,Score,Feedback\n");
    }

    #[test]
    fn test_save_feedback_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let path = save_feedback(&dir.path().join("out"), &records(), date).unwrap();
        assert!(path.ends_with("student_feedback_20250102.csv"));
        let restored = read_feedback_csv(std::fs::File::open(path).unwrap()).unwrap();
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_sample_has_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Student Name,Answer\n"));
        assert_eq!(content.lines().count(), 3);
    }
}
