//! 评分记录模型

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// 学生作答记录
///
/// 由提取阶段产生，之后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub student_name: String,
    pub answer: String,
}

impl AnswerRecord {
    pub fn new(student_name: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            student_name: student_name.into(),
            answer: answer.into(),
        }
    }
}

/// 评分反馈记录，对应导出 CSV 的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "Student Name")]
    pub student_name: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "Score")]
    pub score: u64,
    #[serde(rename = "Feedback")]
    pub feedback: String,
}

/// 单个学生评分失败的原因
#[derive(Debug)]
pub enum GradeFailure {
    /// 模型调用失败
    ModelCall(LlmError),
}

impl std::fmt::Display for GradeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeFailure::ModelCall(e) => write!(f, "{}", e),
        }
    }
}

/// 单个学生的评分结果
#[derive(Debug)]
pub enum GradeOutcome {
    /// 模型成功返回
    Graded { reply: String, score: u64 },
    /// 调用失败，记 0 分
    Failed(GradeFailure),
}

impl GradeOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, GradeOutcome::Failed(_))
    }

    /// 转换为反馈记录
    ///
    /// 失败结果的反馈文本以 `Error:` 开头，分数为 0
    pub fn into_feedback(self, entry: &AnswerRecord) -> FeedbackRecord {
        let (score, feedback) = match self {
            GradeOutcome::Graded { reply, score } => (score, reply),
            GradeOutcome::Failed(failure) => (0, format!("Error: {}", failure)),
        };
        FeedbackRecord {
            student_name: entry.student_name.clone(),
            answer: entry.answer.clone(),
            score,
            feedback,
        }
    }
}
