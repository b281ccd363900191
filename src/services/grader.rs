//! 评分服务 - 业务能力层
//!
//! 只负责"给一份作答打分"，不关心有多少学生、结果如何展示

use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{AnswerRecord, GradeFailure, GradeOutcome};
use crate::services::llm_service::ChatModel;
use crate::services::score_parser::{parse_score, ScoreParseMode};

/// 构建评分提示词
///
/// 固定结构：教师角色 → 评分标准 → 学生作答 → 要求（分数、建议、鼓励）
pub fn build_prompt(rubric: &str, answer: &str) -> String {
    format!(
        "Act as a qualified teacher.\n\
Here is the rubric or model answer:\n\
\n\
{rubric}\n\
\n\
Evaluate the following student answer:\n\
\n\
Student Answer: {answer}\n\
Provide: \n\
1. A score out of 10. \n\
2. Personalized feedback with suggestions. \n\
3. Positive reinforcement for good parts."
    )
}

/// 评分服务
///
/// 每份作答一次单轮请求；调用失败不重试，直接记为失败结果
pub struct Grader {
    model: Arc<dyn ChatModel>,
    score_mode: ScoreParseMode,
}

impl Grader {
    pub fn new(model: Arc<dyn ChatModel>, score_mode: ScoreParseMode) -> Self {
        Self { model, score_mode }
    }

    /// 为一份作答评分
    pub async fn grade(&self, rubric: &str, entry: &AnswerRecord) -> GradeOutcome {
        let prompt = build_prompt(rubric, &entry.answer);
        debug!(
            "评分请求: {} (模型: {}, 提示词 {} 字符)",
            entry.student_name,
            self.model.model_name(),
            prompt.len()
        );

        match self.model.complete(&prompt, None).await {
            Ok(reply) => {
                let score = parse_score(&reply, self.score_mode);
                GradeOutcome::Graded { reply, score }
            }
            Err(e) => {
                warn!("[{}] 评分失败: {}", entry.student_name, e);
                GradeOutcome::Failed(GradeFailure::ModelCall(e))
            }
        }
    }
}
