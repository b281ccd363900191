//! 评分流程 - 流程层
//!
//! 核心职责：定义"一次评分"的完整处理流程
//!
//! 流程顺序：
//! 1. 提取作答（CSV / PDF / 图片）
//! 2. 逐个学生调用模型评分（严格串行）
//! 3. 解析分数，汇总为 [`GradingReport`]
//!
//! 输入提取失败会中止整个流程，此时不会发出任何评分请求；
//! 单个学生评分失败只会让该学生记 0 分，流程继续。

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{GradeOutcome, GradingReport, GradingRequest};
use crate::services::extractor;
use crate::services::{ChatModel, Grader, HandwritingReader, ScoreParseMode};
use crate::utils::logging::truncate_text;
use crate::workflow::student_ctx::StudentCtx;

/// 流程参数
#[derive(Debug, Clone, Copy)]
pub struct FlowOptions {
    pub score_mode: ScoreParseMode,
    pub histogram_bins: usize,
}

impl FlowOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            score_mode: config.score_parse_mode,
            histogram_bins: config.histogram_bins,
        }
    }
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 评分流程
///
/// - 不持有任何请求状态，同一个实例可以反复调用 [`GradingFlow::run`]
/// - 只依赖业务能力（services）
pub struct GradingFlow {
    grader: Grader,
    reader: Arc<dyn HandwritingReader>,
    histogram_bins: usize,
}

impl GradingFlow {
    pub fn new(
        model: Arc<dyn ChatModel>,
        reader: Arc<dyn HandwritingReader>,
        options: FlowOptions,
    ) -> Self {
        Self {
            grader: Grader::new(model, options.score_mode),
            reader,
            histogram_bins: options.histogram_bins,
        }
    }

    /// 执行一次完整评分
    pub async fn run(&self, request: &GradingRequest) -> AppResult<GradingReport> {
        let entries = extractor::extract_answers(request, self.reader.as_ref()).await?;

        let total = entries.len();
        info!("🔍 开始评分，共 {} 份作答", total);

        let mut records = Vec::with_capacity(total);
        let mut failed = 0;

        for (idx, entry) in entries.iter().enumerate() {
            let ctx = StudentCtx::new(idx + 1, total, &entry.student_name);
            info!("{} 作答: {}", ctx, truncate_text(&entry.answer, 40));

            let outcome = self.grader.grade(request.rubric(), entry).await;
            match &outcome {
                GradeOutcome::Graded { score, .. } => info!("{} ✓ 得分 {}", ctx, score),
                GradeOutcome::Failed(_) => {
                    info!("{} ❌ 评分失败，记 0 分", ctx);
                    failed += 1;
                }
            }
            records.push(outcome.into_feedback(entry));
        }

        Ok(GradingReport::new(records, self.histogram_bins, failed))
    }
}
