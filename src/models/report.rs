//! 评分报告模型

use serde::Serialize;

use crate::models::FeedbackRecord;
use crate::presenter::Histogram;

/// 一次评分的完整结果，交给展示层渲染
#[derive(Debug, Clone, Serialize)]
pub struct GradingReport {
    /// 与提取顺序一致的反馈记录
    pub records: Vec<FeedbackRecord>,
    /// 分数分布
    pub histogram: Histogram,
    /// 模型调用失败的数量
    pub failed: usize,
}

impl GradingReport {
    pub fn new(records: Vec<FeedbackRecord>, bins: usize, failed: usize) -> Self {
        let scores: Vec<u64> = records.iter().map(|r| r.score).collect();
        Self {
            histogram: Histogram::from_scores(&scores, bins),
            records,
            failed,
        }
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.len() - self.failed
    }

    /// 平均分，没有记录时返回 None
    pub fn mean_score(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: f64 = self.records.iter().map(|r| r.score as f64).sum();
        Some(sum / self.records.len() as f64)
    }
}
