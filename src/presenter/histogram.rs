//! 分数直方图
//!
//! 分箱覆盖 `[最低分, 最高分]`，最后一个分箱右侧闭合。
//! 所有分数相同时使用 `[v - 0.5, v + 0.5]`。

use serde::Serialize;

/// 直方图最长柱的字符宽度
const BAR_WIDTH: usize = 40;

/// 单个分箱
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// 分数分布
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// 按固定分箱数统计分数
    pub fn from_scores(scores: &[u64], bin_count: usize) -> Self {
        if scores.is_empty() || bin_count == 0 {
            return Self { bins: Vec::new() };
        }

        let min = scores.iter().copied().min().unwrap_or_default() as f64;
        let max = scores.iter().copied().max().unwrap_or_default() as f64;
        let (lower, upper) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (upper - lower) / bin_count as f64;

        let mut bins: Vec<Bin> = (0..bin_count)
            .map(|i| Bin {
                lower: lower + width * i as f64,
                upper: if i + 1 == bin_count {
                    upper
                } else {
                    lower + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &score in scores {
            let offset = (score as f64 - lower) / width;
            let index = (offset.floor().max(0.0) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// 渲染为终端文本
    pub fn render(&self) -> String {
        if self.bins.is_empty() {
            return "(没有可统计的分数)\n".to_string();
        }

        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        let last = self.bins.len() - 1;
        let mut out = String::new();
        for (i, bin) in self.bins.iter().enumerate() {
            let bar_len = bin.count * BAR_WIDTH / peak;
            let closing = if i == last { ']' } else { ')' };
            out.push_str(&format!(
                "[{:>7.2}, {:>7.2}{} | {:<width$} {}\n",
                bin.lower,
                bin.upper,
                closing,
                "█".repeat(bar_len),
                bin.count,
                width = BAR_WIDTH
            ));
        }
        out
    }
}
