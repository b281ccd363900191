//! 学生评分上下文
//!
//! 封装"我正在给第几个学生评分"这一信息

use std::fmt::Display;

/// 学生评分上下文（仅用于日志）
#[derive(Debug, Clone)]
pub struct StudentCtx {
    /// 序号（从1开始）
    pub index: usize,
    /// 本次评分的学生总数
    pub total: usize,
    /// 学生姓名
    pub student_name: String,
}

impl StudentCtx {
    pub fn new(index: usize, total: usize, student_name: impl Into<String>) -> Self {
        Self {
            index,
            total,
            student_name: student_name.into(),
        }
    }
}

impl Display for StudentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[学生 {}/{} {}]", self.index, self.total, self.student_name)
    }
}
