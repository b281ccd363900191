//! # SmartGrader
//!
//! 一个用 LLM 为学生作答自动评分并给出反馈的 Rust 命令行工具
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份作答
//! - `extractor` - CSV / PDF / 图片 → 作答记录
//! - `LlmService` - OpenAI 兼容接口调用（评分 + 手写识别）
//! - `Grader` - 构建提示词并评分
//! - `score_parser` - 从自由文本中解析分数
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一次评分"的完整流程
//! - `GradingFlow` - 流程编排（提取 → 评分 → 汇总）
//!
//! ### ③ 展示层（Presenter）
//! - `presenter/` - 表格、直方图、CSV 导出，不持有业务状态
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 读取输入、登录校验、调用流程、展示结果
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod presenter;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerRecord, FeedbackRecord, GradingReport, GradingRequest, UploadKind};
pub use orchestrator::App;
pub use workflow::{FlowOptions, GradingFlow};
