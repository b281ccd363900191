//! 命令行参数

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::UploadKind;

/// SmartGrader: AI 评分助手
#[derive(Debug, Parser)]
#[command(name = "smart-grader", version, about = "AI-powered grading assistant for teachers")]
pub struct Cli {
    /// TOML 配置文件路径
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 为上传的学生作答评分
    Grade(GradeArgs),
    /// 生成示例 CSV
    Sample(SampleArgs),
}

/// `grade` 子命令参数
#[derive(Debug, Clone, Args)]
pub struct GradeArgs {
    /// 评分标准或参考答案文件
    #[arg(long, conflicts_with = "rubric_text", required_unless_present = "rubric_text")]
    pub rubric: Option<PathBuf>,

    /// 直接给出评分标准文本
    #[arg(long)]
    pub rubric_text: Option<String>,

    /// 学生作答文件（CSV / PDF / PNG / JPEG）
    #[arg(long)]
    pub input: PathBuf,

    /// 上传类型，缺省时按扩展名判断
    #[arg(long)]
    pub kind: Option<UploadKind>,

    /// 反馈 CSV 输出目录（覆盖配置）
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// 教师密码
    #[arg(long, env = "SMART_GRADER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// 以 JSON 输出完整报告
    #[arg(long)]
    pub json: bool,
}

/// `sample` 子命令参数
#[derive(Debug, Clone, Args)]
pub struct SampleArgs {
    /// 输出目录（覆盖配置）
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
