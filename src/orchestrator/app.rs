//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、创建评分与手写识别服务
//! 2. **请求组装**：读取评分标准与上传文件，构造不可变的 [`GradingRequest`]
//! 3. **委托流程**：交给 [`GradingFlow`] 执行评分
//! 4. **结果展示**：表格 / JSON、分数直方图、导出 CSV
//!
//! 编排层不做任何评分判断，只负责调度与展示。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::{GradeArgs, SampleArgs};
use crate::config::Config;
use crate::error::{AppError, AppResult, InputError};
use crate::models::{GradingReport, GradingRequest, UploadKind};
use crate::presenter::{self, render_table};
use crate::services::{LlmService, LoginGate};
use crate::utils::logging;
use crate::workflow::{FlowOptions, GradingFlow};

/// 应用主结构
pub struct App {
    config: Config,
    gate: LoginGate,
    flow: GradingFlow,
}

/// 一次评分命令的产出
#[derive(Debug)]
pub struct GradeOutput {
    pub report: GradingReport,
    /// 导出的反馈 CSV 路径
    pub csv_path: PathBuf,
}

impl App {
    /// 初始化应用（使用真实的模型服务）
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        if config.llm_api_key.is_empty() {
            warn!("⚠️ 未设置 LLM_API_KEY / GEMINI_API_KEY，评分请求将会失败");
        }

        let grader = Arc::new(LlmService::new(&config));
        let reader = Arc::new(LlmService::with_model(&config, config.ocr_model_name.clone()));
        let flow = GradingFlow::new(grader, reader, FlowOptions::from_config(&config));

        Ok(Self::with_flow(config, flow))
    }

    /// 使用自定义流程创建应用
    pub fn with_flow(config: Config, flow: GradingFlow) -> Self {
        Self {
            gate: LoginGate::new(&config),
            config,
            flow,
        }
    }

    /// 执行 `grade` 命令
    pub async fn grade(&self, args: &GradeArgs) -> AppResult<GradeOutput> {
        self.gate.check(args.password.as_deref())?;

        let request = self.build_request(args)?;
        logging::log_startup(&self.config.llm_model_name, request.kind().name());

        let report = self.flow.run(&request).await?;
        info!("✅ 已为全部 {} 名学生生成反馈", report.total());

        println!("{}", render_report(&report, args.json)?);

        let output_dir = self.output_dir(args.output_dir.as_deref());
        let today = chrono::Local::now().date_naive();
        let csv_path = presenter::save_feedback(&output_dir, &report.records, today)?;

        logging::print_final_stats(&report);

        Ok(GradeOutput { report, csv_path })
    }

    /// 执行 `sample` 命令
    pub fn sample(&self, args: &SampleArgs) -> AppResult<PathBuf> {
        presenter::write_sample(&self.output_dir(args.output_dir.as_deref()))
    }

    /// 读取输入文件，组装评分请求
    fn build_request(&self, args: &GradeArgs) -> AppResult<GradingRequest> {
        let rubric = match (&args.rubric_text, &args.rubric) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => read_text(path)?,
            (None, None) => return Err(InputError::EmptyRubric.into()),
        };

        let kind = match args.kind {
            Some(kind) => kind,
            None => UploadKind::from_path(&args.input)
                .ok_or_else(|| InputError::UnknownKind(args.input.display().to_string()))?,
        };

        let bytes = std::fs::read(&args.input)
            .map_err(|e| AppError::file_read_failed(args.input.display().to_string(), e))?;
        info!("📁 已读取 {} ({} 字节)", args.input.display(), bytes.len());

        GradingRequest::new(rubric, kind, bytes)
    }

    fn output_dir(&self, overridden: Option<&Path>) -> PathBuf {
        overridden
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.config.output_dir))
    }
}

/// 渲染写到 stdout 的评分结果
///
/// `json` 为真时输出完整的 JSON 报告，否则输出表格和分数直方图
pub fn render_report(report: &GradingReport, json: bool) -> AppResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(format!(
        "\n{}\n📊 分数分布 (Score out of 10)\n{}",
        render_table(&report.records),
        report.histogram.render()
    ))
}

fn read_text(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}
