use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};
use crate::services::score_parser::ScoreParseMode;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选） → 环境变量（含 `.env`）
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 手写识别使用的视觉模型
    pub ocr_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 登录配置 ---
    /// 教师密码（仅在 `require_login` 为 true 时校验）
    pub teacher_password: Option<String>,
    pub require_login: bool,
    // --- 评分与输出 ---
    pub score_parse_mode: ScoreParseMode,
    /// 分数直方图的分箱数量
    pub histogram_bins: usize,
    /// 反馈 CSV 的输出目录
    pub output_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-pro".to_string(),
            ocr_model_name: "gemini-1.5-pro".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 1024,
            teacher_password: None,
            require_login: false,
            score_parse_mode: ScoreParseMode::ConcatDigits,
            histogram_bins: 10,
            output_dir: ".".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载完整配置
    ///
    /// 先读取 `.env`，再依次叠加配置文件与环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let _ = dotenvy::dotenv();

        let base = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };

        Self::apply_env(base, |name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取配置，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })?;
        debug!("已加载配置文件: {}", path);
        Ok(config)
    }

    /// 仅从环境变量读取配置
    pub fn from_env() -> AppResult<Self> {
        Self::apply_env(Self::default(), |name| std::env::var(name).ok())
    }

    /// 用环境变量覆盖已有配置
    ///
    /// `lookup` 便于测试时替换真实环境
    fn apply_env<F>(base: Self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_model_name = lookup("LLM_MODEL_NAME").unwrap_or(base.llm_model_name);
        Ok(Self {
            llm_api_key: lookup("LLM_API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .unwrap_or(base.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(base.llm_api_base_url),
            ocr_model_name: lookup("OCR_MODEL_NAME").unwrap_or(base.ocr_model_name),
            llm_model_name,
            llm_temperature: parse_var(&lookup, "LLM_TEMPERATURE", "f32")?
                .unwrap_or(base.llm_temperature),
            llm_max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS", "u32")?
                .unwrap_or(base.llm_max_tokens),
            teacher_password: lookup("TEACHER_PASSWORD").or(base.teacher_password),
            require_login: parse_var(&lookup, "REQUIRE_LOGIN", "bool")?
                .unwrap_or(base.require_login),
            score_parse_mode: parse_var(&lookup, "SCORE_PARSE_MODE", "ScoreParseMode")?
                .unwrap_or(base.score_parse_mode),
            histogram_bins: parse_var(&lookup, "HISTOGRAM_BINS", "usize")?
                .unwrap_or(base.histogram_bins),
            output_dir: lookup("OUTPUT_DIR").unwrap_or(base.output_dir),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(base.verbose_logging),
        })
    }

    /// 校验配置的一致性
    pub fn validate(&self) -> AppResult<()> {
        if self.require_login && self.teacher_password.is_none() {
            return Err(ConfigError::MissingPassword.into());
        }
        Ok(())
    }
}

/// 解析单个环境变量，存在但无法解析时报错
fn parse_var<F, T>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}
