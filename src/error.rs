use thiserror::Error;

/// 应用程序错误类型
///
/// 只有会让整次评分中止的错误才会出现在这里；
/// 单个学生的评分失败由 [`crate::models::GradeOutcome`] 表达，不会向上传播。
#[derive(Debug, Error)]
pub enum AppError {
    /// 上传内容不合法
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文本提取失败
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 登录校验失败
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 评分报告序列化失败
    #[error("报告序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 上传内容错误
#[derive(Debug, Error)]
pub enum InputError {
    /// CSV 缺少必需的列
    #[error("❗ CSV 必须包含 'Student Name' 和 'Answer' 列 (缺少: {})", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    /// 评分标准为空
    #[error("评分标准不能为空")]
    EmptyRubric,
    /// 上传文件为空
    #[error("上传的文件为空")]
    EmptyUpload,
    /// 无法识别的上传类型
    #[error("无法识别的上传类型: {0}")]
    UnknownKind(String),
    /// 不支持的图片格式
    #[error("不支持的图片格式 (仅支持 PNG/JPEG)")]
    UnsupportedImage,
    /// CSV 解析失败
    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),
}

/// 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// PDF 文本提取失败
    #[error("PDF 文本提取失败: {0}")]
    Pdf(String),
    /// 手写识别失败
    #[error("手写识别失败: {0}")]
    Handwriting(#[source] LlmError),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API 调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 请求构建失败
    #[error("构建 LLM 请求失败: {0}")]
    RequestBuild(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// CSV 写出失败
    #[error("CSV 写出失败 ({path}): {source}")]
    CsvWriteFailed {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件解析失败
    #[error("配置文件 {path} 解析失败: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 启用登录校验但未配置密码
    #[error("已启用登录校验，但未设置 TEACHER_PASSWORD")]
    MissingPassword,
}

/// 登录校验错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 未提供密码
    #[error("请输入教师密码后再使用")]
    PasswordRequired,
    /// 密码错误
    #[error("密码错误")]
    WrongPassword,
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

impl LlmError {
    /// 创建 LLM API 调用错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
