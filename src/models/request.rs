//! 评分请求模型
//!
//! 一次评分的全部输入：评分标准 + 上传类型 + 原始字节。
//! 构造后不可变，整条流水线只读取它。

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use phf::phf_map;

use crate::error::{AppResult, InputError};

/// 上传内容的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    /// CSV 表格，需包含 `Student Name` 和 `Answer` 列
    Csv,
    /// 带文本层的 PDF
    Pdf,
    /// 手写答案照片（PNG/JPEG）
    Image,
}

/// 文件扩展名 → 上传类型
static EXTENSION_KINDS: phf::Map<&'static str, UploadKind> = phf_map! {
    "csv" => UploadKind::Csv,
    "pdf" => UploadKind::Pdf,
    "png" => UploadKind::Image,
    "jpg" => UploadKind::Image,
    "jpeg" => UploadKind::Image,
};

impl UploadKind {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            UploadKind::Csv => "csv",
            UploadKind::Pdf => "pdf",
            UploadKind::Image => "image",
        }
    }

    /// 根据文件扩展名推断类型
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSION_KINDS.get(ext.to_ascii_lowercase().as_str()).copied()
    }

    /// 根据文件路径推断类型
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UploadKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(UploadKind::Csv),
            "pdf" => Ok(UploadKind::Pdf),
            "image" => Ok(UploadKind::Image),
            other => Self::from_extension(other).ok_or_else(|| InputError::UnknownKind(s.to_string())),
        }
    }
}

/// 一次评分请求
#[derive(Debug, Clone)]
pub struct GradingRequest {
    rubric: String,
    kind: UploadKind,
    bytes: Vec<u8>,
}

impl GradingRequest {
    /// 创建评分请求
    ///
    /// 评分标准为空或上传内容为空时返回错误
    pub fn new(rubric: impl Into<String>, kind: UploadKind, bytes: Vec<u8>) -> AppResult<Self> {
        let rubric = rubric.into();
        if rubric.trim().is_empty() {
            return Err(InputError::EmptyRubric.into());
        }
        if bytes.is_empty() {
            return Err(InputError::EmptyUpload.into());
        }
        Ok(Self { rubric, kind, bytes })
    }

    pub fn rubric(&self) -> &str {
        &self.rubric
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
