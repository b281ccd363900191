//! 文本提取服务 - 业务能力层
//!
//! 按上传类型把原始字节转换为学生作答记录：
//! - CSV：直接读取 `Student Name` / `Answer` 两列
//! - PDF：逐页取文本，按空行拆段，每段算一个学生（`Student N`）
//! - 图片：整张图做一次手写识别，结果合并为一个学生的作答

use image::ImageFormat;
use tracing::{debug, info, warn};

use crate::error::{AppResult, ExtractionError, InputError};
use crate::models::{AnswerRecord, GradingRequest, UploadKind};
use crate::services::ocr_service::HandwritingReader;

pub const NAME_COLUMN: &str = "Student Name";
pub const ANSWER_COLUMN: &str = "Answer";

/// 按请求的上传类型提取作答记录
pub async fn extract_answers(
    request: &GradingRequest,
    reader: &dyn HandwritingReader,
) -> AppResult<Vec<AnswerRecord>> {
    let records = match request.kind() {
        UploadKind::Csv => extract_csv(request.bytes())?,
        UploadKind::Pdf => extract_pdf(request.bytes())?,
        UploadKind::Image => extract_image(request.bytes(), reader).await?,
    };
    info!("✓ 从 {} 中提取到 {} 份作答", request.kind(), records.len());
    Ok(records)
}

/// 读取 CSV 作答
///
/// 缺少必需列时直接报错，不会产生任何记录
pub fn extract_csv(bytes: &[u8]) -> AppResult<Vec<AnswerRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(InputError::from)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let name_idx = headers.iter().position(|h| h == NAME_COLUMN);
    let answer_idx = headers.iter().position(|h| h == ANSWER_COLUMN);

    let (name_idx, answer_idx) = match (name_idx, answer_idx) {
        (Some(n), Some(a)) => (n, a),
        (n, a) => {
            let mut missing = Vec::new();
            if n.is_none() {
                missing.push(NAME_COLUMN.to_string());
            }
            if a.is_none() {
                missing.push(ANSWER_COLUMN.to_string());
            }
            warn!("CSV 表头不符合要求: {:?}", headers);
            return Err(InputError::MissingColumns { missing }.into());
        }
    };

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(InputError::from)?;
        records.push(AnswerRecord::new(
            row.get(name_idx).unwrap_or_default(),
            row.get(answer_idx).unwrap_or_default(),
        ));
    }
    Ok(records)
}

/// 读取 PDF 作答
pub fn extract_pdf(bytes: &[u8]) -> AppResult<Vec<AnswerRecord>> {
    let pages: Vec<String> = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?
        .iter()
        .map(|page| strip_page_breaks(page).to_string())
        .collect();
    debug!("PDF 共 {} 页", pages.len());
    Ok(paragraph_records(&pages))
}

/// 去掉 pdf-extract 在每页首尾加入的换行
pub fn strip_page_breaks(page: &str) -> &str {
    page.trim_matches(|c| c == '\n' || c == '\r')
}

/// 把逐页文本拆成段落记录
///
/// 只丢弃完全为空的页；学生编号按段落在拆分序列中的位置计算，
/// 空段落不产生记录但会占用编号
pub fn paragraph_records(pages: &[String]) -> Vec<AnswerRecord> {
    let all_text = pages
        .iter()
        .filter(|page| !page.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    all_text
        .split("\n\n")
        .enumerate()
        .filter_map(|(i, paragraph)| {
            let answer = paragraph.trim();
            (!answer.is_empty()).then(|| AnswerRecord::new(format!("Student {}", i + 1), answer))
        })
        .collect()
}

/// 识别图片格式，返回 MIME 类型
pub fn image_mime(bytes: &[u8]) -> AppResult<&'static str> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        _ => Err(InputError::UnsupportedImage.into()),
    }
}

/// 读取手写图片作答
///
/// 多个学生写在同一张图上时不做区分，统一记为 `Student 1`
pub async fn extract_image(bytes: &[u8], reader: &dyn HandwritingReader) -> AppResult<Vec<AnswerRecord>> {
    let mime = image_mime(bytes)?;
    let paragraphs = reader
        .read_handwriting(bytes, mime)
        .await
        .map_err(ExtractionError::Handwriting)?;
    Ok(vec![AnswerRecord::new("Student 1", paragraphs.join(" "))])
}
