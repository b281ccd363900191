//! 手写识别服务 - 业务能力层
//!
//! 把整张图片交给视觉模型转写，返回识别出的段落

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, info};

use crate::error::LlmError;
use crate::services::llm_service::LlmService;

const TRANSCRIBE_SYSTEM: &str = "You are an OCR engine for handwritten student work.";

const TRANSCRIBE_PROMPT: &str = "Transcribe all handwritten text in this image exactly as written. \
Separate paragraphs with a blank line. Do not add commentary, headings or corrections.";

/// 手写识别能力
#[async_trait]
pub trait HandwritingReader: Send + Sync {
    /// 识别整张图片，返回按顺序排列的段落
    async fn read_handwriting(&self, image: &[u8], mime: &str) -> Result<Vec<String>, LlmError>;
}

/// 构建图片的 `data:` URL
pub fn image_data_url(image: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(image))
}

/// 把转写文本按空行拆成段落
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

#[async_trait]
impl HandwritingReader for LlmService {
    async fn read_handwriting(&self, image: &[u8], mime: &str) -> Result<Vec<String>, LlmError> {
        info!("🖼️ 正在识别手写内容 ({} 字节, {})", image.len(), mime);

        let urls = vec![image_data_url(image, mime)];
        let text = self
            .send_to_llm(TRANSCRIBE_PROMPT, Some(TRANSCRIBE_SYSTEM), Some(urls.as_slice()))
            .await?;

        let paragraphs = split_paragraphs(&text);
        debug!("识别出 {} 个段落", paragraphs.len());
        Ok(paragraphs)
    }
}
