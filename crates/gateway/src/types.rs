//! 网关数据类型
//!
//! 对外的生成/修改结果类型，以及 Gemini generateContent 协议结构。

use fitcast_core::models::{Article, Reference};
use serde::{Deserialize, Serialize};

/// 生成时提供给模型的参考文章（标题 + 正文）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceArticle {
    pub title: String,
    pub content: String,
}

impl From<&Article> for ReferenceArticle {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            content: article.content.clone(),
        }
    }
}

/// 一次生成调用的完整结果
///
/// 参考来源列表中文章库参考排在联网检索参考之前。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub title: String,
    pub content: String,
    pub chinese_translation: String,
    pub logic_check_notes: String,
    pub references: Vec<Reference>,
}

/// 一次修改调用的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionOutcome {
    pub content: String,
    pub chinese_translation: String,
    pub revision_notes: String,
}

// ==================== Gemini 协议类型 ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub(crate) fn from_text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

impl GenerationConfig {
    /// 要求模型按指定 JSON Schema 输出
    pub(crate) fn json_with_schema(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub google_search: serde_json::Value,
}

impl Tool {
    pub(crate) fn google_search() -> Self {
        Self {
            google_search: serde_json::json!({}),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// 首个候选的文本内容
    pub(crate) fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }

    /// grounding 元数据中的联网检索参考
    pub(crate) fn web_references(&self) -> Vec<Reference> {
        let Some(metadata) = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };

        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| match (&web.title, &web.uri) {
                (Some(title), Some(uri)) => Some(Reference::web(title, uri)),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

// ==================== 结构化回复 ====================

/// 生成调用的结构化回复；缺失的可选字段以空值兜底
#[derive(Debug, Deserialize)]
pub(crate) struct GenerationReply {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub chinese_translation: String,
    #[serde(default)]
    pub logic_check_notes: String,
    #[serde(default)]
    pub referenced_library_articles: Vec<String>,
}

/// 修改调用的结构化回复
#[derive(Debug, Deserialize)]
pub(crate) struct RevisionReply {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub chinese_translation: String,
    #[serde(default)]
    pub revision_notes: String,
}
