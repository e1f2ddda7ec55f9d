//! 文章生成网关
//!
//! 组装生成提示词与响应 Schema，经 Gemini 产出文章、中文翻译、
//! 逻辑检查报告与统一的参考来源列表。

use crate::cancel::await_cancellable;
use crate::client::GeminiClient;
use crate::prompt::build_generation_prompt;
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GenerationOutcome,
    GenerationReply, ReferenceArticle, Tool,
};
use fitcast_core::models::{Language, Reference, Topic};
use fitcast_core::GatewayError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// 生成一篇新文章
///
/// 参考文章应由调用方预先过滤为同一类目。令牌已触发时立即失败，
/// 不发起远程调用。
pub async fn generate_article(
    client: &GeminiClient,
    topic: Topic,
    language: Language,
    instructions: &str,
    references: &[ReferenceArticle],
    cancel: &CancellationToken,
) -> Result<GenerationOutcome, GatewayError> {
    if cancel.is_cancelled() {
        debug!("[Gateway] 生成调用在发起前已被取消");
        return Err(GatewayError::Cancelled);
    }

    let prompt = build_generation_prompt(topic, language, instructions, references);
    let request = GenerateContentRequest {
        contents: vec![Content::from_text(prompt)],
        generation_config: GenerationConfig::json_with_schema(generation_schema(language)),
        tools: Some(vec![Tool::google_search()]),
    };

    info!(
        "[Gateway] 发起生成调用: topic={}, language={}, 参考文章 {} 篇",
        topic,
        language,
        references.len()
    );

    let response = await_cancellable(cancel, client.generate_content(&request)).await?;
    parse_generation(&response)
}

/// 生成调用的响应 Schema
fn generation_schema(language: Language) -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": format!("文章标题（{language}）"),
            },
            "content": {
                "type": "STRING",
                "description": format!("文章正文（{language}），使用Markdown格式"),
            },
            "chinese_translation": {
                "type": "STRING",
                "description": "文章的中文翻译，使用Markdown格式",
            },
            "logic_check_notes": {
                "type": "STRING",
                "description": "逻辑检查报告（中文）",
            },
            "referenced_library_articles": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "实际参考的本地文章库中的文章标题列表",
            },
        },
        "required": [
            "title",
            "content",
            "chinese_translation",
            "logic_check_notes",
            "referenced_library_articles",
        ],
    })
}

/// 解析生成响应，合并文章库参考与联网检索参考（库参考在前）
fn parse_generation(
    response: &GenerateContentResponse,
) -> Result<GenerationOutcome, GatewayError> {
    let text = response
        .first_text()
        .ok_or_else(|| GatewayError::Parse("响应缺少文本内容".to_string()))?;

    let reply: GenerationReply = serde_json::from_str(text)
        .map_err(|e| GatewayError::Parse(format!("结构化回复解析失败: {e}")))?;

    let mut references: Vec<Reference> = reply
        .referenced_library_articles
        .iter()
        .map(Reference::library)
        .collect();
    references.extend(response.web_references());

    Ok(GenerationOutcome {
        title: reply.title,
        content: reply.content,
        chinese_translation: reply.chinese_translation,
        logic_check_notes: reply.logic_check_notes,
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcast_core::models::ReferenceKind;

    fn response_from(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn parse_merges_library_before_web_references() {
        let reply = serde_json::json!({
            "title": "Speedbike 入门",
            "content": "正文",
            "chinese_translation": "译文",
            "logic_check_notes": "无问题",
            "referenced_library_articles": ["旧文一", "旧文二"],
        })
        .to_string();
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": reply}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://a.example", "title": "网页甲"}}
                    ]
                }
            }]
        })
        .to_string();

        let outcome = parse_generation(&response_from(&raw)).unwrap();
        assert_eq!(outcome.title, "Speedbike 入门");
        assert_eq!(outcome.references.len(), 3);
        assert_eq!(outcome.references[0].kind, ReferenceKind::Library);
        assert_eq!(outcome.references[1].kind, ReferenceKind::Library);
        assert_eq!(outcome.references[2].kind, ReferenceKind::Web);
        assert_eq!(outcome.references[2].url.as_deref(), Some("https://a.example"));
    }

    #[test]
    fn parse_defaults_missing_optional_fields() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"title\": \"T\"}"}]}
            }]
        })
        .to_string();

        let outcome = parse_generation(&response_from(&raw)).unwrap();
        assert_eq!(outcome.title, "T");
        assert!(outcome.content.is_empty());
        assert!(outcome.references.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_reply() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "这不是 JSON"}]}
            }]
        })
        .to_string();

        let err = parse_generation(&response_from(&raw)).unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[test]
    fn parse_rejects_empty_response() {
        let err = parse_generation(&response_from("{}")).unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[tokio::test]
    async fn pre_cancelled_token_issues_no_call() {
        // 指向不可达地址；若真的发起请求会得到 Upstream 而非 Cancelled
        let client = GeminiClient::new("test-key").with_base_url("http://127.0.0.1:1");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = generate_article(&client, Topic::Speedbike, Language::English, "", &[], &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
