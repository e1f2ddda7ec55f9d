//! 文章修改网关
//!
//! 携带完整修改历史发起修改调用，返回修改后的正文、翻译与修改说明。
//! 修改调用不挂载联网检索工具。

use crate::cancel::await_cancellable;
use crate::client::GeminiClient;
use crate::prompt::build_revision_prompt;
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, RevisionOutcome,
    RevisionReply,
};
use fitcast_core::models::RevisionEntry;
use fitcast_core::GatewayError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// 按用户要求修改现有文章
pub async fn revise_article(
    client: &GeminiClient,
    content: &str,
    translation: &str,
    request: &str,
    history: &[RevisionEntry],
    cancel: &CancellationToken,
) -> Result<RevisionOutcome, GatewayError> {
    if cancel.is_cancelled() {
        debug!("[Gateway] 修改调用在发起前已被取消");
        return Err(GatewayError::Cancelled);
    }

    let prompt = build_revision_prompt(content, translation, request, history);
    let wire_request = GenerateContentRequest {
        contents: vec![Content::from_text(prompt)],
        generation_config: GenerationConfig::json_with_schema(revision_schema()),
        tools: None,
    };

    info!(
        "[Gateway] 发起修改调用，历史 {} 条",
        history.len()
    );

    let response = await_cancellable(cancel, client.generate_content(&wire_request)).await?;
    parse_revision(&response)
}

/// 修改调用的响应 Schema
fn revision_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "content": {
                "type": "STRING",
                "description": "修改后的文章正文，使用Markdown格式",
            },
            "chinese_translation": {
                "type": "STRING",
                "description": "修改后的中文翻译，使用Markdown格式",
            },
            "revision_notes": {
                "type": "STRING",
                "description": "修改说明（中文）",
            },
        },
        "required": ["content", "chinese_translation", "revision_notes"],
    })
}

fn parse_revision(response: &GenerateContentResponse) -> Result<RevisionOutcome, GatewayError> {
    let text = response
        .first_text()
        .ok_or_else(|| GatewayError::Parse("响应缺少文本内容".to_string()))?;

    let reply: RevisionReply = serde_json::from_str(text)
        .map_err(|e| GatewayError::Parse(format!("结构化回复解析失败: {e}")))?;

    Ok(RevisionOutcome {
        content: reply.content,
        chinese_translation: reply.chinese_translation,
        revision_notes: reply.revision_notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_revision_fields() {
        let reply = serde_json::json!({
            "content": "新正文",
            "chinese_translation": "新译文",
            "revision_notes": "压缩了引言",
        })
        .to_string();
        let raw = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": reply}]}}]
        })
        .to_string();
        let response: GenerateContentResponse = serde_json::from_str(&raw).unwrap();

        let outcome = parse_revision(&response).unwrap();
        assert_eq!(outcome.content, "新正文");
        assert_eq!(outcome.revision_notes, "压缩了引言");
    }

    #[test]
    fn parse_defaults_missing_fields_to_empty() {
        let raw = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{}"}]}}]
        })
        .to_string();
        let response: GenerateContentResponse = serde_json::from_str(&raw).unwrap();

        let outcome = parse_revision(&response).unwrap();
        assert!(outcome.content.is_empty());
        assert!(outcome.revision_notes.is_empty());
    }

    #[tokio::test]
    async fn pre_cancelled_token_issues_no_call() {
        let client = GeminiClient::new("test-key").with_base_url("http://127.0.0.1:1");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = revise_article(&client, "正文", "译文", "改一下", &[], &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
