//! AI 文章网关
//!
//! 封装对 Gemini 文本生成服务的两类调用：
//! - generate：生成一篇带翻译、逻辑检查报告与参考来源的文章
//! - revise：按用户要求修改现有文章及其翻译
//!
//! 两类调用均为无状态请求/响应，支持通过取消令牌协作式取消。

pub mod client;
pub mod generate;
pub mod revise;
pub mod types;

mod cancel;
mod prompt;

pub use client::GeminiClient;
pub use types::{GenerationOutcome, ReferenceArticle, RevisionOutcome};

use async_trait::async_trait;
use fitcast_core::models::{Language, RevisionEntry, Topic};
use fitcast_core::GatewayError;
use tokio_util::sync::CancellationToken;

/// 文章生成器接口
///
/// 应用层通过该接口发起生成与修改调用，便于以测试替身驱动完整流程。
#[async_trait]
pub trait ArticleGenerator: Send + Sync {
    /// 生成一篇新文章
    async fn generate(
        &self,
        topic: Topic,
        language: Language,
        instructions: &str,
        references: &[ReferenceArticle],
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome, GatewayError>;

    /// 按要求修改现有文章
    async fn revise(
        &self,
        content: &str,
        translation: &str,
        request: &str,
        history: &[RevisionEntry],
        cancel: &CancellationToken,
    ) -> Result<RevisionOutcome, GatewayError>;
}

/// 基于 Gemini 的生成器实现
pub struct GeminiGateway {
    client: GeminiClient,
}

impl GeminiGateway {
    /// 创建网关实例
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArticleGenerator for GeminiGateway {
    async fn generate(
        &self,
        topic: Topic,
        language: Language,
        instructions: &str,
        references: &[ReferenceArticle],
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome, GatewayError> {
        generate::generate_article(&self.client, topic, language, instructions, references, cancel)
            .await
    }

    async fn revise(
        &self,
        content: &str,
        translation: &str,
        request: &str,
        history: &[RevisionEntry],
        cancel: &CancellationToken,
    ) -> Result<RevisionOutcome, GatewayError> {
        revise::revise_article(&self.client, content, translation, request, history, cancel).await
    }
}
