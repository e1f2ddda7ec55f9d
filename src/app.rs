//! 应用装配层
//!
//! 连接存储、服务与生成网关，对视图层暴露用户级操作。
//! 同一时刻至多一个 AI 调用在途由界面禁用保证，此处不加运行时锁。

use crate::config::Config;
use anyhow::anyhow;
use fitcast_core::models::{Article, Draft, Language, Topic};
use fitcast_core::{BlogStore, GatewayError};
use fitcast_gateway::{ArticleGenerator, GeminiClient, GeminiGateway, ReferenceArticle};
use fitcast_services::{
    export_file_name, render_draft, spawn_autosave, AutosaveHandle, DraftPatch, DraftService,
    ExportFormat, LibraryService,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// 应用级错误
///
/// 网关错误保留取消/上游失败/解析失败的区分；本地服务错误
/// 统一为一类可展示的消息。
#[derive(Error, Debug)]
pub enum AppError {
    /// AI 网关调用失败（含用户取消）
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// 本地服务或存储失败
    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

impl AppError {
    /// 是否为用户取消
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Gateway(GatewayError::Cancelled))
    }
}

/// 应用装配
///
/// 构造时加载文章库与未完成草稿并启动自动保存；须在 Tokio
/// 运行时内构造。
pub struct App {
    generator: Arc<dyn ArticleGenerator>,
    drafts: Arc<DraftService>,
    library: Arc<LibraryService>,
    autosave: AutosaveHandle,
}

impl App {
    /// 以指定生成器装配应用
    pub fn bootstrap(
        config: &Config,
        generator: Arc<dyn ArticleGenerator>,
    ) -> Result<Self, AppError> {
        let store = Arc::new(
            BlogStore::new(&config.storage.data_dir).map_err(|e| anyhow!("初始化存储失败: {e}"))?,
        );
        let drafts = Arc::new(DraftService::new(store.clone())?);
        let library = Arc::new(LibraryService::new(store)?);
        let autosave = spawn_autosave(
            drafts.clone(),
            Duration::from_secs(config.autosave.interval_secs),
        );

        info!("[App] 应用已启动，数据目录: {}", config.storage.data_dir.display());
        Ok(Self {
            generator,
            drafts,
            library,
            autosave,
        })
    }

    /// 以配置中的 Gemini 服务装配应用
    pub fn with_gemini(config: &Config) -> Result<Self, AppError> {
        let mut client =
            GeminiClient::new(&config.gemini.api_key).with_model(&config.gemini.model);
        if let Some(base_url) = &config.gemini.base_url {
            client = client.with_base_url(base_url);
        }
        Self::bootstrap(config, Arc::new(GeminiGateway::new(client)))
    }

    // ==================== 生成与修改 ====================

    /// 生成新文章并作为草稿打开
    ///
    /// 同类目库文章自动作为负向参考传入；生成失败原样上抛，
    /// 不产生草稿。
    pub async fn generate(
        &self,
        topic: Topic,
        language: Language,
        instructions: &str,
        cancel: &CancellationToken,
    ) -> Result<Draft, AppError> {
        let references: Vec<ReferenceArticle> = self
            .library
            .filter_by_topic(topic)
            .await
            .iter()
            .map(ReferenceArticle::from)
            .collect();

        let outcome = self
            .generator
            .generate(topic, language, instructions, &references, cancel)
            .await?;

        Ok(self
            .drafts
            .create_from_generation(outcome, topic, language)
            .await?)
    }

    /// 按要求修改当前草稿
    pub async fn revise(
        &self,
        request: &str,
        cancel: &CancellationToken,
    ) -> Result<Draft, AppError> {
        let draft = self
            .drafts
            .current()
            .await
            .ok_or_else(|| AppError::Service(anyhow!("当前没有正在编辑的草稿")))?;

        let outcome = self
            .generator
            .revise(
                &draft.content,
                &draft.chinese_translation,
                request,
                &draft.revision_history,
                cancel,
            )
            .await?;

        Ok(self.drafts.apply_revision(outcome, request).await?)
    }

    // ==================== 草稿操作 ====================

    /// 当前草稿快照
    pub async fn current_draft(&self) -> Option<Draft> {
        self.drafts.current().await
    }

    /// 应用字段编辑
    pub async fn edit(&self, patch: DraftPatch) -> Result<Draft, AppError> {
        Ok(self.drafts.apply_edit(patch).await?)
    }

    /// 草稿定稿入库
    pub async fn save_to_library(&self) -> Result<Article, AppError> {
        let article = self.drafts.promote().await?;
        self.library.add(article.clone()).await?;
        Ok(article)
    }

    /// 丢弃当前草稿
    pub async fn discard_draft(&self) -> Result<(), AppError> {
        Ok(self.drafts.discard().await?)
    }

    /// 导出当前草稿，返回（建议文件名，文档内容）
    pub async fn export_draft(&self, format: ExportFormat) -> Result<(String, String), AppError> {
        let draft = self
            .drafts
            .current()
            .await
            .ok_or_else(|| AppError::Service(anyhow!("当前没有可导出的草稿")))?;
        Ok((
            export_file_name(&draft, format),
            render_draft(&draft, format),
        ))
    }

    // ==================== 文章库操作 ====================

    /// 全部文章（最新在前）
    pub async fn articles(&self) -> Vec<Article> {
        self.library.list().await
    }

    /// 手动录入参考文章
    pub async fn add_reference(
        &self,
        title: &str,
        content: &str,
        topic: Topic,
        language: Language,
    ) -> Result<Article, AppError> {
        Ok(self
            .library
            .add_manual(title, content, topic, language)
            .await?)
    }

    /// 删除文章；id 不存在时为空操作
    pub async fn remove_article(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.library.remove(id).await?)
    }

    /// 检索文章
    pub async fn search(&self, term: &str) -> Vec<Article> {
        self.library.search(term).await
    }

    /// 停止后台任务
    pub fn shutdown(&self) {
        self.autosave.stop();
        info!("[App] 应用已停止");
    }
}
