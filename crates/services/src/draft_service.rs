//! 草稿生命周期服务
//!
//! 管理全系统唯一的进行中草稿：由生成结果创建，经字段编辑、修改
//! 合并与自动保存打点演进，最终定稿入库或被丢弃。草稿槽位由本
//! 服务独占持有（`Option<Draft>` 单槽），"至多一份草稿"由类型保证。

use anyhow::{anyhow, Result};
use fitcast_core::models::{now_millis, Article, Draft, Language, RevisionEntry, Topic};
use fitcast_core::BlogStore;
use fitcast_gateway::{GenerationOutcome, RevisionOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// 生成结果缺少标题时的默认标题
pub const DEFAULT_TITLE: &str = "未命名文章";
/// 修改结果缺少说明时的默认说明
pub const DEFAULT_REVISION_NOTES: &str = "已完成修改";

/// 草稿字段补丁
///
/// 提供的字段无条件覆盖，未提供的字段保持不变；id 不可修改，
/// `last_saved` 与修改历史不受编辑影响。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Topic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// 草稿生命周期服务
pub struct DraftService {
    store: Arc<BlogStore>,
    draft: RwLock<Option<Draft>>,
}

impl DraftService {
    /// 创建服务并恢复存储中的未完成草稿
    pub fn new(store: Arc<BlogStore>) -> Result<Self> {
        let draft = store.load_draft().map_err(|e| anyhow!("加载草稿失败: {e}"))?;
        if let Some(ref draft) = draft {
            info!("[DraftService] 启动时恢复未完成草稿: {}", draft.id);
        }
        Ok(Self {
            store,
            draft: RwLock::new(draft),
        })
    }

    /// 当前草稿快照
    pub async fn current(&self) -> Option<Draft> {
        self.draft.read().await.clone()
    }

    /// 是否存在进行中草稿
    pub async fn has_draft(&self) -> bool {
        self.draft.read().await.is_some()
    }

    /// 用生成结果创建新草稿
    ///
    /// 分配新 id，`last_saved` 取当前时间，修改历史为空，参考来源
    /// 取自生成结果；缺失的文本字段以空串兜底，标题兜底为
    /// [`DEFAULT_TITLE`]。已有草稿会被替换。
    pub async fn create_from_generation(
        &self,
        outcome: GenerationOutcome,
        topic: Topic,
        language: Language,
    ) -> Result<Draft> {
        let title = if outcome.title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            outcome.title
        };

        let draft = Draft {
            id: Uuid::new_v4().to_string(),
            title,
            content: outcome.content,
            chinese_translation: outcome.chinese_translation,
            logic_check_notes: outcome.logic_check_notes,
            topic,
            language,
            last_saved: now_millis(),
            revision_history: Vec::new(),
            references: outcome.references,
        };

        let mut slot = self.draft.write().await;
        self.store
            .save_draft(&draft)
            .map_err(|e| anyhow!("保存草稿失败: {e}"))?;
        if slot.is_some() {
            info!("[DraftService] 新生成结果替换现有草稿");
        }
        *slot = Some(draft.clone());

        info!("[DraftService] 创建新草稿: {} ({})", draft.title, draft.id);
        Ok(draft)
    }

    /// 应用字段编辑
    pub async fn apply_edit(&self, patch: DraftPatch) -> Result<Draft> {
        let mut slot = self.draft.write().await;
        let draft = slot
            .as_mut()
            .ok_or_else(|| anyhow!("当前没有正在编辑的草稿"))?;

        if let Some(title) = patch.title {
            draft.title = title;
        }
        if let Some(content) = patch.content {
            draft.content = content;
        }
        if let Some(translation) = patch.chinese_translation {
            draft.chinese_translation = translation;
        }
        if let Some(topic) = patch.topic {
            draft.topic = topic;
        }
        if let Some(language) = patch.language {
            draft.language = language;
        }

        self.store
            .save_draft(draft)
            .map_err(|e| anyhow!("保存草稿失败: {e}"))?;
        debug!("[DraftService] 草稿已更新: {}", draft.id);
        Ok(draft.clone())
    }

    /// 自动保存打点
    ///
    /// 存在草稿时刷新 `last_saved` 并落盘，返回 true；无草稿时为
    /// 空操作，返回 false。重复打点无副作用。
    pub async fn tick(&self) -> Result<bool> {
        let mut slot = self.draft.write().await;
        let Some(draft) = slot.as_mut() else {
            return Ok(false);
        };

        draft.last_saved = now_millis();
        self.store
            .save_draft(draft)
            .map_err(|e| anyhow!("自动保存失败: {e}"))?;
        debug!("[DraftService] 自动保存草稿: {}", draft.id);
        Ok(true)
    }

    /// 合并修改结果
    ///
    /// 正文与翻译仅在结果提供非空值时覆盖；追加且仅追加一条修改
    /// 历史，说明缺失时兜底为 [`DEFAULT_REVISION_NOTES`]。
    pub async fn apply_revision(
        &self,
        outcome: RevisionOutcome,
        request_text: &str,
    ) -> Result<Draft> {
        let mut slot = self.draft.write().await;
        let draft = slot
            .as_mut()
            .ok_or_else(|| anyhow!("当前没有正在编辑的草稿"))?;

        if !outcome.content.trim().is_empty() {
            draft.content = outcome.content;
        }
        if !outcome.chinese_translation.trim().is_empty() {
            draft.chinese_translation = outcome.chinese_translation;
        }

        let notes = if outcome.revision_notes.trim().is_empty() {
            DEFAULT_REVISION_NOTES.to_string()
        } else {
            outcome.revision_notes
        };
        draft.revision_history.push(RevisionEntry {
            request: request_text.to_string(),
            notes,
            timestamp: now_millis(),
        });

        self.store
            .save_draft(draft)
            .map_err(|e| anyhow!("保存草稿失败: {e}"))?;
        info!(
            "[DraftService] 合并修改结果，历史共 {} 条",
            draft.revision_history.len()
        );
        Ok(draft.clone())
    }

    /// 定稿入库
    ///
    /// 以草稿内容铸造一篇新文章（新 id，`is_reference = false`），
    /// 同时清空草稿槽位与存储中的草稿记录。
    pub async fn promote(&self) -> Result<Article> {
        let mut slot = self.draft.write().await;
        let Some(draft) = slot.take() else {
            return Err(anyhow!("当前没有可入库的草稿"));
        };

        // 清除失败则回滚槽位，槽位与存储保持一致
        if let Err(e) = self.store.clear_draft() {
            *slot = Some(draft);
            return Err(anyhow!("清除草稿记录失败: {e}"));
        }

        let draft_id = draft.id;
        let article = Article {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            chinese_translation: Some(draft.chinese_translation),
            topic: draft.topic,
            language: draft.language,
            created_at: now_millis(),
            is_reference: false,
        };

        info!("[DraftService] 草稿已定稿入库: {} -> {}", draft_id, article.id);
        Ok(article)
    }

    /// 丢弃当前草稿；无草稿时为空操作
    pub async fn discard(&self) -> Result<()> {
        let mut slot = self.draft.write().await;
        if let Some(draft) = slot.take() {
            if let Err(e) = self.store.clear_draft() {
                *slot = Some(draft);
                return Err(anyhow!("清除草稿记录失败: {e}"));
            }
            info!("[DraftService] 草稿已丢弃");
        }
        Ok(())
    }
}
