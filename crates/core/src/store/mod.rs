//! 本地持久化存储
//!
//! 文章库与当前草稿各占一个 JSON 记录文件，启动时读取，每次变更时
//! 整体重写对应文件（不做增量修补），读写往返无损。

use crate::errors::StoreError;
use crate::models::{Article, Draft};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文章库记录文件名
pub const ARTICLES_FILE: &str = "articles.json";
/// 草稿记录文件名
pub const DRAFT_FILE: &str = "draft.json";

/// 博客本地存储
///
/// 数据目录下维护两个逻辑记录：`articles.json`（文章库）与
/// `draft.json`（当前草稿，文件不存在即无草稿）。
#[derive(Debug, Clone)]
pub struct BlogStore {
    data_dir: PathBuf,
}

impl BlogStore {
    /// 打开（必要时创建）数据目录
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// 默认数据目录 `~/.fitcast`
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fitcast")
    }

    /// 数据目录路径
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 读取文章库，记录文件不存在时返回空集合
    pub fn load_articles(&self) -> Result<Vec<Article>, StoreError> {
        let path = self.articles_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 整体重写文章库记录
    pub fn save_articles(&self, articles: &[Article]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(articles)?;
        fs::write(self.articles_path(), content)?;
        debug!("[BlogStore] 文章库已写入，共 {} 篇", articles.len());
        Ok(())
    }

    /// 读取当前草稿，记录文件不存在时返回 None
    pub fn load_draft(&self) -> Result<Option<Draft>, StoreError> {
        let path = self.draft_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// 整体重写草稿记录
    pub fn save_draft(&self, draft: &Draft) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(draft)?;
        fs::write(self.draft_path(), content)?;
        debug!("[BlogStore] 草稿已写入: {}", draft.id);
        Ok(())
    }

    /// 删除草稿记录，记录不存在时为幂等空操作
    pub fn clear_draft(&self) -> Result<(), StoreError> {
        let path = self.draft_path();
        if path.exists() {
            fs::remove_file(&path)?;
            debug!("[BlogStore] 草稿记录已清除");
        }
        Ok(())
    }

    fn articles_path(&self) -> PathBuf {
        self.data_dir.join(ARTICLES_FILE)
    }

    fn draft_path(&self) -> PathBuf {
        self.data_dir.join(DRAFT_FILE)
    }
}
