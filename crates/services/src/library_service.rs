//! 参考文章库服务
//!
//! 维护已归档与手动录入的文章列表：既是创作成果的存放处，也是
//! 后续生成调用的负向参考输入。展示顺序为最新在前。

use anyhow::{anyhow, Result};
use fitcast_core::models::{now_millis, Article, Language, Topic};
use fitcast_core::BlogStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// 参考文章库服务
pub struct LibraryService {
    store: Arc<BlogStore>,
    articles: RwLock<Vec<Article>>,
}

impl LibraryService {
    /// 创建服务并加载存储中的文章库
    pub fn new(store: Arc<BlogStore>) -> Result<Self> {
        let articles = store
            .load_articles()
            .map_err(|e| anyhow!("加载文章库失败: {e}"))?;
        info!("[Library] 文章库已加载，共 {} 篇", articles.len());
        Ok(Self {
            store,
            articles: RwLock::new(articles),
        })
    }

    /// 全部文章快照（最新在前）
    pub async fn list(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    /// 文章数量
    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    /// 文章库是否为空
    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    /// 收录一篇文章（插入队首）
    pub async fn add(&self, article: Article) -> Result<()> {
        let mut articles = self.articles.write().await;
        articles.insert(0, article);
        self.persist(&articles)?;
        info!("[Library] 收录文章，共 {} 篇", articles.len());
        Ok(())
    }

    /// 手动录入一篇参考文章
    pub async fn add_manual(
        &self,
        title: &str,
        content: &str,
        topic: Topic,
        language: Language,
    ) -> Result<Article> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(anyhow!("标题和正文不能为空"));
        }

        let article = Article {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            content: content.to_string(),
            chinese_translation: None,
            topic,
            language,
            created_at: now_millis(),
            is_reference: true,
        };

        let mut articles = self.articles.write().await;
        articles.insert(0, article.clone());
        self.persist(&articles)?;
        info!("[Library] 手动录入参考文章: {}", article.title);
        Ok(article)
    }

    /// 按 id 删除文章；id 不存在时为空操作，返回是否删除
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        let removed = articles.len() < before;
        if removed {
            self.persist(&articles)?;
            info!("[Library] 删除文章: {}", id);
        }
        Ok(removed)
    }

    /// 同类目文章，供生成调用作负向参考
    pub async fn filter_by_topic(&self, topic: Topic) -> Vec<Article> {
        self.articles
            .read()
            .await
            .iter()
            .filter(|a| a.topic == topic)
            .cloned()
            .collect()
    }

    /// 按标题或类目做大小写不敏感的子串检索（任一命中即返回）
    pub async fn search(&self, term: &str) -> Vec<Article> {
        let needle = term.trim().to_lowercase();
        let articles = self.articles.read().await;
        if needle.is_empty() {
            return articles.clone();
        }

        articles
            .iter()
            .filter(|a| {
                a.title.to_lowercase().contains(&needle)
                    || a.topic.as_str().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    fn persist(&self, articles: &[Article]) -> Result<()> {
        self.store
            .save_articles(articles)
            .map_err(|e| anyhow!("保存文章库失败: {e}"))
    }
}
