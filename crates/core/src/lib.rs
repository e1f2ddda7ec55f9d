//! fitcast 核心层
//!
//! 提供博客创作工作台的公共基础：
//! - models：文章、草稿、修改历史等数据模型
//! - errors：网关与存储的统一错误类型
//! - store：基于 JSON 记录文件的本地持久化

pub mod errors;
pub mod models;
pub mod store;

pub use errors::{GatewayError, StoreError};
pub use models::{
    now_millis, Article, Draft, Language, Reference, ReferenceKind, RevisionEntry, Topic,
};
pub use store::BlogStore;
