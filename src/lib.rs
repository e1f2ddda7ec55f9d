//! fitcast - AI 健身器材博客创作工作台
//!
//! 单用户内容创作工具：生成、修改并归档家用健身器材科普文章，
//! 文本生成委托给外部 AI 服务，状态持久化在本地 JSON 记录文件。
//!
//! ## Workspace 结构
//!
//! - fitcast-core crate（models, errors, store）
//! - fitcast-gateway crate（Gemini 客户端、生成/修改网关、取消）
//! - fitcast-services crate（草稿生命周期、自动保存、文章库、导出）
//! - 主 crate 负责配置、日志初始化与应用装配

pub mod app;
pub mod config;
pub mod logging;

pub use app::{App, AppError};
pub use config::{load_config, save_config, Config};
pub use logging::init_logging;

// 重新导出子 crate 的常用类型
pub use fitcast_core::{models, store, BlogStore, GatewayError, StoreError};
pub use fitcast_gateway::{
    ArticleGenerator, GeminiClient, GeminiGateway, GenerationOutcome, ReferenceArticle,
    RevisionOutcome,
};
pub use fitcast_services::{
    export_file_name, render_draft, DraftPatch, DraftService, ExportFormat, LibraryService,
};
