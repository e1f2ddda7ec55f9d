//! fitcast 业务服务层
//!
//! - draft_service：唯一进行中草稿的生命周期管理
//! - autosave：草稿定时自动保存任务
//! - library_service：参考文章库管理
//! - export：草稿导出为平面文档

pub mod autosave;
pub mod draft_service;
pub mod export;
pub mod library_service;

pub use autosave::{spawn_autosave, AutosaveHandle, DEFAULT_AUTOSAVE_INTERVAL};
pub use draft_service::{DraftPatch, DraftService};
pub use export::{export_file_name, render_draft, ExportFormat};
pub use library_service::LibraryService;
