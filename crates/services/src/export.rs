//! 草稿导出
//!
//! 将草稿渲染为平面文档：标题、目标语言正文段、分隔线、中文翻译段。
//! Markdown 格式带标题标记，纯文本格式只保留段落标签。

use fitcast_core::models::Draft;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    PlainText,
}

impl ExportFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::PlainText => "txt",
        }
    }
}

/// 渲染导出文档
pub fn render_draft(draft: &Draft, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => format!(
            "# {}\n\n## {} Version\n\n{}\n\n---\n\n## 中文翻译\n\n{}",
            draft.title, draft.language, draft.content, draft.chinese_translation
        ),
        ExportFormat::PlainText => format!(
            "{}\n\n{} Version\n\n{}\n\n--------\n\n中文翻译\n\n{}",
            draft.title, draft.language, draft.content, draft.chinese_translation
        ),
    }
}

/// 建议的导出文件名；标题为空时回退为 article
pub fn export_file_name(draft: &Draft, format: ExportFormat) -> String {
    let stem = draft.title.trim();
    let stem = if stem.is_empty() { "article" } else { stem };
    format!("{stem}.{}", format.extension())
}
