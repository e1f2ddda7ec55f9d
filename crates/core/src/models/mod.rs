//! 数据模型定义
//!
//! 文章库条目、进行中草稿、修改历史与参考来源的核心数据结构

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 当前毫秒级时间戳
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 产品类目
///
/// 固定枚举集合，序列化形式即文章中需要融入的关键词本身。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "speedbike")]
    Speedbike,
    #[serde(rename = "ROWING MACHINE")]
    RowingMachine,
    #[serde(rename = "TREADMILLS")]
    Treadmills,
    #[serde(rename = "PILATES")]
    Pilates,
}

impl Topic {
    /// 全部可选类目
    pub const ALL: [Topic; 4] = [
        Topic::Speedbike,
        Topic::RowingMachine,
        Topic::Treadmills,
        Topic::Pilates,
    ];

    /// 类目关键词
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Speedbike => "speedbike",
            Topic::RowingMachine => "ROWING MACHINE",
            Topic::Treadmills => "TREADMILLS",
            Topic::Pilates => "PILATES",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("未知的产品类目: {s}"))
    }
}

/// 输出语言
///
/// `Chinese` 仅用于手动录入的参考文章；AI 生成的目标语言见
/// [`Language::GENERATABLE`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "English")]
    English,
    #[serde(rename = "Deutsch")]
    Deutsch,
    #[serde(rename = "中文")]
    Chinese,
}

impl Language {
    /// 全部语言
    pub const ALL: [Language; 3] = [Language::English, Language::Deutsch, Language::Chinese];

    /// 可作为生成目标的语言
    pub const GENERATABLE: [Language; 2] = [Language::English, Language::Deutsch];

    /// 语言显示名
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Deutsch => "Deutsch",
            Language::Chinese => "中文",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("未知的语言: {s}"))
    }
}

/// 文章库条目
///
/// 入库后除删除外不再变更。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// 条目 ID，创建时生成，不复用
    pub id: String,
    /// 标题（目标语言）
    pub title: String,
    /// 正文（目标语言）
    pub content: String,
    /// 中文翻译
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_translation: Option<String>,
    /// 产品类目
    pub topic: Topic,
    /// 目标语言
    pub language: Language,
    /// 创建时间（毫秒时间戳）
    pub created_at: i64,
    /// 是否为手动录入的参考文章（仅用于展示）
    #[serde(default)]
    pub is_reference: bool,
}

/// 修改历史条目
///
/// 一次用户修改要求及 AI 的修改说明，按时间顺序追加，不删除不重排。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionEntry {
    /// 用户的修改要求
    pub request: String,
    /// AI 的修改说明
    pub notes: String,
    /// 记录时间（毫秒时间戳）
    pub timestamp: i64,
}

/// 参考来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// 本地文章库
    Library,
    /// 联网检索
    Web,
}

/// 生成结果附带的参考来源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Reference {
    /// 文章库参考（无 URL）
    pub fn library(title: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Library,
            title: title.into(),
            url: None,
        }
    }

    /// 联网检索参考
    pub fn web(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Web,
            title: title.into(),
            url: Some(url.into()),
        }
    }
}

/// 进行中草稿
///
/// 全系统同一时刻至多存在一份。由生成结果创建，经编辑、修改合并与
/// 自动保存演进，最终定稿入库或被丢弃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// 草稿 ID（定稿入库时不沿用）
    pub id: String,
    /// 标题（目标语言）
    pub title: String,
    /// 正文（目标语言）
    pub content: String,
    /// 中文翻译
    pub chinese_translation: String,
    /// 生成时产出的逻辑检查报告，后续修改不更新
    pub logic_check_notes: String,
    /// 产品类目
    pub topic: Topic,
    /// 目标语言
    pub language: Language,
    /// 最近一次保存时间（毫秒时间戳）
    pub last_saved: i64,
    /// 修改历史，只追加
    #[serde(default)]
    pub revision_history: Vec<RevisionEntry>,
    /// 生成时产出的参考来源，后续修改不更新
    #[serde(default)]
    pub references: Vec<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_serializes_as_keyword() {
        let json = serde_json::to_string(&Topic::RowingMachine).unwrap();
        assert_eq!(json, "\"ROWING MACHINE\"");

        let parsed: Topic = serde_json::from_str("\"speedbike\"").unwrap();
        assert_eq!(parsed, Topic::Speedbike);
    }

    #[test]
    fn topic_from_str_roundtrip() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>().unwrap(), topic);
        }
        assert!("yoga mat".parse::<Topic>().is_err());
    }

    #[test]
    fn language_generatable_excludes_chinese() {
        assert!(!Language::GENERATABLE.contains(&Language::Chinese));
        assert_eq!("中文".parse::<Language>().unwrap(), Language::Chinese);
    }

    #[test]
    fn article_is_reference_defaults_to_false() {
        let json = r#"{
            "id": "a-1",
            "title": "t",
            "content": "c",
            "topic": "PILATES",
            "language": "English",
            "created_at": 1
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(!article.is_reference);
        assert!(article.chinese_translation.is_none());
    }

    #[test]
    fn reference_kind_tagged_as_type() {
        let web = Reference::web("来源", "https://example.com");
        let json = serde_json::to_string(&web).unwrap();
        assert!(json.contains("\"type\":\"web\""));

        let library = Reference::library("旧文章");
        let json = serde_json::to_string(&library).unwrap();
        assert!(json.contains("\"type\":\"library\""));
        assert!(!json.contains("url"));
    }

    #[test]
    fn draft_missing_collections_default_to_empty() {
        let json = r#"{
            "id": "d-1",
            "title": "t",
            "content": "c",
            "chinese_translation": "译",
            "logic_check_notes": "",
            "topic": "speedbike",
            "language": "Deutsch",
            "last_saved": 10
        }"#;
        let draft: Draft = serde_json::from_str(json).unwrap();
        assert!(draft.revision_history.is_empty());
        assert!(draft.references.is_empty());
    }
}
