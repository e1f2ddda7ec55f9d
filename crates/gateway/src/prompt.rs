//! 提示词构建

use crate::types::ReferenceArticle;
use fitcast_core::models::{Language, RevisionEntry, Topic};

/// 生成提示词
pub(crate) fn build_generation_prompt(
    topic: Topic,
    language: Language,
    instructions: &str,
    references: &[ReferenceArticle],
) -> String {
    let reference_block = if references.is_empty() {
        String::new()
    } else {
        let listing = references
            .iter()
            .map(|r| format!("【标题】：{}\n【内容】：{}", r.title, r.content))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");
        format!(
            "请参考以下已发表的同类产品文章。生成新文章时必须分析这些已有文章，\
             **绝对不能出现与它们相似的内容、观点或段落**，要提供全新的视角或侧重点：\n\n{listing}"
        )
    };

    format!(
        r#"你是一位拥有丰富经验的家用健身器材领域专家与专栏作者。

任务：生成一篇关于家用健身器材的科普类文章。
主题：{topic}
输出语言：{language}

要求：
1. 文章的标题和正文必须自然融入产品类目单词：{topic}。注意：请将关键词自然融入，绝对不要使用 `**` (Markdown加粗) 标识关键词。
2. 单词数量控制在800到1000字左右。
3. 关键词（{topic}）占比控制在5%左右。
4. 文章结构必须严格包含：引言、5个左右的大标题（章节）加正文部分、总结。
5. 语言风格：偏学术风格，语言严谨、逻辑严密。不要乱讲话（不编造虚假信息），不要使用大白话，但文章大意必须保证普通消费者能够看懂。如需使用极度专业的术语，请附带简明解释。
6. {reference_block}
7. {instructions}

除了生成目标语言（{language}）的文章外，你还需要：
1. 将生成的文章翻译成中文。
2. 检查生成的文章是否有乱写、逻辑不通的地方，并提供检查报告。
3. 列出你实际参考了哪些文章库中的文章标题。
"#,
        topic = topic.as_str(),
        language = language.as_str(),
        reference_block = reference_block,
        instructions = instructions,
    )
}

/// 修改提示词
pub(crate) fn build_revision_prompt(
    content: &str,
    translation: &str,
    request: &str,
    history: &[RevisionEntry],
) -> String {
    let history_block = if history.is_empty() {
        String::new()
    } else {
        let listing = history
            .iter()
            .enumerate()
            .map(|(i, h)| {
                format!(
                    "[第{n}次用户要求]: {request}\n[第{n}次AI说明]: {notes}",
                    n = i + 1,
                    request = h.request,
                    notes = h.notes,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("\n之前的修改历史：\n{listing}\n")
    };

    format!(
        r#"你是一位拥有丰富经验的家用健身器材领域专家与专栏作者。
请根据用户的最新修改要求，修改以下文章及其翻译。
{history_block}
当前文章内容：
{content}

当前中文翻译：
{translation}

最新修改要求：
{request}

注意：
1. 请将关键词自然融入，绝对不要使用 `**` (Markdown加粗) 标识关键词。
2. 必须保持原有的文章结构（引言、5个左右的大标题加正文、总结），即使根据要求修改，也绝对不要破坏或随意改变这个结构。
3. 语言风格需保持偏学术、严谨且逻辑清晰，不使用大白话，但要让普通用户能看懂。

请返回修改后的文章和翻译，并提供修改说明。
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_prompt_embeds_topic_and_language() {
        let prompt = build_generation_prompt(Topic::Speedbike, Language::English, "", &[]);
        assert!(prompt.contains("speedbike"));
        assert!(prompt.contains("English"));
        assert!(!prompt.contains("【标题】"));
    }

    #[test]
    fn generation_prompt_lists_references() {
        let references = vec![
            ReferenceArticle {
                title: "旧文一".to_string(),
                content: "内容一".to_string(),
            },
            ReferenceArticle {
                title: "旧文二".to_string(),
                content: "内容二".to_string(),
            },
        ];
        let prompt =
            build_generation_prompt(Topic::Pilates, Language::Deutsch, "注意语气", &references);
        assert!(prompt.contains("【标题】：旧文一"));
        assert!(prompt.contains("【内容】：内容二"));
        assert!(prompt.contains("注意语气"));
    }

    #[test]
    fn revision_prompt_numbers_history_in_order() {
        let history = vec![
            RevisionEntry {
                request: "加个结论".to_string(),
                notes: "已加".to_string(),
                timestamp: 1,
            },
            RevisionEntry {
                request: "删掉比喻".to_string(),
                notes: "已删".to_string(),
                timestamp: 2,
            },
        ];
        let prompt = build_revision_prompt("正文", "译文", "调整开头", &history);
        assert!(prompt.contains("[第1次用户要求]: 加个结论"));
        assert!(prompt.contains("[第2次AI说明]: 已删"));
        let first = prompt.find("[第1次用户要求]").unwrap();
        let second = prompt.find("[第2次用户要求]").unwrap();
        assert!(first < second);
    }

    #[test]
    fn revision_prompt_omits_empty_history() {
        let prompt = build_revision_prompt("正文", "译文", "调整开头", &[]);
        assert!(!prompt.contains("之前的修改历史"));
        assert!(prompt.contains("调整开头"));
    }
}
