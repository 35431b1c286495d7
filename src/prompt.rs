//! Prompt construction for commit message generation
//!
//! Pure text assembly: the staged diff, changed file list, and branch name
//! are combined with a per-style instruction block in the configured
//! language. Deterministic for identical inputs, no failure modes.

use crate::config::{CommitStyle, Language};
use crate::git::RepoInfo;

/// Build the prompt sent to the completion endpoint
///
/// An empty diff produces a prompt that asks the model to reply with a
/// fixed "no changes" message instead of inventing one.
///
/// # Example
///
/// ```
/// use deepseek_commit::config::{CommitStyle, Language};
/// use deepseek_commit::git::RepoInfo;
/// use deepseek_commit::prompt::build_prompt;
///
/// let info = RepoInfo {
///     diff: "+added line\n".to_string(),
///     files: vec!["src/lib.rs".to_string()],
///     branch: "main".to_string(),
/// };
/// let prompt = build_prompt(&info, CommitStyle::Conventional, Language::En);
/// assert!(prompt.contains("+added line"));
/// assert!(prompt.contains("Conventional Commits"));
/// ```
pub fn build_prompt(info: &RepoInfo, style: CommitStyle, language: Language) -> String {
    if info.diff.trim().is_empty() {
        return empty_diff_prompt(language);
    }

    let file_list = info
        .files
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    match language {
        Language::ZhCn => format!(
            "你是一个专业的Git提交信息生成助手。请根据以下Git代码变更，生成一条专业的提交信息。\n\n\
             **代码差异：**\n```\n{diff}\n```\n\n\
             **变更文件：**\n{file_list}\n\n\
             **当前分支：** {branch}\n\n\
             **要求：**\n{style_instruction}\n\n\
             **重要提示：**\n\
             1. 只返回提交信息文本，不要包含代码块标记（```）或其他格式\n\
             2. 提交信息应该准确反映代码变更的内容\n\
             3. 使用中文描述\n\
             4. 保持简洁专业\n\n\
             请直接返回提交信息：",
            diff = info.diff,
            file_list = file_list,
            branch = info.branch,
            style_instruction = style_instruction(style, language),
        ),
        Language::En => format!(
            "You are a professional Git commit message generator. Please generate a \
             professional commit message based on the following Git code changes.\n\n\
             **Code Diff:**\n```\n{diff}\n```\n\n\
             **Changed Files:**\n{file_list}\n\n\
             **Current Branch:** {branch}\n\n\
             **Requirements:**\n{style_instruction}\n\n\
             **Important:**\n\
             1. Return only the commit message text, no code block markers (```) or other formatting\n\
             2. The commit message should accurately reflect the code changes\n\
             3. Use English\n\
             4. Keep it concise and professional\n\n\
             Please return the commit message directly:",
            diff = info.diff,
            file_list = file_list,
            branch = info.branch,
            style_instruction = style_instruction(style, language),
        ),
    }
}

/// Per-style instruction block
fn style_instruction(style: CommitStyle, language: Language) -> &'static str {
    match (language, style) {
        (Language::ZhCn, CommitStyle::Conventional) => {
            "请遵循Conventional Commits规范生成提交信息：\n\
             - 格式：<type>(<scope>): <subject>\n\
             - type类型：feat(新功能)、fix(修复)、docs(文档)、style(格式)、refactor(重构)、test(测试)、chore(构建/工具)\n\
             - scope：可选，表示影响范围\n\
             - subject：简短描述，不超过50字符\n\
             - 如果需要，可以在空行后添加详细描述"
        }
        (Language::ZhCn, CommitStyle::Emoji) => {
            "请使用emoji风格的提交信息：\n\
             - ✨ 新功能\n\
             - 🐛 修复bug\n\
             - 📝 文档\n\
             - 💄 样式\n\
             - ♻️ 重构\n\
             - ✅ 测试\n\
             - 🔧 工具/构建\n\
             格式：<emoji> <简短描述>"
        }
        (Language::ZhCn, CommitStyle::Simple) => "请生成简洁明了的提交信息，不超过72字符。",
        (Language::En, CommitStyle::Conventional) => {
            "Please follow Conventional Commits specification:\n\
             - Format: <type>(<scope>): <subject>\n\
             - Types: feat, fix, docs, style, refactor, test, chore\n\
             - scope: optional, indicates the scope of change\n\
             - subject: brief description, max 50 characters\n\
             - Optionally add detailed description after blank line"
        }
        (Language::En, CommitStyle::Emoji) => {
            "Please use emoji-style commit message:\n\
             - ✨ New feature\n\
             - 🐛 Bug fix\n\
             - 📝 Documentation\n\
             - 💄 Style\n\
             - ♻️ Refactor\n\
             - ✅ Test\n\
             - 🔧 Tool/Build\n\
             Format: <emoji> <brief description>"
        }
        (Language::En, CommitStyle::Simple) => {
            "Please generate a concise commit message, max 72 characters."
        }
    }
}

/// Prompt used when nothing is staged but the builder is still invoked
fn empty_diff_prompt(language: Language) -> String {
    match language {
        Language::ZhCn => "暂存区没有任何代码变更。请直接返回：chore: no changes".to_string(),
        Language::En => {
            "There are no staged code changes. Reply with exactly: chore: no changes".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> RepoInfo {
        RepoInfo {
            diff: "+ added line\n".to_string(),
            files: vec!["src/main.rs".to_string(), "README.md".to_string()],
            branch: "feature/login".to_string(),
        }
    }

    #[test]
    fn test_build_prompt_conventional_en_contains_diff_and_instruction() {
        // Arrange
        let info = sample_info();

        // Act
        let prompt = build_prompt(&info, CommitStyle::Conventional, Language::En);

        // Assert - diff text and the conventional-commit instruction both appear
        assert!(prompt.contains("+ added line"));
        assert!(prompt.contains("Conventional Commits"));
        assert!(prompt.contains("Use English"));
        assert!(prompt.contains("- src/main.rs"));
        assert!(prompt.contains("- README.md"));
        assert!(prompt.contains("feature/login"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        // Arrange
        let info = sample_info();

        // Act - same inputs twice, for every (style, language) pair
        for style in [CommitStyle::Conventional, CommitStyle::Simple, CommitStyle::Emoji] {
            for language in [Language::ZhCn, Language::En] {
                let first = build_prompt(&info, style, language);
                let second = build_prompt(&info, style, language);

                // Assert
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_build_prompt_zh_cn_uses_chinese_template() {
        let info = sample_info();

        let prompt = build_prompt(&info, CommitStyle::Conventional, Language::ZhCn);

        assert!(prompt.contains("代码差异"));
        assert!(prompt.contains("Conventional Commits"));
        assert!(prompt.contains("使用中文描述"));
    }

    #[test]
    fn test_build_prompt_emoji_style_lists_emoji() {
        let info = sample_info();

        let prompt = build_prompt(&info, CommitStyle::Emoji, Language::En);

        assert!(prompt.contains("✨ New feature"));
        assert!(prompt.contains("🐛 Bug fix"));
    }

    #[test]
    fn test_build_prompt_simple_style_mentions_length_limit() {
        let info = sample_info();

        let prompt = build_prompt(&info, CommitStyle::Simple, Language::En);

        assert!(prompt.contains("max 72 characters"));
    }

    #[test]
    fn test_build_prompt_empty_diff_requests_fallback_message() {
        // Arrange - nothing staged
        let info = RepoInfo {
            diff: String::new(),
            files: vec![],
            branch: "main".to_string(),
        };

        // Act
        let prompt = build_prompt(&info, CommitStyle::Conventional, Language::En);

        // Assert - fallback instruction instead of a diff block
        assert!(prompt.contains("no staged code changes"));
        assert!(prompt.contains("chore: no changes"));
        assert!(!prompt.contains("```"));
    }

    #[test]
    fn test_build_prompt_whitespace_only_diff_treated_as_empty() {
        let info = RepoInfo {
            diff: "  \n\t\n".to_string(),
            files: vec![],
            branch: "main".to_string(),
        };

        let prompt = build_prompt(&info, CommitStyle::Simple, Language::ZhCn);

        assert!(prompt.contains("chore: no changes"));
    }
}
