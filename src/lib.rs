//! DeepSeek Commit - Automatic Git Commit Message Generator
//!
//! This library reads the staged diff of a local git repository, sends it
//! to the DeepSeek chat-completions API, and returns a generated commit
//! message in a configurable style, language, and output encoding.
//!
//! # Modules
//!
//! - [`config`] - Persistent user configuration (API key, style, language, encoding)
//! - [`git`] - Git operations (staged diff, file list, branch)
//! - [`prompt`] - Prompt construction from repository state
//! - [`api`] - DeepSeek API client
//! - [`output`] - Output encoding (UTF-8 / GBK) and writing
//! - [`error`] - Typed errors with per-kind exit codes
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use deepseek_commit::{api::ApiClient, config::Config, git, prompt::build_prompt};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::load(Path::new("config.toml"))?;
//! let info = git::repo_info(Path::new("."), config.max_diff_length)?;
//! let prompt = build_prompt(&info, config.commit_style, config.language);
//! let message = ApiClient::new(&config)?.generate(&prompt).await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod prompt;
