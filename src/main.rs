//! CLI tool to generate git commit messages using the DeepSeek API
//!
//! Flags without the `run` subcommand update the persisted configuration;
//! `run [path]` executes the pipeline: staged diff -> prompt -> API ->
//! encoded stdout.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deepseek_commit::{
    api::ApiClient,
    config::{default_config_path, CommitStyle, Config, Language, OutputEncoding},
    error::{AppError, GitError},
    git,
    output::print_message,
    prompt::build_prompt,
};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "dsc")]
#[command(version)]
#[command(about = "Generate git commit messages using the DeepSeek API", long_about = None)]
struct Args {
    /// Set and persist the DeepSeek API key
    #[arg(long)]
    api_key: Option<String>,

    /// Set and persist the commit message style
    #[arg(long, value_enum)]
    commit_style: Option<CommitStyle>,

    /// Set and persist the output language
    #[arg(long, value_enum)]
    language: Option<Language>,

    /// Set and persist the output byte encoding
    #[arg(long, value_enum)]
    encoding: Option<OutputEncoding>,

    /// Set and persist the sampling temperature (0.1-1.0)
    #[arg(long)]
    temperature: Option<f32>,

    /// Set and persist the maximum diff length in characters (>=100)
    #[arg(long)]
    max_diff_length: Option<usize>,

    /// Print the current configuration (API key masked)
    #[arg(long)]
    show_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a commit message for the staged changes of a repository
    Run {
        /// Git repository path (defaults to the current directory)
        repository_path: Option<PathBuf>,

        /// Output encoding for this run only, overrides the configured one
        #[arg(long, value_enum)]
        encoding: Option<OutputEncoding>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Bare invocation prints usage, same as the long help
    if env::args().len() <= 1 {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    }

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let config_path = default_config_path()?;
    let mut config = Config::load(&config_path)?;

    if args.show_config {
        print_config(&config);
        return Ok(());
    }

    // Setter flags update the config and persist it before anything runs
    let mut changed = false;
    if let Some(key) = args.api_key {
        config.api_key = key.trim().to_string();
        changed = true;
    }
    if let Some(style) = args.commit_style {
        config.commit_style = style;
        changed = true;
    }
    if let Some(language) = args.language {
        config.language = language;
        changed = true;
    }
    if let Some(encoding) = args.encoding {
        config.encoding = encoding;
        changed = true;
    }
    if let Some(temperature) = args.temperature {
        config.set_temperature(temperature)?;
        changed = true;
    }
    if let Some(max_diff_length) = args.max_diff_length {
        config.set_max_diff_length(max_diff_length)?;
        changed = true;
    }
    if changed {
        config.save(&config_path)?;
        eprintln!("{}", notice_config_updated(config.language));
    }

    match args.command {
        Some(Command::Run {
            repository_path,
            encoding,
        }) => generate(&config, repository_path, encoding).await,
        None => {
            if !changed {
                let _ = Args::command().print_help();
            }
            Ok(())
        }
    }
}

/// Execute the diff -> prompt -> API -> stdout pipeline
async fn generate(
    config: &Config,
    repository_path: Option<PathBuf>,
    encoding_override: Option<OutputEncoding>,
) -> Result<(), AppError> {
    let repo = match repository_path {
        Some(path) => {
            if !path.exists() {
                return Err(GitError::PathNotFound(path.display().to_string()).into());
            }
            path
        }
        None => PathBuf::from("."),
    };

    // Nothing staged is not an error; say so on stderr and keep stdout clean
    if !git::has_staged_changes(&repo)? {
        eprintln!("{}", notice_no_staged_changes(config.language));
        return Ok(());
    }

    // Only validate the full config (API key included) once a request is due
    config.validate()?;

    let info = git::repo_info(&repo, config.max_diff_length)?;
    let prompt = build_prompt(&info, config.commit_style, config.language);

    let client = ApiClient::new(config)?;
    let message = client.generate(&prompt).await?;

    let encoding = encoding_override.unwrap_or(config.encoding);
    print_message(&message, encoding)?;
    Ok(())
}

fn print_config(config: &Config) {
    println!("api_key: {}", config.masked_api_key());
    println!("model: {}", config.model);
    println!("commit_style: {}", config.commit_style);
    println!("language: {}", config.language);
    println!("encoding: {}", config.encoding);
    println!("temperature: {}", config.temperature);
    println!("max_diff_length: {}", config.max_diff_length);
    println!("api_base_url: {}", config.api_base_url);
}

fn notice_config_updated(language: Language) -> &'static str {
    match language {
        Language::ZhCn => "配置已更新",
        Language::En => "Configuration updated",
    }
}

fn notice_no_staged_changes(language: Language) -> &'static str {
    match language {
        Language::ZhCn => "没有暂存的更改",
        Language::En => "No staged changes",
    }
}
