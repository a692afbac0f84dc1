//! merger - merge labeled pull requests once their checks pass

mod cli;

use clap::Parser;
use pr_merger::types::MergeMethod;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Merge labeled pull requests whose checks have all passed
#[derive(Parser, Debug)]
#[command(name = "merger", version, about, long_about = None)]
struct Cli {
    /// GitHub token used for authentication. Uses GITHUB_TOKEN if not provided.
    #[arg(long)]
    token: Option<String>,

    /// Repository to merge pull requests in, as <owner>/<repo>. Uses GITHUB_REPOSITORY if not
    /// provided.
    #[arg(long)]
    repository: Option<String>,

    /// Only pull requests with this label are checked and merged.
    #[arg(long)]
    label: Option<String>,

    /// GitHub Enterprise host (e.g. github.example.com). Defaults to github.com.
    #[arg(long)]
    host: Option<String>,

    /// Merge method to use.
    #[arg(long, value_enum, default_value_t = MergeMethod::Merge)]
    merge_method: MergeMethod,

    /// Check pull requests and report what would be merged, without merging.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let command = cli::MergeCommand {
        inputs: pr_merger::config::ConfigInputs {
            token: args.token,
            repository: args.repository,
            label: args.label,
        },
        host: args.host,
        method: args.merge_method,
        dry_run: args.dry_run,
    };

    match cli::run_merge(command).await {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            cli::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
