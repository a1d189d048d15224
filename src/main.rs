//! glmr - GitLab merge requests from the command line

mod cli;

use anstream::eprintln;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cli::style::{Stylize, hyperlink};
use gitlab_mr::error::Error;
use gitlab_mr::remote::personal_access_token_url;
use gitlab_mr::types::MrState;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glmr", version, about = "Open, check out, and edit GitLab merge requests")]
struct Cli {
    /// Path to the git working copy
    #[arg(long, global = true, default_value = ".")]
    path: PathBuf,

    /// Remote to use instead of the configured target remote
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push the working copy to a branch and open a merge request
    Open {
        /// Source branch (prompted when omitted)
        #[arg(short, long)]
        branch: Option<String>,
        /// Target branch (defaults to the configured or project default branch)
        #[arg(short, long)]
        target: Option<String>,
        /// Title (prompted when omitted, defaulting to the last commit subject)
        #[arg(long)]
        title: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Delete the source branch once merged (`=false` overrides the preference)
        #[arg(
            long,
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            value_name = "BOOL"
        )]
        remove_source_branch: Option<bool>,
        /// Squash commits when merging
        #[arg(long)]
        squash: bool,
        /// Assignee username (repeatable)
        #[arg(short, long = "assignee")]
        assignees: Vec<String>,
        /// Label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },
    /// List merge requests
    List {
        /// Which merge requests to list
        #[arg(long, value_enum, default_value_t = StateArg::Opened)]
        state: StateArg,
    },
    /// Pick an open merge request and open it in the browser
    View,
    /// Pick an open merge request and check out its source branch
    Checkout,
    /// Pick an open merge request and edit it
    Edit,
    /// List project labels
    Labels,
    /// Search GitLab users
    Users {
        /// Name or username to search for
        query: String,
    },
    /// Store a personal access token
    Auth {
        /// API base URL of the GitLab instance (default: https://gitlab.com)
        #[arg(long)]
        host: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StateArg {
    Opened,
    Closed,
    Merged,
    All,
}

impl From<StateArg> for MrState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Opened => Self::Opened,
            StateArg::Closed => Self::Closed,
            StateArg::Merged => Self::Merged,
            StateArg::All => Self::All,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("gitlab_mr=debug,glmr=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.path.as_path();
    let remote = cli.remote.as_deref();

    match cli.command {
        Commands::Open {
            branch,
            target,
            title,
            description,
            remove_source_branch,
            squash,
            assignees,
            labels,
        } => {
            let options = cli::OpenOptions {
                branch,
                target,
                title,
                description,
                remove_source_branch,
                squash,
                assignees,
                labels,
            };
            cli::run_open(path, remote, options).await?;
        }
        Commands::List { state } => cli::run_list(path, remote, state.into()).await?,
        Commands::View => cli::run_view(path, remote).await?,
        Commands::Checkout => cli::run_checkout(path, remote).await?,
        Commands::Edit => cli::run_edit(path, remote).await?,
        Commands::Labels => cli::run_labels(path, remote).await?,
        Commands::Users { query } => cli::run_users(path, remote, &query).await?,
        Commands::Auth { host } => {
            cli::run_auth(host.as_deref()).context("could not store access token")?;
        }
    }
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "error:".failure());
    if let Some(Error::MissingAccessToken { api_url }) = err.downcast_ref::<Error>() {
        let token_page = personal_access_token_url(api_url);
        eprintln!(
            "  {} {}",
            "Create one at".muted(),
            hyperlink(&token_page, &token_page)
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
