use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use semtag::ci::CiEnvironment;
use semtag::cli::{TagOutcome, TagPlan, Validation, Workflow, WorkflowOptions};
use semtag::config::{self, Config, Overrides};
use semtag::git::{AuthMethod, Git2Repository};
use semtag::ui;

#[derive(Parser)]
#[command(
    name = "semtag",
    version,
    about = "Create and push semantic version tags based on conventional commits"
)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(short, long, global = true, env = "SEMTAG_CONFIG", help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, global = true, env = "SEMTAG_REPO", default_value = ".", help = "Path to the git repository")]
    repo: PathBuf,

    #[arg(long, global = true, env = "SEMTAG_DEBUG", value_parser = BoolishValueParser::new(), help = "Enable debug logging")]
    debug: bool,

    #[arg(long, global = true, env = "SEMTAG_REMOTE_NAME", help = "Remote to push tags to")]
    remote_name: Option<String>,

    #[arg(long, global = true, env = "SEMTAG_AUTH_METHOD", help = "Push authentication [public-key, token]")]
    auth_method: Option<AuthMethod>,

    #[arg(long, global = true, env = "SEMTAG_AUTH_TOKEN", hide_env_values = true, help = "Token for HTTPS pushes")]
    auth_token: Option<String>,

    #[arg(long, global = true, env = "SEMTAG_AUTH_TOKEN_USERNAME", help = "Username sent with the token")]
    auth_token_username: Option<String>,

    #[arg(long, global = true, env = "SEMTAG_AUTH_KEY_PATH", help = "SSH private key for SSH pushes")]
    auth_key_path: Option<PathBuf>,

    #[arg(long, global = true, env = "SEMTAG_ALWAYS_PATCH", value_parser = BoolishValueParser::new(), help = "Tag a patch release even without fixes or features")]
    always_patch: bool,

    #[arg(long, global = true, env = "SEMTAG_LATEST", value_parser = BoolishValueParser::new(), help = "Move an alias tag to every new release")]
    latest: bool,

    #[arg(long, global = true, env = "SEMTAG_LATEST_NAME", help = "Name of the alias tag")]
    latest_name: Option<String>,

    #[arg(long, global = true, env = "SEMTAG_NO_PREFIX", value_parser = BoolishValueParser::new(), help = "Write tags without the 'v' prefix")]
    no_prefix: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create and push the next tag (default)
    Tag,
    /// Show the next tag without creating it
    Next,
    /// Validate a commit message file, for use as a commit-msg hook
    CommitMsg {
        /// File holding the commit message
        file: PathBuf,
    },
    /// Validate every commit of a pull request against its base branch
    PullRequest {
        /// Base branch, inferred from the CI environment when omitted
        #[arg(short, long, env = "SEMTAG_BASE_BRANCH")]
        base_branch: Option<String>,
    },
    /// Print version information
    Version,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let base_branch = match &self.command {
            Some(Command::PullRequest { base_branch }) => base_branch.clone(),
            _ => None,
        };

        Overrides {
            remote_name: self.remote_name.clone(),
            always_patch: self.always_patch,
            latest: self.latest,
            latest_name: self.latest_name.clone(),
            no_prefix: self.no_prefix,
            base_branch,
            auth_method: self.auth_method,
            auth_token: self.auth_token.clone(),
            auth_token_username: self.auth_token_username.clone(),
            auth_key_path: self.auth_key_path.clone(),
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(Command::Version) = args.command {
        println!("semtag {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(args.overrides());

    let repo = open_repository(&args.repo, &config)?;
    let workflow = Workflow::new(&repo, WorkflowOptions::from(&config));

    match args.command {
        None | Some(Command::Tag) => tag(&workflow),
        Some(Command::Next) => next(&workflow),
        Some(Command::CommitMsg { file }) => commit_msg(&workflow, &file),
        Some(Command::PullRequest { .. }) => {
            pull_request(&workflow, config.base_branch.as_deref())
        }
        Some(Command::Version) => Ok(()),
    }
}

fn open_repository(path: &Path, config: &Config) -> Result<Git2Repository> {
    let repo = Git2Repository::open(path)
        .with_context(|| format!("Failed to open git repository at '{}'", path.display()))?;

    Ok(repo
        .with_remote(config.remote_name.clone())
        .with_auth(config.push_auth()))
}

fn show_plan(plan: &TagPlan) {
    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }

    ui::display_commit_analysis(&plan.commits, plan.latest_tag.as_deref(), plan.decision.bump);

    if let Some(new_tag) = &plan.new_tag {
        ui::display_proposed_tag(plan.latest_tag.as_deref(), new_tag);
    }
}

fn tag(workflow: &Workflow<'_, Git2Repository>) -> Result<()> {
    let plan = workflow.plan().context("Failed to compute the next tag")?;
    show_plan(&plan);

    match workflow.apply(plan).context("Failed to publish tag")? {
        TagOutcome::UpToDate { latest_tag } => {
            let latest = latest_tag.as_deref().unwrap_or("no tag");
            ui::display_success(&format!("Up to date at {}", latest));
        }
        TagOutcome::Created { tag, alias } => {
            ui::display_success(&format!("Created and pushed tag {}", tag));
            if let Some(alias) = alias {
                ui::display_success(&format!("Moved tag {} to {}", alias, tag));
            }
            CiEnvironment::from_env()
                .emit_tag(&tag)
                .context("Failed to write CI step output")?;
        }
    }

    Ok(())
}

fn next(workflow: &Workflow<'_, Git2Repository>) -> Result<()> {
    let plan = workflow.next().context("Failed to compute the next tag")?;
    show_plan(&plan);

    if plan.new_tag.is_none() {
        ui::display_success("Up to date, no new tag required");
    }
    Ok(())
}

fn commit_msg(workflow: &Workflow<'_, Git2Repository>, file: &Path) -> Result<()> {
    let message = fs::read_to_string(file)
        .with_context(|| format!("Failed to read commit message file '{}'", file.display()))?;

    report(workflow.validate_commit_message(&message)?);
    Ok(())
}

fn pull_request(workflow: &Workflow<'_, Git2Repository>, base: Option<&str>) -> Result<()> {
    let ci = CiEnvironment::from_env();
    report(workflow.validate_pull_request(base, &ci)?);
    Ok(())
}

fn report(validation: Validation) {
    match validation {
        Validation::Passed { checked } => {
            let noun = if checked == 1 { "commit" } else { "commits" };
            ui::display_success(&format!("{} {} follow the conventions", checked, noun));
        }
        Validation::Skipped(warning) => ui::display_boundary_warning(&warning),
    }
}
