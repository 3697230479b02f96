//! Mirror command implementation
//!
//! Runs the whole pipeline for one account:
//! 1. Read the profile URL (argument, or prompt on stdin)
//! 2. Extract the account handle
//! 3. List every repository of the account
//! 4. Clone missing repositories and pull existing ones

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use gh_mirror::config::{MirrorConfig, DEFAULT_API_URL, DEFAULT_GIT_PROGRAM};
use gh_mirror::handle::extract_handle;
use gh_mirror::listing::{list_all_repositories, HttpPageSource};
use gh_mirror::mirror::{SyncOptions, Synchronizer};
use gh_mirror::output::{emoji, OutputConfig};
use gh_mirror::repository::DefaultGitOperations;

const PROMPT: &str = "Enter the GitHub profile URL (e.g., https://github.com/username)";

/// Arguments for the mirror command
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// GitHub profile URL, e.g. https://github.com/octocat (prompted for when omitted)
    #[arg(value_name = "PROFILE_URL")]
    pub profile_url: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GH_MIRROR_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory in which the github_repos_of_<user> folder is created
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "GH_MIRROR_OUTPUT_DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    /// Program used for clone and pull
    #[arg(long, value_name = "PROGRAM", env = "GH_MIRROR_GIT", default_value = DEFAULT_GIT_PROGRAM)]
    pub git: String,

    /// Number of repositories to synchronize at once
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Continue with the remaining repositories when one fails
    #[arg(long)]
    pub keep_going: bool,
}

impl MirrorArgs {
    fn to_config(&self) -> MirrorConfig {
        MirrorConfig {
            api_url: self.api_url.clone(),
            output_dir: self.output_dir.clone(),
            git_program: self.git.clone(),
            sync: SyncOptions {
                jobs: self.jobs,
                keep_going: self.keep_going,
            },
        }
    }
}

/// Execute the mirror command
pub fn execute(args: MirrorArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    let config = args.to_config();
    config.validate()?;

    let profile_url = match args.profile_url {
        Some(url) => url,
        None => prompt_profile_url()?,
    };

    let handle = match extract_handle(&profile_url) {
        Ok(handle) => handle,
        Err(e) => {
            println!(
                "{} Invalid GitHub URL format. It should start with 'https://github.com/'",
                emoji(output, "❌", "[ERROR]")
            );
            return Err(e.into());
        }
    };

    println!(
        "{} Fetching repositories of {}",
        emoji(output, "🔍", "[SCAN]"),
        handle
    );
    let source = HttpPageSource::new(&config.api_url);
    let repos = list_all_repositories(&source, &handle)?;

    if repos.is_empty() {
        println!("No repositories found for this user.");
        return Ok(());
    }

    println!();
    println!("{}", output.found_line(repos.len()));

    let git_ops = DefaultGitOperations::new(config.git_program.clone())
        .capture_output(config.captures_git_output());
    let synchronizer = Synchronizer::new(Box::new(git_ops), config.sync);

    let report = synchronizer.synchronize(&repos, &handle, &config.output_dir, |action| {
        println!();
        println!("{}", output.action_line(action));
    })?;

    if !report.is_success() {
        println!();
        println!(
            "{} {} of {} repositories failed:",
            emoji(output, "❌", "[ERROR]"),
            report.failures.len(),
            repos.len()
        );
        for failure in &report.failures {
            println!("   {}: {}", failure.name, failure.error);
        }
        anyhow::bail!(
            "{} repositories could not be synchronized",
            report.failures.len()
        );
    }

    println!();
    println!("{}", output.success_banner());
    println!(
        "   {} cloned, {} updated in {:.2}s",
        report.cloned,
        report.updated,
        start_time.elapsed().as_secs_f64()
    );
    println!("   Mirror: {}", report.mirror_root.display());

    Ok(())
}

/// Read the profile URL interactively, or as one line from piped stdin.
fn prompt_profile_url() -> Result<String> {
    if io::stdin().is_terminal() {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(PROMPT)
            .interact_text()?;
        return Ok(input);
    }

    print!("{}: ", PROMPT);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
