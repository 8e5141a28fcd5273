use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};
use crate::wildwatch::entry::MediaType;

#[derive(Debug, Parser)]
#[command(name = "wildwatch", version, about = "Wildlife identification journal")]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit media to the classifier and record each identification.
    Identify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Describe only; do not append to the journal.
        #[arg(long)]
        no_save: bool,
    },
    /// Record an entry from a saved classifier response.
    Record {
        #[arg(long)]
        response: PathBuf,
        #[arg(long)]
        media: PathBuf,
        #[arg(long)]
        media_type: Option<MediaType>,
    },
    /// Render a saved classifier response.
    Show {
        #[arg(long)]
        response: PathBuf,
    },
    /// List journal entries, newest first.
    Journal,
    /// Journal statistics.
    Stats,
    /// Species distribution, habitat exploration and conservation impact.
    Insights {
        #[arg(long)]
        top: Option<usize>,
    },
    /// Remove every journal entry.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Resolved paths, configuration and environment overrides.
    Status,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in &report.details {
        println!("{line}");
    }
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Identify { files, no_save } => {
            commands::identify::run(&commands::identify::IdentifyOptions {
                files,
                save: !no_save,
            })?
        }
        Command::Record {
            response,
            media,
            media_type,
        } => commands::record::run(&response, &media, media_type)?,
        Command::Show { response } => commands::show::run(&response)?,
        Command::Journal => commands::journal::run()?,
        Command::Stats => commands::stats::run()?,
        Command::Insights { top } => commands::insights::run(top)?,
        Command::Clear { yes } => commands::clear::run(yes)?,
        Command::Status => commands::status::run()?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        return Err(anyhow!(
            "{} finished with {} issue(s)",
            report.command,
            report.issues.len()
        ));
    }
    Ok(())
}
