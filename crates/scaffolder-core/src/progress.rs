//! User-facing progress reporting

use crate::templates::CopyStats;
use colored::Colorize;
use std::path::PathBuf;

/// Something the user should see while a project is being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { display_name: &'static str },
    LocalTemplate(PathBuf),
    Downloading { package: String },
    Copying { from: PathBuf, to: PathBuf },
    Copied(CopyStats),
    Installing,
    Warning(String),
    Done {
        display_name: &'static str,
        next_steps: Vec<String>,
    },
    Failed(String),
}

/// Receives progress events
pub trait Progress {
    fn report(&self, event: ProgressEvent);
}

/// Plain colored lines on stdout/stderr, for non-interactive output
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainProgress;

impl Progress for PlainProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Started { display_name } => {
                println!("{}", format!("Creating a {} project", display_name).cyan().bold());
            }
            ProgressEvent::LocalTemplate(dir) => {
                println!("{} {}", "Using local template files from:".dimmed(), dir.display());
            }
            ProgressEvent::Downloading { package } => {
                println!("📦 Downloading template {}...", package.cyan());
            }
            ProgressEvent::Copying { .. } => println!("📋 Copying template files..."),
            ProgressEvent::Copied(stats) => {
                println!("  {} {} files", "->".blue(), stats.files);
            }
            ProgressEvent::Installing => println!("📥 Installing dependencies..."),
            ProgressEvent::Warning(message) => {
                eprintln!("{} {}", "Warning:".yellow(), message);
            }
            ProgressEvent::Done {
                display_name,
                next_steps,
            } => {
                println!();
                println!(
                    "{}",
                    format!("✨ {} project initialized successfully!", display_name)
                        .green()
                        .bold()
                );
                print_next_steps(&next_steps);
            }
            ProgressEvent::Failed(message) => {
                eprintln!("{} {}", "Error:".red().bold(), message);
            }
        }
    }
}

pub(crate) fn print_next_steps(steps: &[String]) {
    if steps.is_empty() {
        return;
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}
