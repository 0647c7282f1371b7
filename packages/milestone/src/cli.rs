//! Command-line interface for the milestone splitter.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{OutputMode, SplitOptions, DEFAULT_MILESTONE_TAG, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::output::ensure_dir;
use crate::splitter::{FileOutcome, Splitter};

/// Split XML at a given milestone tag.
#[derive(Parser, Debug)]
#[command(name = "milestone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Milestone tag to split input
    #[arg(short, long, default_value = DEFAULT_MILESTONE_TAG)]
    pub tag: String,

    /// Attribute name to use to name parts (default: sequential numbers)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Transform the file without splitting; print the result to stdout
    #[arg(short = 'x', long)]
    pub transform: bool,

    /// Input file or files
    pub inputfiles: Vec<PathBuf>,
}

impl Cli {
    /// Splitter options described by the flags.
    pub fn options(&self) -> SplitOptions {
        let mode = if self.transform {
            OutputMode::Transform
        } else {
            OutputMode::Split
        };
        let options = SplitOptions::new(&self.tag)
            .with_output_dir(&self.output)
            .with_mode(mode);
        match &self.name {
            Some(name) => options.with_name_attribute(name),
            None => options,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    run_with(Cli::parse())
}

/// Run with already parsed arguments.
pub fn run_with(cli: Cli) -> Result<()> {
    if cli.inputfiles.is_empty() {
        return Ok(());
    }

    let splitter = Splitter::new(cli.options())?;
    ensure_dir(&cli.output)?;

    let pb = if cli.transform || cli.inputfiles.len() < 2 {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(cli.inputfiles.len() as u64);
        #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{pos}/{len}] {msg}")
                .expect("valid template"),
        );
        pb
    };

    let result = splitter.split_files_with(&cli.inputfiles, |input, outcome| {
        pb.set_message(input.display().to_string());
        if let FileOutcome::Written(written) = outcome {
            pb.suspend(|| {
                println!(
                    "{} {} into {} segments in {}",
                    style("Split").bold(),
                    style(input.display()).cyan(),
                    style(written.files.len()).green(),
                    written.directory.display()
                );
            });
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    if let Some(transformed) = result? {
        println!("{transformed}");
    }

    Ok(())
}
