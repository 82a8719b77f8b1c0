mod args;
mod logging;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use log::info;
use orfstarts_core::config::{CallFormat, StartsConfig};
use orfstarts_core::pipeline;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let mut config = StartsConfig {
        num_threads: cli.threads,
        ..Default::default()
    };
    config.configure_threads()?;

    match cli.command {
        Commands::Predict {
            fasta,
            predictions,
            output,
        } => {
            let out = open_output(output.as_deref())?;
            let summary = pipeline::predict(&fasta, &predictions, out).with_context(|| {
                format!(
                    "Failed to build features from {} and {}",
                    fasta.display(),
                    predictions.display()
                )
            })?;
            info!(
                "{} candidates from {} contigs ({} skipped)",
                summary.candidates, summary.contigs, summary.skipped
            );
        }

        Commands::Test {
            fasta,
            features,
            predictions,
            roles,
            strand,
            output,
        } => {
            config.strand = strand;
            config.role_map = roles;
            let out = open_output(output.as_deref())?;
            let summary = pipeline::label(&fasta, &features, &predictions, &config, out)
                .with_context(|| {
                    format!(
                        "Failed to build labeled features from {}, {} and {}",
                        fasta.display(),
                        features.display(),
                        predictions.display()
                    )
                })?;
            info!(
                "{} candidates ({} true starts) from {} contigs ({} skipped)",
                summary.candidates, summary.true_starts, summary.contigs, summary.skipped
            );
        }

        Commands::Finish {
            predictions,
            calls,
            alt,
            output,
        } => {
            if alt {
                config.call_format = CallFormat::Compact;
            }
            let out = open_output(output.as_deref())?;
            let summary = pipeline::finish(&predictions, &calls, &config, out).with_context(|| {
                format!(
                    "Failed to resolve starts in {} against {}",
                    calls.display(),
                    predictions.display()
                )
            })?;
            info!(
                "{} starts accepted, {} rejected",
                summary.accepted, summary.rejected
            );
        }
    }

    Ok(())
}
