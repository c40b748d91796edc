use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::{self, filter::EnvFilter};

use symfony_class_inliner::config::ServiceConfig;
use symfony_class_inliner::progress::{Phase, ProgressReporter};
use symfony_class_inliner::service::InlineService;

/// Inline Symfony `*.class` parameters into service definitions
#[derive(Parser, Debug)]
#[command(name = "symfony-class-inliner")]
#[command(
    about = "Processes all Yaml files in the given directory and its subdirectories to extract \
             .class parameters and make them inline in service definitions. \
             WARNING: it preloads all the files into memory"
)]
#[command(version)]
struct Args {
    /// Directory scanned recursively for *.yml and *.yaml files
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

/// Progress reporter backed by one indicatif bar per phase.
#[derive(Default)]
struct ConsoleProgress {
    bar: Option<ProgressBar>,
    label: &'static str,
}

impl ProgressReporter for ConsoleProgress {
    fn begin(&mut self, phase: Phase, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(" {pos}/{len} [{bar:40}] | {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        bar.set_message(phase.label());
        self.label = phase.label();
        self.bar = Some(bar);
    }

    fn file(&mut self, path: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{}: {}", self.label, path.display()));
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ServiceConfig {
        root_directory: args.dir,
        ..ServiceConfig::default()
    };

    let service = InlineService::with_config(config);
    let mut progress = ConsoleProgress::default();
    let summary = service.run(&mut progress)?;

    println!("Found {} Yaml files", summary.files);
    println!("Found {} class parameters", summary.class_parameters);
    println!("Updated {} files", summary.files_changed);

    Ok(())
}
