use anyhow::{Context, Result};
use pyaudit::cli::output::{self, style, CHECK, CROSS, INFO};
use pyaudit::cli::Cli;
use pyaudit::core::{AnalyzerConfig, Verbosity, PIPELINE};
use pyaudit::execution::{
    EntryPointResolver, FixedEntryPoint, PromptResolver, RunEvent, StepRunner,
};
use pyaudit::tools::{RequirementChecker, SubprocessInvoker, REQUIRED_TOOLS};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Fatal tier: the target must exist before anything runs
    let target = PathBuf::from(&cli.path);
    if !target.exists() {
        eprintln!(
            "{} Path '{}' does not exist",
            CROSS,
            style(target.display()).bold()
        );
        std::process::exit(1);
    }

    // Fatal tier: every unconditionally invoked tool must resolve
    println!("{} Checking requirements...", INFO);
    let missing = RequirementChecker::new(REQUIRED_TOOLS).missing();
    if !missing.is_empty() {
        eprintln!(
            "{} The following required tools are missing: {}",
            CROSS,
            style(missing.join(", ")).red()
        );
        eprintln!("  Please install them before running the analysis.");
        std::process::exit(1);
    }
    println!("{} All required tools are installed", CHECK);

    let config = AnalyzerConfig::new().with_verbosity(if cli.verbose {
        Verbosity::Detailed
    } else {
        Verbosity::Minimal
    });

    // Entry-point resolver for the profiling steps: flag-backed when given,
    // otherwise a live prompt unless prompting is disabled
    let interactive = cli.entry_point.is_none() && !cli.non_interactive;
    let resolver: Box<dyn EntryPointResolver> = if let Some(entry) = cli.entry_point.clone() {
        Box::new(FixedEntryPoint::new(Some(entry)))
    } else if cli.non_interactive {
        Box::new(FixedEntryPoint::none())
    } else {
        Box::new(PromptResolver::new())
    };

    let runner = StepRunner::new(Arc::new(SubprocessInvoker::new()), resolver, config);

    // A steady-tick bar would fight the entry-point prompts, so only
    // non-interactive runs get one
    let progress = if interactive {
        None
    } else {
        Some(output::create_progress_bar(PIPELINE.len()))
    };
    let bar = progress.clone();
    runner.add_event_handler(move |event| {
        let line = output::format_run_event(&event);
        match &bar {
            Some(bar) => {
                bar.println(line);
                match event {
                    RunEvent::StepCompleted { .. }
                    | RunEvent::StepSkipped { .. }
                    | RunEvent::StepUnsupported { .. }
                    | RunEvent::StepFailed { .. } => bar.inc(1),
                    RunEvent::RunCompleted { .. } => bar.finish_and_clear(),
                    _ => {}
                }
            }
            None => println!("{}", line),
        }
    });

    println!();
    let state = runner.run(&target).await;

    // Individual step failures never change the overall exit status
    println!("\n{}", output::format_summary(&state));
    if cli.verbose {
        println!("{}", output::format_step_report(&state));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}
