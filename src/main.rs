use anyhow::{Context, Result};
use api_responsiveness::cli::{Cli, Mode, OutputFormat};
use api_responsiveness::json_output::JsonOutput;
use api_responsiveness::regression::{compare_snapshots, rank_by_volume};
use api_responsiveness::report::render_ranking;
use api_responsiveness::snapshot::ApiResponsiveness;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_snapshot(path: &Path, role: &str) -> Result<ApiResponsiveness> {
    ApiResponsiveness::from_file(path)
        .with_context(|| format!("error while parsing {}: {}", role, path.display()))
}

/// Compare the result against the baseline; returns whether the run should fail
fn run_compare(args: &Cli, result: &ApiResponsiveness) -> Result<bool> {
    let Some(baseline_path) = &args.baseline else {
        anyhow::bail!("compare mode requires --baseline <PATH>");
    };
    let baseline = load_snapshot(baseline_path, "baseline")?;

    let config = args.comparator_config();
    let comparison = compare_snapshots(&baseline, result, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", comparison.to_report_string()),
        OutputFormat::Json => {
            println!("{}", JsonOutput::from_comparison(&comparison, &config).to_json()?)
        }
    }

    Ok(comparison.should_fail(&config))
}

fn run_sort(result: &ApiResponsiveness) -> Result<()> {
    let ranked = rank_by_volume(result.records())?;
    print!("{}", render_ranking(&ranked));
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Both snapshots are fully loaded before anything is printed
    let result = load_snapshot(&args.result, "result")?;

    match args.mode {
        Mode::Compare => {
            if run_compare(&args, &result)? {
                tracing::debug!("Regressions detected with --fail-on-regression set");
                std::process::exit(1);
            }
        }
        Mode::Sort => run_sort(&result)?,
    }

    Ok(())
}
