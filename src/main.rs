//! Operator CLI for the ingestion pipeline
//!
//! `run` ingests the bulk input file when it has rows, otherwise one URL
//! given on the command line or at the prompt. `history` lists the ledger.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;
use std::time::Duration;

use kodegen_tools_ingest::batch_source::{
    BulkPlan, BulkPreparation, ManualAnswer, REPEAT_LAST_SHORTCUT, finish_bulk,
    manual_key_already_ingested, prepare_bulk, resolve_manual_answer, selector_or_default,
};
use kodegen_tools_ingest::ledger::LEDGER_TIMESTAMP_FORMAT;
use kodegen_tools_ingest::logging::init_logging;
use kodegen_tools_ingest::pipeline::{JobHandle, PipelineContext};
use kodegen_tools_ingest::utils::{DEFAULT_RECENT_COUNT, DEFAULT_WAIT_TIMEOUT_SECS, is_valid_url};
use kodegen_tools_ingest::{
    BatchReport, BulkInput, DuplicatePolicy, IngestConfig, IngestionKey, IngestionMethod, Ledger,
    decide_manual,
};

#[derive(Parser)]
#[command(name = "kodegen-ingest")]
#[command(about = "Ingest article pages into CSV datasets without re-ingesting")]
#[command(version)]
struct Cli {
    /// Directory holding the ledger, bulk input and outputs
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Seconds to wait for the selector after navigation
    #[arg(long, default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    wait_timeout: u64,

    /// Show the browser window (debug builds only)
    #[arg(long)]
    headed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the bulk input file, or a single URL when it is empty
    Run {
        /// URL to ingest instead of prompting
        #[arg(long)]
        url: Option<String>,

        /// CSS selector for --url (default: main)
        #[arg(long)]
        selector: Option<String>,

        /// Re-ingest an already ingested URL without asking
        #[arg(long)]
        yes: bool,

        /// What to do with already ingested bulk rows instead of asking
        #[arg(long, value_name = "proceed|skip|abort")]
        on_duplicate: Option<DuplicatePolicy>,
    },

    /// List the most recently ingested URLs and selectors
    History {
        #[arg(short = 'n', long, default_value_t = DEFAULT_RECENT_COUNT)]
        count: usize,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = IngestConfig::builder()
        .base_dir(&cli.base_dir)
        .wait_timeout_secs(cli.wait_timeout)
        .headless(!cli.headed)
        .build()
        .context("Invalid configuration")?;
    let _log_guard = init_logging(&config);

    match cli.command {
        Commands::Run {
            url,
            selector,
            yes,
            on_duplicate,
        } => run(&config, url, selector, yes, on_duplicate).await,
        Commands::History { count } => history(&config.ledger(), count).await,
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn run(
    config: &IngestConfig,
    url: Option<String>,
    selector: Option<String>,
    yes: bool,
    on_duplicate: Option<DuplicatePolicy>,
) -> Result<()> {
    let bulk = BulkInput::new(config.bulk_input_path(), config.default_selector());
    let queued = bulk.queued().await;

    if url.is_none() && !queued.is_empty() {
        return run_bulk(config, &bulk, queued, on_duplicate).await;
    }
    run_manual(config, url, selector, yes).await
}

async fn run_bulk(
    config: &IngestConfig,
    bulk: &BulkInput,
    queued: Vec<IngestionKey>,
    on_duplicate: Option<DuplicatePolicy>,
) -> Result<()> {
    let prep = prepare_bulk(queued, &config.ledger()).await;

    let policy = if prep.needs_decision() {
        match on_duplicate {
            Some(policy) => policy,
            None => prompt_duplicate_policy(&prep)?,
        }
    } else {
        DuplicatePolicy::Proceed
    };

    let keys = match prep.plan(policy) {
        BulkPlan::Run(keys) => keys,
        BulkPlan::Abort { already_seen } => {
            println!(
                "Ingestion aborted: {} URL and selector combinations already ingested.",
                already_seen.len()
            );
            return Ok(());
        }
    };

    let report = run_job(config, keys, IngestionMethod::Bulk).await?;
    finish_bulk(&report, bulk)
        .await
        .context("Failed to clear bulk input")?;
    Ok(())
}

fn prompt_duplicate_policy(prep: &BulkPreparation) -> Result<DuplicatePolicy> {
    for key in &prep.partition.already_seen {
        println!("Already ingested: {key}");
    }

    let choices = [
        DuplicatePolicy::Proceed,
        DuplicatePolicy::Skip,
        DuplicatePolicy::Abort,
    ];
    let labels = [
        "Continue and ingest them again",
        "Skip them",
        "Abort the whole batch",
    ];
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Some URL and selector combinations have already been ingested")
        .items(&labels)
        .default(1)
        .interact()?;
    Ok(choices[picked])
}

async fn run_manual(
    config: &IngestConfig,
    url: Option<String>,
    selector: Option<String>,
    yes: bool,
) -> Result<()> {
    let ledger = config.ledger();
    let key = match url {
        Some(url) if !is_valid_url(url.trim()) => {
            anyhow::bail!("'{url}' is not an http(s) URL");
        }
        Some(url) => IngestionKey::new(
            url.trim(),
            selector_or_default(selector.as_deref(), config.default_selector()),
        ),
        None => prompt_manual_key(config, &ledger).await?,
    };

    let already = manual_key_already_ingested(&key, &ledger).await;
    let confirmed = yes
        || (already
            && Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{key} has already been ingested. Scrape it again?"))
                .default(false)
                .interact()?);

    match decide_manual(already, confirmed) {
        DuplicatePolicy::Proceed => {
            run_job(config, vec![key], IngestionMethod::Manual).await?;
        }
        DuplicatePolicy::Skip | DuplicatePolicy::Abort => {
            println!("Skipping {key}.");
        }
    }
    Ok(())
}

async fn prompt_manual_key(config: &IngestConfig, ledger: &Ledger) -> Result<IngestionKey> {
    let theme = ColorfulTheme::default();
    let recent = ledger
        .recent_keys(config.recent_count())
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Could not read recent ingestions: {e}");
            Vec::new()
        });

    if !recent.is_empty() {
        println!("Recently ingested:");
        for key in &recent {
            println!("  {key}");
        }
    }

    let answer: String = Input::with_theme(&theme)
        .with_prompt(format!(
            "URL to ingest ('{REPEAT_LAST_SHORTCUT}' repeats the previous one)"
        ))
        .validate_with(|input: &String| -> Result<(), &str> {
            match resolve_manual_answer(input, &recent) {
                ManualAnswer::Repeat(_) => Ok(()),
                ManualAnswer::NoRecent => Err("No recent URLs found"),
                ManualAnswer::Target(url) if is_valid_url(&url) => Ok(()),
                ManualAnswer::Target(_) => Err("Enter an http(s) URL, or 'p'"),
            }
        })
        .interact_text()?;

    let (url, previous_selector) = match resolve_manual_answer(&answer, &recent) {
        ManualAnswer::Repeat(last) => (last.target, Some(last.selector)),
        ManualAnswer::NoRecent => anyhow::bail!("No recent URLs found"),
        ManualAnswer::Target(url) => {
            let previous = ledger.lookup_last_selector(&url).await.unwrap_or_default();
            (url, previous)
        }
    };

    if let Some(previous) = previous_selector
        && Confirm::with_theme(&theme)
            .with_prompt(format!("Use the previous selector '{previous}'?"))
            .default(true)
            .interact()?
    {
        return Ok(IngestionKey::new(url, previous));
    }

    let selector: String = Input::with_theme(&theme)
        .with_prompt(format!(
            "CSS selector (default '{}')",
            config.default_selector()
        ))
        .allow_empty(true)
        .interact_text()?;
    Ok(IngestionKey::new(
        url,
        selector_or_default(Some(&selector), config.default_selector()),
    ))
}

/// Run a batch on a background job, streaming its log until it ends.
///
/// Ctrl-C requests cancellation after the URL in flight.
async fn run_job(
    config: &IngestConfig,
    keys: Vec<IngestionKey>,
    method: IngestionMethod,
) -> Result<BatchReport> {
    let job = JobHandle::spawn(
        config.chromium_launcher(),
        config.article_extractor()?,
        keys,
        method,
        PipelineContext::from_config(config),
        config.job_log_capacity(),
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(250));
    let mut ctrl_c = std::pin::pin!(tokio::signal::ctrl_c());
    let mut cancel_sent = false;

    while !job.is_finished() {
        tokio::select! {
            _ = ticker.tick() => {}
            signal = &mut ctrl_c, if !cancel_sent => {
                if let Err(e) = signal {
                    tracing::warn!("Failed to listen for Ctrl-C: {e}");
                } else {
                    eprintln!("Cancelling after the current URL...");
                    job.cancel();
                }
                cancel_sent = true;
            }
        }
        for line in job.drain_log() {
            println!("{line}");
        }
    }

    for line in job.drain_log() {
        println!("{line}");
    }
    let dropped = job.dropped_log_lines();
    if dropped > 0 {
        tracing::debug!("{dropped} job log lines were dropped");
    }

    let report = job.wait().await?;
    println!("{report}");
    Ok(report)
}

async fn history(ledger: &Ledger, count: usize) -> Result<()> {
    let entries = ledger
        .entries()
        .await
        .with_context(|| format!("Failed to read {}", ledger.path().display()))?;

    if entries.is_empty() {
        println!("No ingestions recorded yet.");
        return Ok(());
    }

    let skip = entries.len().saturating_sub(count);
    for entry in entries.iter().skip(skip) {
        println!(
            "{}  {:<8} {:<6} {:>4} rows  {}",
            entry.recorded_at.format(LEDGER_TIMESTAMP_FORMAT),
            entry.status.to_string(),
            entry.method.to_string(),
            entry.row_count,
            entry.key
        );
    }
    Ok(())
}
