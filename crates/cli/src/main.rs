use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tariff_core::config::Settings;
use tariff_core::ingest::{DatasetPaths, MarketContext};
use tariff_core::llm::error::LlmDiagnosticsError;
use tariff_core::report::ReportError;
use tariff_core::time::AnalysisPeriod;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod views;

#[derive(Debug, Parser)]
#[command(name = "tariff-report", about = "Effects of tariffs on global markets")]
struct Args {
    /// Market indices CSV. Defaults to INDICES_CSV or ./global_indices.csv.
    #[arg(long, global = true)]
    indices: Option<PathBuf>,

    /// Finance news CSV. Defaults to NEWS_CSV or ./global_finance_news.csv.
    #[arg(long, global = true)]
    news: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summary cards and indices ranked from most to least affected.
    Overview,

    /// Headlines, newest first.
    News {
        /// Country to show, or "All Countries".
        #[arg(long, default_value = "All Countries")]
        country: String,

        /// Print the available countries instead of the feed.
        #[arg(long)]
        list_countries: bool,
    },

    /// Generate the AI analysis and write the HTML report.
    Report {
        /// Directory to write the report into. Defaults to REPORT_OUTPUT_DIR or ".".
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also print the report as a data: URI download link.
        #[arg(long)]
        data_uri: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let mut paths = DatasetPaths::from_settings(&settings);
    if let Some(p) = args.indices {
        paths.indices = p;
    }
    if let Some(p) = args.news {
        paths.news = p;
    }

    let ctx = MarketContext::load(&paths);
    for diagnostic in ctx.diagnostics() {
        eprintln!("{diagnostic}");
    }

    let period = AnalysisPeriod::default();

    match args.command {
        Command::Overview => views::print_overview(&ctx, &period),
        Command::News {
            country,
            list_countries,
        } => {
            if list_countries {
                views::print_countries(&ctx);
            } else {
                views::print_news(&ctx, &country);
            }
        }
        Command::Report { out_dir, data_uri } => {
            let out_dir = out_dir.unwrap_or_else(|| settings.report_output_dir.clone());
            run_report(&settings, &ctx, &period, out_dir, data_uri).await;
        }
    }

    Ok(())
}

/// Report failures are shown in place of the report; the process still exits cleanly.
async fn run_report(
    settings: &Settings,
    ctx: &MarketContext,
    period: &AnalysisPeriod,
    out_dir: PathBuf,
    data_uri: bool,
) {
    if ctx.indices().is_empty() {
        eprintln!("No data available for analysis.");
        return;
    }

    let client = match tariff_core::llm::gemini::GeminiClient::from_settings(settings) {
        Ok(client) => client,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            let detail = format!("{err:#}");
            tracing::error!(error = %detail, "report generation not configured");
            eprintln!("Gemini API key not configured: {detail}");
            return;
        }
    };

    eprintln!("Generating AI-powered analysis...");
    let generated_at = chrono::Utc::now();
    let result =
        tariff_core::report::generate_document(ctx, &client, period, generated_at).await;

    match result {
        Ok(Some(document)) => match document.write_to(&out_dir) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "report written");
                println!("Report written to {}", path.display());
                if data_uri {
                    println!("{}", document.data_uri());
                }
            }
            Err(err) => {
                sentry_anyhow::capture_anyhow(&err);
                eprintln!("Failed to save report: {err:#}");
            }
        },
        Ok(None) => {
            eprintln!("The model returned an empty report; nothing to save.");
        }
        Err(err) => {
            if let ReportError::Generation(inner) = &err {
                if let Some(diag) = inner.downcast_ref::<LlmDiagnosticsError>() {
                    tracing::error!(stage = %diag.stage, raw_output = ?diag.raw_output, "LLM call failed");
                }
            }
            let err = anyhow::Error::new(err);
            sentry_anyhow::capture_anyhow(&err);
            let detail = format!("{err:#}");
            tracing::error!(error = %detail, "report generation failed");
            eprintln!("Failed to generate report: {detail}");
        }
    }
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
