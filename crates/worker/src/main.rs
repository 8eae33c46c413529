use clap::Parser;
use std::path::PathBuf;
use big18_core::ingest::standings::StandingsClient;
use big18_core::ingest::torvik::TorvikClient;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod finalize;

#[derive(Debug, Parser)]
#[command(name = "big18_worker")]
struct Args {
    /// Directory holding the active YYYY-MM-DD.json rankings file and template.json.
    /// Defaults to RANKINGS_DIR, then ./rankings.
    #[arg(long)]
    rankings_dir: Option<PathBuf>,

    /// Directory of archived snapshots. Defaults to ARCHIVE_DIR, then <rankings-dir>/archives.
    #[arg(long)]
    archive_dir: Option<PathBuf>,

    /// Do everything except writing the rankings file.
    #[arg(long)]
    dry_run: bool,
}

// One run, strictly sequential: no worker threads needed.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = big18_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(dir) = args.rankings_dir {
        settings.rankings_dir = dir;
    }
    if let Some(dir) = args.archive_dir {
        settings.archive_dir = Some(dir);
    }

    let opts = finalize::FinalizeOptions {
        rankings_dir: settings.rankings_dir.clone(),
        archive_dir: settings.resolved_archive_dir(),
        dry_run: args.dry_run,
    };

    let win_loss = StandingsClient::from_settings(&settings)?;
    let power_ranks = TorvikClient::from_settings(&settings)?;

    match finalize::run(&opts, &win_loss, &power_ranks).await {
        Ok(summary) => {
            tracing::info!(
                path = %summary.path.display(),
                as_of_date = %summary.as_of_date,
                updated = summary.updated,
                missing = summary.missing.len(),
                written = summary.written,
                "finalize run complete"
            );
            Ok(())
        }
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %format!("{err:#}"), "finalize run failed");
            Err(err)
        }
    }
}

fn init_sentry(settings: &big18_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
