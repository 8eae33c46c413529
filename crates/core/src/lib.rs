pub mod domain;
pub mod ingest;
pub mod storage;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_RANKINGS_DIR: &str = "rankings";
    pub const DEFAULT_RECORDS_API_URL: &str =
        "https://engage-api.boostsport.ai/api/sport/mbb/standings/table?seasons=2025&conference=Big%20Ten";
    pub const DEFAULT_TORVIK_URL: &str = "https://barttorvik.com/2026_team_results.json";
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub rankings_dir: PathBuf,
        pub archive_dir: Option<PathBuf>,
        pub records_api_url: String,
        pub torvik_url: String,
        pub http_timeout_secs: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let http_timeout_secs = match std::env::var("HTTP_TIMEOUT_SECS") {
                Ok(s) => s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be an integer (got {s:?})"))?,
                Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
            };

            Ok(Self {
                rankings_dir: std::env::var("RANKINGS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_RANKINGS_DIR)),
                archive_dir: std::env::var("ARCHIVE_DIR").ok().map(PathBuf::from),
                records_api_url: std::env::var("RECORDS_API_URL")
                    .unwrap_or_else(|_| DEFAULT_RECORDS_API_URL.to_string()),
                torvik_url: std::env::var("TORVIK_URL")
                    .unwrap_or_else(|_| DEFAULT_TORVIK_URL.to_string()),
                http_timeout_secs,
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// Archive directory, falling back to `<rankings_dir>/archives`.
        pub fn resolved_archive_dir(&self) -> PathBuf {
            self.archive_dir
                .clone()
                .unwrap_or_else(|| self.rankings_dir.join(crate::storage::archive::ARCHIVES_SUBDIR))
        }
    }
}
