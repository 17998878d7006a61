use chrono::NaiveDate;
use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;

/// Default Zoom REST API base URL used when `ZOOM_API_BASE_URL` is not set.
pub const DEFAULT_ZOOM_API_BASE_URL: &str = "https://api.zoom.us";

/// Default Zoom OAuth token endpoint used when `ZOOM_OAUTH_TOKEN_URL` is not set.
pub const DEFAULT_ZOOM_OAUTH_TOKEN_URL: &str = "https://zoom.us/oauth/token";

/// Earliest recording date listed when a request does not ask for another one.
pub const DEFAULT_RECORDINGS_FROM_DATE: &str = "2024-01-01";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Client ID of the Zoom Server-to-Server OAuth app.
    #[arg(long, env)]
    zoom_client_id: String,

    /// Client secret of the Zoom Server-to-Server OAuth app.
    #[arg(long, env, hide_env_values = true)]
    zoom_client_secret: String,

    /// Zoom account ID the app is installed on.
    #[arg(long, env)]
    zoom_account_id: String,

    /// The base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_API_BASE_URL)]
    zoom_api_base_url: String,

    /// The Zoom OAuth token endpoint.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_TOKEN_URL)]
    zoom_oauth_token_url: String,

    /// Earliest meeting date (YYYY-MM-DD) included when listing recordings.
    #[arg(long, env, default_value = DEFAULT_RECORDINGS_FROM_DATE)]
    pub recordings_from_date: NaiveDate,

    /// Pause in milliseconds between listing two users' recordings, keeps the
    /// account under Zoom's rate limits.
    #[arg(long, env, default_value_t = 200)]
    pub user_pause_millis: u64,

    /// Timeout in seconds for a single request to Zoom.
    #[arg(long, env, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3333)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    /// Loads `.env`, then parses flags and environment.
    ///
    /// Exits the process with a usage error when any of the three Zoom app
    /// credentials is missing.
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn zoom_client_id(&self) -> &str {
        &self.zoom_client_id
    }

    pub fn zoom_client_secret(&self) -> &str {
        &self.zoom_client_secret
    }

    pub fn zoom_account_id(&self) -> &str {
        &self.zoom_account_id
    }

    /// Returns the Zoom REST API base URL without a trailing slash.
    pub fn zoom_api_base_url(&self) -> &str {
        self.zoom_api_base_url.trim_end_matches('/')
    }

    pub fn zoom_oauth_token_url(&self) -> &str {
        &self.zoom_oauth_token_url
    }

    pub fn user_pause(&self) -> Duration {
        Duration::from_millis(self.user_pause_millis)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Socket address string the server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.interface, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIALS: [&str; 7] = [
        "recordings_manager",
        "--zoom-client-id",
        "client",
        "--zoom-client-secret",
        "secret",
        "--zoom-account-id",
        "account",
    ];

    #[test]
    fn test_defaults_with_required_credentials() {
        let config = Config::try_parse_from(CREDENTIALS).unwrap();

        assert_eq!(config.zoom_client_id(), "client");
        assert_eq!(config.zoom_client_secret(), "secret");
        assert_eq!(config.zoom_account_id(), "account");
        assert_eq!(config.zoom_api_base_url(), DEFAULT_ZOOM_API_BASE_URL);
        assert_eq!(config.zoom_oauth_token_url(), DEFAULT_ZOOM_OAUTH_TOKEN_URL);
        assert_eq!(
            config.recordings_from_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(config.user_pause(), Duration::from_millis(200));
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.listen_addr(), "127.0.0.1:3333");
        assert_eq!(config.log_level_filter, LevelFilter::Info);
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let result = Config::try_parse_from(["recordings_manager", "--zoom-client-id", "client"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let mut args = CREDENTIALS.to_vec();
        args.extend([
            "--zoom-api-base-url",
            "http://127.0.0.1:9999/",
            "--recordings-from-date",
            "2023-06-15",
            "--user-pause-millis",
            "0",
            "--port",
            "8080",
            "--log-level-filter",
            "DEBUG",
        ]);

        let config = Config::try_parse_from(args).unwrap();

        assert_eq!(config.zoom_api_base_url(), "http://127.0.0.1:9999");
        assert_eq!(
            config.recordings_from_date,
            NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
        );
        assert_eq!(config.user_pause(), Duration::ZERO);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_from_date_is_rejected() {
        let mut args = CREDENTIALS.to_vec();
        args.extend(["--recordings-from-date", "01/01/2024"]);

        assert!(Config::try_parse_from(args).is_err());
    }
}
