use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use semver::{BuildMetadata, Prerelease, Version};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use utoipa::IntoParams;

type APiVersionList = [&'static str; 1];

const DEFAULT_API_VERSION: &str = "0.1.0";
// Expand this array to include all valid API versions. Versions that have been
// completely removed should be removed from this list - they're no longer valid.
const API_VERSIONS: APiVersionList = [DEFAULT_API_VERSION];

static X_VERSION: &str = "x-version";

/// Default Zoom REST API base URL used when `ZOOM_API_BASE_URL` is not set.
pub const DEFAULT_ZOOM_API_BASE_URL: &str = "https://api.zoom.us/v2";
/// Default Zoom OAuth base URL used when `ZOOM_OAUTH_BASE_URL` is not set.
pub const DEFAULT_ZOOM_OAUTH_BASE_URL: &str = "https://zoom.us/oauth";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Header)]
pub struct ApiVersion {
    /// The version of the API to use for a request.
    #[param(rename = "x-version", style = Simple, required, example = "0.1.0", value_type = String)]
    pub version: Version,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

/// A configuration issue detected at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum StartupIssue {
    MissingSupabaseUrl,
    MissingSupabaseKey,
    InvalidDefaultTimezone(String),
    MissingZoomCredentials,
    MissingSdkAppKey,
    MissingSdkAppSecret,
    MissingWebhookSecret,
}

impl fmt::Display for StartupIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StartupIssue::MissingSupabaseUrl => write!(f, "SUPABASE_URL is not set"),
            StartupIssue::MissingSupabaseKey => write!(f, "SUPABASE_KEY is not set"),
            StartupIssue::InvalidDefaultTimezone(tz) => {
                write!(f, "'{tz}' is not a valid IANA timezone")
            }
            StartupIssue::MissingZoomCredentials => write!(
                f,
                "neither ZOOM_API_TOKEN nor ZOOM_CLIENT_ID/ZOOM_CLIENT_SECRET are set; \
                 meeting provisioning will fail"
            ),
            StartupIssue::MissingSdkAppKey => {
                write!(f, "ZOOM_SDK_APP_KEY is not set; SDK token issuance will fail")
            }
            StartupIssue::MissingSdkAppSecret => {
                write!(f, "ZOOM_SDK_APP_SECRET is not set; SDK token issuance will fail")
            }
            StartupIssue::MissingWebhookSecret => {
                write!(f, "ZOOM_EVENT_SECRET is not set; inbound webhooks will be rejected")
            }
        }
    }
}

/// Result of validating the configuration at startup.
///
/// `fatal` issues make every route useless; `degraded` issues only disable
/// the routes that need the missing secret. The hosting process decides
/// whether to shut down or serve degraded.
#[derive(Debug, Default)]
pub struct StartupReport {
    pub fatal: Vec<StartupIssue>,
    pub degraded: Vec<StartupIssue>,
}

impl StartupReport {
    pub fn is_fatal(&self) -> bool {
        !self.fatal.is_empty()
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Set the current semantic version of the endpoint API to expose to clients. All
    /// endpoints not contained in the specified version will not be exposed by the router.
    #[arg(short, long, env, default_value = DEFAULT_API_VERSION,
        value_parser = clap::builder::PossibleValuesParser::new(API_VERSIONS)
            .map(|s| s.parse::<String>().unwrap()),
        )]
    pub api_version: Option<String>,

    /// Base URL of the Supabase project backing identity checks and row storage.
    #[arg(long, env)]
    supabase_url: Option<String>,

    /// Supabase service API key, sent as the `apikey` header and as the
    /// service bearer for row operations.
    #[arg(long, env)]
    supabase_key: Option<String>,

    /// Zoom server-to-server OAuth client id.
    #[arg(long, env)]
    zoom_client_id: Option<String>,

    /// Zoom server-to-server OAuth client secret.
    #[arg(long, env)]
    zoom_client_secret: Option<String>,

    /// Zoom account id to scope server-to-server tokens to.
    #[arg(long, env)]
    zoom_account_id: Option<String>,

    /// Long-lived Zoom bearer token. When set, it is used directly and no
    /// token exchange happens.
    #[arg(long, env)]
    zoom_api_token: Option<String>,

    /// Application key for the Zoom MobileRTC SDK.
    #[arg(long, env)]
    zoom_sdk_app_key: Option<String>,

    /// Application secret used to sign Zoom MobileRTC SDK tokens.
    #[arg(long, env)]
    zoom_sdk_app_secret: Option<String>,

    /// Shared secret used to verify inbound Zoom webhook signatures.
    #[arg(long, env)]
    zoom_event_secret: Option<String>,

    /// The base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_API_BASE_URL)]
    zoom_api_base_url: String,

    /// The base URL of the Zoom OAuth endpoints.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_BASE_URL)]
    zoom_oauth_base_url: String,

    /// IANA timezone applied to meetings when the provider does not return one.
    #[arg(long, env, default_value = "America/Santiago")]
    default_timezone: String,

    /// When set, provisioning requests must carry an explicit start_time and
    /// duration instead of falling back to defaults.
    #[arg(long, env)]
    pub require_meeting_fields: bool,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3000)]
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

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn api_version(&self) -> &str {
        self.api_version
            .as_ref()
            .expect("No API version string provided")
    }

    pub fn supabase_url(&self) -> Option<String> {
        self.supabase_url.clone()
    }

    pub fn supabase_key(&self) -> Option<String> {
        self.supabase_key.clone()
    }

    pub fn zoom_client_id(&self) -> Option<String> {
        self.zoom_client_id.clone()
    }

    pub fn zoom_client_secret(&self) -> Option<String> {
        self.zoom_client_secret.clone()
    }

    pub fn zoom_account_id(&self) -> Option<String> {
        self.zoom_account_id.clone()
    }

    pub fn zoom_api_token(&self) -> Option<String> {
        self.zoom_api_token.clone()
    }

    pub fn zoom_sdk_app_key(&self) -> Option<String> {
        self.zoom_sdk_app_key.clone()
    }

    pub fn zoom_sdk_app_secret(&self) -> Option<String> {
        self.zoom_sdk_app_secret.clone()
    }

    pub fn zoom_event_secret(&self) -> Option<String> {
        self.zoom_event_secret.clone()
    }

    /// Returns the Zoom REST API base URL.
    pub fn zoom_api_base_url(&self) -> &str {
        &self.zoom_api_base_url
    }

    /// Returns the Zoom OAuth base URL.
    pub fn zoom_oauth_base_url(&self) -> &str {
        &self.zoom_oauth_base_url
    }

    /// Returns the fallback IANA timezone for provisioned meetings.
    pub fn default_timezone(&self) -> &str {
        &self.default_timezone
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }

    /// Validate the configuration without touching the network.
    ///
    /// Never exits the process; the caller decides what to do with the
    /// report.
    pub fn startup_report(&self) -> StartupReport {
        let mut report = StartupReport::default();

        if self.supabase_url.is_none() {
            report.fatal.push(StartupIssue::MissingSupabaseUrl);
        }
        if self.supabase_key.is_none() {
            report.fatal.push(StartupIssue::MissingSupabaseKey);
        }
        if self.default_timezone.parse::<chrono_tz::Tz>().is_err() {
            report.fatal.push(StartupIssue::InvalidDefaultTimezone(
                self.default_timezone.clone(),
            ));
        }

        let has_oauth_pair = self.zoom_client_id.is_some() && self.zoom_client_secret.is_some();
        if self.zoom_api_token.is_none() && !has_oauth_pair {
            report.degraded.push(StartupIssue::MissingZoomCredentials);
        }
        if self.zoom_sdk_app_key.is_none() {
            report.degraded.push(StartupIssue::MissingSdkAppKey);
        }
        if self.zoom_sdk_app_secret.is_none() {
            report.degraded.push(StartupIssue::MissingSdkAppSecret);
        }
        if self.zoom_event_secret.is_none() {
            report.degraded.push(StartupIssue::MissingWebhookSecret);
        }

        report
    }
}

impl ApiVersion {
    pub fn new(version_str: &'static str) -> Self {
        ApiVersion {
            version: Version::parse(version_str).unwrap_or(Version {
                major: 0,
                minor: 0,
                patch: 1,
                pre: Prerelease::EMPTY,
                build: BuildMetadata::EMPTY,
            }),
        }
    }

    /// Parse a header value and accept it only if it names a supported version.
    pub fn parse_supported(value: &str) -> Option<ApiVersion> {
        let version = Version::parse(value).ok()?;
        let supported = API_VERSIONS
            .iter()
            .any(|candidate| Version::parse(candidate).map(|v| v == version).unwrap_or(false));
        supported.then_some(ApiVersion { version })
    }

    pub fn default_version() -> &'static str {
        DEFAULT_API_VERSION
    }

    pub fn field_name() -> &'static str {
        X_VERSION
    }

    pub fn versions() -> APiVersionList {
        API_VERSIONS
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        ApiVersion {
            version: Version::parse(DEFAULT_API_VERSION).unwrap_or(Version {
                major: 0,
                minor: 0,
                patch: 1,
                pre: Prerelease::EMPTY,
                build: BuildMetadata::EMPTY,
            }),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
