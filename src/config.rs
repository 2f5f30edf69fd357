//! # Configuration Module
//!
//! Run configuration is read once at startup and passed by reference into
//! every component. `Config::from_env` loads an optional `.env` file and reads
//! the process environment; `Config::builder` assembles one directly, which is
//! how tests get a configuration without touching the environment.
//!
//! ## Variables
//!
//! Required: `GOOGLE_GEN_AI_API_KEY`, `EMAIL_SERVICE`, `EMAIL_USER`,
//! `EMAIL_PASS`. Everything else has a default, see `Config::from_lookup`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::classifier::DEFAULT_RUBRIC;
use crate::error::Error as CrateError;
use crate::feed::query::UnknownFilter;
use crate::feed::{SearchQuery, DEFAULT_BASE_URL};
use crate::model::DEFAULT_MODEL;

/// Default delay before each detail request and each model call
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(15_000);

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name}: {source}")]
    InvalidFilter {
        name: &'static str,
        #[source]
        source: UnknownFilter,
    },
}

impl From<ConfigError> for CrateError {
    fn from(err: ConfigError) -> Self {
        CrateError::Config(err.to_string())
    }
}

/// Mail delivery settings
#[derive(Clone, Default)]
pub struct MailConfig {
    /// Well-known provider name or raw SMTP host
    pub service: String,
    pub user: String,
    pub pass: String,
    /// Recipient address
    pub to: String,
    pub from_name: String,
    pub subject: String,
    pub template_path: String,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("service", &self.service)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("to", &self.to)
            .field("from_name", &self.from_name)
            .field("subject", &self.subject)
            .field("template_path", &self.template_path)
            .finish()
    }
}

/// Immutable run configuration
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub rubric: String,
    pub mail: MailConfig,
    /// Target number of recommendations per mail
    pub job_count_per_mail: usize,
    /// Page ceiling for one run
    pub max_page_tries: u32,
    pub search: SearchQuery,
    pub pacing_delay: Duration,
    pub database_path: String,
    pub feed_base_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            rubric: DEFAULT_RUBRIC.to_string(),
            mail: MailConfig {
                from_name: "Job Tracker App".to_string(),
                subject: "Recommended Job Opportunities".to_string(),
                template_path: "templates/email.handlebars".to_string(),
                ..MailConfig::default()
            },
            job_count_per_mail: 10,
            max_page_tries: 10,
            search: SearchQuery::default(),
            pacing_delay: DEFAULT_PACING_DELAY,
            database_path: "job_tracking.db".to_string(),
            feed_base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("job-tracker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("rubric_len", &self.rubric.len())
            .field("mail", &self.mail)
            .field("job_count_per_mail", &self.job_count_per_mail)
            .field("max_page_tries", &self.max_page_tries)
            .field("search", &self.search)
            .field("pacing_delay", &self.pacing_delay)
            .field("database_path", &self.database_path)
            .field("feed_base_url", &self.feed_base_url)
            .finish()
    }
}

impl Config {
    /// Start building a configuration from defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load configuration from a `.env` file and the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a variable lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let defaults = Config::default();
        let user = required("EMAIL_USER")?;

        let mail = MailConfig {
            service: required("EMAIL_SERVICE")?,
            pass: required("EMAIL_PASS")?,
            to: get("EMAIL_TO").unwrap_or_else(|| user.clone()),
            from_name: get("EMAIL_FROM_NAME").unwrap_or(defaults.mail.from_name),
            subject: get("EMAIL_SUBJECT").unwrap_or(defaults.mail.subject),
            template_path: get("EMAIL_TEMPLATE").unwrap_or(defaults.mail.template_path),
            user,
        };

        let mut search = defaults.search;
        if let Some(keyword) = get("SEARCH_KEYWORD") {
            search.keyword = keyword;
        }
        if let Some(location) = get("SEARCH_LOCATION") {
            search.location = location;
        }
        if let Some(value) = get("SEARCH_DATE_SINCE_POSTED") {
            search.date_since_posted = parse_filter("SEARCH_DATE_SINCE_POSTED", &value)?;
        }
        if let Some(value) = get("SEARCH_JOB_TYPE") {
            search.job_type = parse_filter("SEARCH_JOB_TYPE", &value)?;
        }
        if let Some(value) = get("SEARCH_SORT_BY") {
            search.sort_by = parse_filter("SEARCH_SORT_BY", &value)?;
        }

        let pacing_delay = match get("PACING_DELAY_MS") {
            Some(value) => Duration::from_millis(parse_number("PACING_DELAY_MS", &value)?),
            None => defaults.pacing_delay,
        };

        Ok(Self {
            api_key: required("GOOGLE_GEN_AI_API_KEY")?,
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            rubric: get("CLASSIFIER_PROMPT").unwrap_or(defaults.rubric),
            mail,
            job_count_per_mail: get("JOB_COUNT_PER_MAIL")
                .map(|v| parse_number("JOB_COUNT_PER_MAIL", &v))
                .transpose()?
                .unwrap_or(defaults.job_count_per_mail),
            max_page_tries: get("MAX_PAGE_TRIES")
                .map(|v| parse_number("MAX_PAGE_TRIES", &v))
                .transpose()?
                .unwrap_or(defaults.max_page_tries),
            search,
            pacing_delay,
            database_path: get("DATABASE_PATH").unwrap_or(defaults.database_path),
            feed_base_url: get("FEED_BASE_URL").unwrap_or(defaults.feed_base_url),
            user_agent: defaults.user_agent,
        })
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn parse_filter<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr<Err = UnknownFilter>,
{
    value
        .parse()
        .map_err(|source| ConfigError::InvalidFilter { name, source })
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn rubric(mut self, rubric: impl Into<String>) -> Self {
        self.config.rubric = rubric.into();
        self
    }

    pub fn mail(mut self, mail: MailConfig) -> Self {
        self.config.mail = mail;
        self
    }

    /// Set the number of recommendations that fill one mail
    pub fn job_count_per_mail(mut self, count: usize) -> Self {
        self.config.job_count_per_mail = count;
        self
    }

    /// Set the page ceiling for one run
    pub fn max_page_tries(mut self, tries: u32) -> Self {
        self.config.max_page_tries = tries;
        self
    }

    pub fn search(mut self, search: SearchQuery) -> Self {
        self.config.search = search;
        self
    }

    /// Set the delay awaited before each detail request and model call
    pub fn pacing_delay(mut self, delay: Duration) -> Self {
        self.config.pacing_delay = delay;
        self
    }

    pub fn database_path(mut self, path: impl Into<String>) -> Self {
        self.config.database_path = path.into();
        self
    }

    pub fn feed_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.feed_base_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{DatePosted, JobType, SortBy};
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("GOOGLE_GEN_AI_API_KEY", "secret-key"),
        ("EMAIL_SERVICE", "gmail"),
        ("EMAIL_USER", "me@example.com"),
        ("EMAIL_PASS", "hunter2"),
    ];

    #[test]
    fn test_defaults_from_required_only() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.api_key, "secret-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.rubric, DEFAULT_RUBRIC);
        assert_eq!(config.mail.to, "me@example.com");
        assert_eq!(config.mail.from_name, "Job Tracker App");
        assert_eq!(config.mail.subject, "Recommended Job Opportunities");
        assert_eq!(config.mail.template_path, "templates/email.handlebars");
        assert_eq!(config.job_count_per_mail, 10);
        assert_eq!(config.max_page_tries, 10);
        assert_eq!(config.search.keyword, "php");
        assert_eq!(config.search.location, "Germany");
        assert_eq!(config.search.date_since_posted, DatePosted::PastMonth);
        assert_eq!(config.search.job_type, JobType::FullTime);
        assert_eq!(config.search.sort_by, SortBy::Recent);
        assert_eq!(config.pacing_delay, Duration::from_secs(15));
        assert_eq!(config.database_path, "job_tracking.db");
        assert_eq!(config.feed_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("EMAIL_TO", "inbox@example.com"),
            ("JOB_COUNT_PER_MAIL", "3"),
            ("MAX_PAGE_TRIES", "25"),
            ("SEARCH_KEYWORD", "rust"),
            ("SEARCH_JOB_TYPE", "contract"),
            ("SEARCH_DATE_SINCE_POSTED", "24hr"),
            ("SEARCH_SORT_BY", "relevant"),
            ("PACING_DELAY_MS", "250"),
        ]);

        let config = Config::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.mail.to, "inbox@example.com");
        assert_eq!(config.job_count_per_mail, 3);
        assert_eq!(config.max_page_tries, 25);
        assert_eq!(config.search.keyword, "rust");
        assert_eq!(config.search.job_type, JobType::Contract);
        assert_eq!(config.search.date_since_posted, DatePosted::PastDay);
        assert_eq!(config.search.sort_by, SortBy::Relevant);
        assert_eq!(config.pacing_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_required_variable() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "EMAIL_PASS")
            .collect();

        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("EMAIL_PASS")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut vars = REQUIRED.to_vec();
        vars.retain(|(k, _)| *k != "GOOGLE_GEN_AI_API_KEY");
        vars.push(("GOOGLE_GEN_AI_API_KEY", "  "));

        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GOOGLE_GEN_AI_API_KEY")));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("JOB_COUNT_PER_MAIL", "ten"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "JOB_COUNT_PER_MAIL", .. }));

        let mut vars = REQUIRED.to_vec();
        vars.push(("SEARCH_JOB_TYPE", "gig"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilter { name: "SEARCH_JOB_TYPE", .. }));
        assert!(err.to_string().contains("gig"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("me@example.com"));
    }

    #[test]
    fn test_builder() {
        let config = Config::builder()
            .api_key("k")
            .job_count_per_mail(2)
            .max_page_tries(3)
            .pacing_delay(Duration::ZERO)
            .build();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.job_count_per_mail, 2);
        assert_eq!(config.max_page_tries, 3);
        assert_eq!(config.pacing_delay, Duration::ZERO);
        assert_eq!(config.mail.from_name, "Job Tracker App");
    }
}
