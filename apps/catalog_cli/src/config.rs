use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use catalog_core::CatalogError;
use clap::ValueEnum;
use serde::Deserialize;
use shared::{
    domain::MemberId,
    inquiry::{defaults, SearchInquiry},
};

const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

/// Listing surfaces, each with its own default inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListingView {
    List,
    Popular,
    Trending,
    Top,
}

impl ListingView {
    pub fn default_inquiry(self, member_id: Option<MemberId>) -> SearchInquiry {
        let inquiry = match self {
            ListingView::List => defaults::course_list(),
            ListingView::Popular => defaults::popular_courses(),
            ListingView::Trending => defaults::trending_courses(),
            ListingView::Top => defaults::top_courses(),
        };
        match member_id {
            Some(member_id) => inquiry.owned_by(member_id),
            None => inquiry,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub graphql_url: String,
    pub site_url: String,
    pub request_timeout_secs: u64,
    pub token_file: Option<PathBuf>,
    pub default_view: ListingView,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphql_url: "http://localhost:3007/graphql".into(),
            site_url: "http://localhost:3000/courses".into(),
            request_timeout_secs: 10,
            token_file: None,
            default_view: ListingView::List,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    graphql_url: Option<String>,
    site_url: Option<String>,
    request_timeout_secs: Option<u64>,
    token_file: Option<PathBuf>,
    default_view: Option<ListingView>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then environment variables. An explicit
/// path must exist; the default `catalog.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let raw = match path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };

    if let Some(raw) = raw {
        let file_cfg: FileSettings =
            toml::from_str(&raw).context("config file is not valid TOML")?;
        apply_file_settings(&mut settings, file_cfg);
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.graphql_url {
        settings.graphql_url = v;
    }
    if let Some(v) = file_cfg.site_url {
        settings.site_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.token_file {
        settings.token_file = Some(v);
    }
    if let Some(v) = file_cfg.default_view {
        settings.default_view = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = env("CATALOG_GRAPHQL_URL") {
        settings.graphql_url = v;
    }
    if let Some(v) = env("APP__GRAPHQL_URL") {
        settings.graphql_url = v;
    }

    if let Some(v) = env("APP__SITE_URL") {
        settings.site_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__TOKEN_FILE") {
        settings.token_file = Some(PathBuf::from(v));
    }

    if let Some(v) = env("APP__DEFAULT_VIEW") {
        if let Ok(view) = ListingView::from_str(&v, true) {
            settings.default_view = view;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

/// Reads the persisted access token. A missing file just means nobody is
/// signed in.
pub fn read_token_file(path: &Path) -> Result<Option<String>, CatalogError> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let token = raw.trim();
            Ok((!token.is_empty()).then(|| token.to_string()))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(CatalogError::InvalidToken(format!(
            "cannot read token file '{}': {err}",
            path.display()
        ))),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
