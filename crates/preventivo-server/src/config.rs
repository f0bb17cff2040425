//! Process configuration, read once from the environment at startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use eyre::WrapErr;

use preventivo_core::artifacts::DebugArtifacts;
use preventivo_store::client::{AirtableConfig, DEFAULT_API_URL};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DEBUG_DIR: &str = "debug_output";

#[derive(Debug, Clone)]
pub struct Config {
    pub airtable: AirtableConfig,
    pub default_domain: Option<String>,
    pub template_path: Option<PathBuf>,
    pub chromium_path: Option<PathBuf>,
    pub render_timeout: Duration,
    pub port: u16,
    pub debug: DebugConfig,
}

/// Debug toggles. Only the literal string `true` switches a flag on.
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub enabled: bool,
    pub verbose_logging: bool,
    pub save_files: bool,
    pub save_responses: bool,
    pub save_template_data: bool,
    pub save_html: bool,
    pub save_screenshot: bool,
    pub dir: PathBuf,
}

impl DebugConfig {
    pub fn verbose(&self) -> bool {
        self.enabled && self.verbose_logging
    }

    /// The artifact sink these toggles describe.
    pub fn artifacts(&self) -> DebugArtifacts {
        DebugArtifacts::new(
            self.dir.clone(),
            self.enabled && self.save_files,
            self.save_responses,
            self.save_template_data,
            self.save_html,
        )
        .with_screenshots(self.save_screenshot)
    }
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let flag = |key: &str| lookup(key).as_deref() == Some("true");

        let render_timeout_secs = parse_or(
            get("RENDER_TIMEOUT_SECS"),
            "RENDER_TIMEOUT_SECS",
            DEFAULT_RENDER_TIMEOUT_SECS,
        )?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;

        Ok(Self {
            airtable: AirtableConfig {
                api_url: get("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                base_id: get("AIRTABLE_BASE_ID"),
                token: get("AIRTABLE_API_KEY"),
            },
            default_domain: get("DEFAULT_TEXT_DOMAIN"),
            template_path: get("PREVENTIVO_TEMPLATE").map(PathBuf::from),
            chromium_path: get("CHROMIUM_PATH").map(PathBuf::from),
            render_timeout: Duration::from_secs(render_timeout_secs),
            port,
            debug: DebugConfig {
                enabled: flag("DEBUG_ENABLED"),
                verbose_logging: flag("DEBUG_VERBOSE_LOGGING"),
                save_files: flag("DEBUG_SAVE_FILES"),
                save_responses: flag("DEBUG_SAVE_RESPONSES"),
                save_template_data: flag("DEBUG_SAVE_TEMPLATE_DATA"),
                save_html: flag("DEBUG_SAVE_HTML"),
                save_screenshot: flag("DEBUG_SCREENSHOT"),
                dir: get("DEBUG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DEBUG_DIR)),
            },
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => v
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid {key}: {v:?}")),
        None => Ok(default),
    }
}
