/// Bundled config for builds that ship without a `.env` (mobile, web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const API_BASE_VAR: &str = "CHAT_WIDGET_API_BASE";
const START_MINIMIZED_VAR: &str = "CHAT_WIDGET_START_MINIMIZED";

/// Runtime settings for the widget, resolved once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Scheme, host and port of the assistant backend, without a trailing slash.
    pub api_base: String,
    pub start_minimized: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            start_minimized: false,
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup(API_BASE_VAR)
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let start_minimized = lookup(START_MINIMIZED_VAR)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self {
            api_base,
            start_minimized,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Loads `.env` on desktop, falling back to the bundled defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(&key).is_err() {
            // SAFETY: called from main before the UI runtime spawns any threads
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_lines(source: &str) -> Vec<(String, String)> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
