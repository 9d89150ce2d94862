use std::env;

use chrono_tz::Tz;

use crate::error::ConfigError;
use crate::i18n::Locale;
use crate::render::RenderStyle;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MAX_ACTIVE_TOURNAMENTS: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// How many active tournaments the selector lists.
    pub max_active_tournaments: usize,
    pub locale: Locale,
    /// Zone whose wall clock decides which entries are already past.
    pub timezone: Tz,
    pub render_style: RenderStyle,
    /// Whether the club selector is loaded and shown.
    pub load_clubs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_active_tournaments: DEFAULT_MAX_ACTIVE_TOURNAMENTS,
            locale: Locale::default(),
            timezone: chrono_tz::Europe::Warsaw,
            render_style: RenderStyle::default(),
            load_clubs: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("SCHEDULE_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(raw) = lookup("SCHEDULE_MAX_ACTIVE") {
            config.max_active_tournaments = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => return Err(invalid("SCHEDULE_MAX_ACTIVE", raw.clone(), "must be at least 1".to_string())),
                Err(e) => return Err(invalid("SCHEDULE_MAX_ACTIVE", raw.clone(), e.to_string())),
            };
        }
        if let Some(raw) = lookup("SCHEDULE_LOCALE") {
            config.locale = raw.parse().map_err(|e| invalid("SCHEDULE_LOCALE", raw.clone(), e))?;
        }
        if let Some(raw) = lookup("SCHEDULE_TIMEZONE") {
            config.timezone = raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| invalid("SCHEDULE_TIMEZONE", raw.clone(), e.to_string()))?;
        }
        if let Some(raw) = lookup("SCHEDULE_RENDER_STYLE") {
            config.render_style = raw.parse().map_err(|e| invalid("SCHEDULE_RENDER_STYLE", raw.clone(), e))?;
        }
        if let Some(raw) = lookup("SCHEDULE_CLUBS") {
            config.load_clubs = parse_flag(&raw).ok_or_else(|| invalid("SCHEDULE_CLUBS", raw.clone(), "expected true or false".to_string()))?;
        }

        Ok(config)
    }
}

fn invalid(var: &'static str, value: String, reason: String) -> ConfigError {
    ConfigError::Invalid { var, value, reason }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
