use std::str::FromStr;

use rust_i18n::t;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pl,
    En,
}

impl Locale {
    /// Translations for this locale, looked up in `locales/<code>.yml`.
    pub fn labels(self) -> Labels {
        Labels::new(self)
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::Pl => "pl",
            Locale::En => "en",
        }
    }

    /// Make this the process-wide locale for `t!` calls without an explicit one.
    pub fn activate(self) {
        rust_i18n::set_locale(self.code());
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pl" | "pl-pl" => Ok(Locale::Pl),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale {:?}, expected pl or en", other)),
        }
    }
}

/// Every user-visible string of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub tournament: String,
    pub club: String,
    pub active: String,
    pub archived: String,
    pub schedule_type: String,
    pub planned: String,
    pub real: String,
    pub submit: String,
    pub loading: String,
    pub loading_option: String,
    pub load_error_option: String,
    pub no_tournaments: String,
    pub no_data: String,
    pub generic_error: String,
    pub column_name: String,
    pub column_category: String,
    pub column_mat: String,
    pub column_time: String,
    pub server_time: String,
    pub server_time_unavailable: String,
}

impl Labels {
    pub fn new(locale: Locale) -> Self {
        let code = locale.code();
        Self {
            title: t!("title", locale = code).to_string(),
            tournament: t!("tournament", locale = code).to_string(),
            club: t!("club", locale = code).to_string(),
            active: t!("active", locale = code).to_string(),
            archived: t!("archived", locale = code).to_string(),
            schedule_type: t!("schedule_type", locale = code).to_string(),
            planned: t!("planned", locale = code).to_string(),
            real: t!("real", locale = code).to_string(),
            submit: t!("submit", locale = code).to_string(),
            loading: t!("loading", locale = code).to_string(),
            loading_option: t!("loading_option", locale = code).to_string(),
            load_error_option: t!("load_error_option", locale = code).to_string(),
            no_tournaments: t!("no_tournaments", locale = code).to_string(),
            no_data: t!("no_data", locale = code).to_string(),
            generic_error: t!("generic_error", locale = code).to_string(),
            column_name: t!("column_name", locale = code).to_string(),
            column_category: t!("column_category", locale = code).to_string(),
            column_mat: t!("column_mat", locale = code).to_string(),
            column_time: t!("column_time", locale = code).to_string(),
            server_time: t!("server_time", locale = code).to_string(),
            server_time_unavailable: t!("server_time_unavailable", locale = code).to_string(),
        }
    }
}
