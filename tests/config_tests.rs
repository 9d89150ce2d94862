use std::collections::HashMap;

use schedule_viewer::config::{Config, DEFAULT_API_BASE_URL};
use schedule_viewer::error::ConfigError;
use schedule_viewer::i18n::Locale;
use schedule_viewer::render::RenderStyle;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = Config::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.max_active_tournaments, 10);
    assert_eq!(config.locale, Locale::Pl);
    assert_eq!(config.timezone, chrono_tz::Europe::Warsaw);
    assert_eq!(config.render_style, RenderStyle::Collapsible);
    assert!(config.load_clubs);
}

#[test]
fn reads_every_variable() {
    let config = Config::from_lookup(lookup(&[
        ("SCHEDULE_API_BASE_URL", "https://schedule.example.invalid"),
        ("SCHEDULE_MAX_ACTIVE", "5"),
        ("SCHEDULE_LOCALE", "EN"),
        ("SCHEDULE_TIMEZONE", "UTC"),
        ("SCHEDULE_RENDER_STYLE", "static"),
        ("SCHEDULE_CLUBS", "off"),
    ]))
    .unwrap();
    assert_eq!(config.api_base_url, "https://schedule.example.invalid");
    assert_eq!(config.max_active_tournaments, 5);
    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.timezone, chrono_tz::UTC);
    assert_eq!(config.render_style, RenderStyle::Static);
    assert!(!config.load_clubs);
}

#[test]
fn rejects_invalid_values() {
    for (var, value) in [
        ("SCHEDULE_MAX_ACTIVE", "0"),
        ("SCHEDULE_MAX_ACTIVE", "ten"),
        ("SCHEDULE_LOCALE", "de"),
        ("SCHEDULE_TIMEZONE", "Mars/Olympus"),
        ("SCHEDULE_RENDER_STYLE", "fancy"),
        ("SCHEDULE_CLUBS", "maybe"),
    ] {
        let err = Config::from_lookup(lookup(&[(var, value)])).unwrap_err();
        let ConfigError::Invalid { var: got, value: got_value, .. } = &err;
        assert_eq!(*got, var, "error was: {}", err);
        assert_eq!(got_value, value);
    }
}
