pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod html;
pub mod i18n;
pub mod model;
pub mod render;
pub mod view;

rust_i18n::i18n!("locales", fallback = "pl");
