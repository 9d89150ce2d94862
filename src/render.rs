//! Pure functions from view state to HTML. Templates are maud; every interpolated value goes
//! through [`crate::html`] so there is one escaping rule.

use std::str::FromStr;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};

use crate::api::ScheduleType;
use crate::html::{Cell, Text, display_style, option};
use crate::i18n::{Labels, Locale};
use crate::model::club::ClubSummary;
use crate::model::schedule::{DaySchedule, FieldValue, ScheduleEntry};
use crate::model::tournament::{TournamentLists, TournamentScope};
use crate::view::{DisplayState, ScheduleView, Selector, ServerClock};

pub const COLLAPSED_GLYPH: &str = "▶";
pub const EXPANDED_GLYPH: &str = "▼";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// One collapsible section per day, collapsed initially
    #[default]
    Collapsible,
    /// Plain heading and table per day
    Static,
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapsible" => Ok(RenderStyle::Collapsible),
            "static" => Ok(RenderStyle::Static),
            other => Err(format!("unknown render style {:?}, expected collapsible or static", other)),
        }
    }
}

pub fn loading_option(labels: &Labels) -> String {
    option("", &labels.loading_option)
}

pub fn error_option(labels: &Labels) -> String {
    option("", &labels.load_error_option)
}

/// Options for the tournament selector. Active tournaments are cut to `max_active`.
pub fn tournament_options(lists: &TournamentLists, scope: TournamentScope, max_active: usize, labels: &Labels) -> String {
    let visible = lists.visible(scope, max_active);
    if visible.is_empty() {
        return option("", &labels.no_tournaments);
    }
    visible.iter().map(|t| option(&t.id, &t.name)).collect()
}

pub fn club_options(clubs: &[ClubSummary]) -> String {
    clubs.iter().map(|c| option(&c.id, &c.display_name)).collect()
}

pub fn server_time_line(clock: &ServerClock, labels: &Labels) -> String {
    match clock {
        ServerClock::Pending => String::new(),
        ServerClock::Known(t) => format!("{}: {} ({})", labels.server_time, t.server_time, t.timezone),
        ServerClock::Unavailable => format!("{}: {}", labels.server_time, labels.server_time_unavailable),
    }
}

/// `<div class="error">` holding one message.
pub fn inline_error(message: &str) -> String {
    inline_error_markup(message).into_string()
}

fn inline_error_markup(message: &str) -> Markup {
    html! {
        div class="error" { (Text(message)) }
    }
}

/// Markup for the schedule container: an inline message when there is no data, otherwise one
/// section per non-empty day.
pub fn schedule(view: &ScheduleView, style: RenderStyle, labels: &Labels) -> String {
    schedule_markup(view, style, labels).into_string()
}

fn schedule_markup(view: &ScheduleView, style: RenderStyle, labels: &Labels) -> Markup {
    if view.response.schedule.is_empty() {
        let message = view.response.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(labels.no_data.as_str());
        return inline_error_markup(message);
    }

    html! {
        @for day in view.response.schedule.non_empty_days() {
            @match style {
                RenderStyle::Collapsible => {
                    (collapsible_day(day, view, labels))
                }
                RenderStyle::Static => {
                    h3 { (Text(&day.day)) }
                    (day_table(day, view, labels))
                }
            }
        }
    }
}

fn collapsible_day(day: &DaySchedule, view: &ScheduleView, labels: &Labels) -> Markup {
    let expanded = view.is_expanded(&day.day);
    let (header_class, glyph) = if expanded {
        ("collapsible-header", EXPANDED_GLYPH)
    } else {
        ("collapsible-header collapsed", COLLAPSED_GLYPH)
    };
    html! {
        h3 class=(header_class) data-day=(Text(&day.day)) {
            (Text(&day.day)) " " span class="collapse-indicator" { (glyph) }
        }
        div class="collapsible-content" style=(display_style(expanded)) {
            (day_table(day, view, labels))
        }
    }
}

fn day_table(day: &DaySchedule, view: &ScheduleView, labels: &Labels) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th data-column="name" { (Text(&labels.column_name)) }
                    th data-column="category" class="category-header" { (Text(&labels.column_category)) }
                    th data-column="mat" { (Text(&labels.column_mat)) }
                    th data-column="time" { (Text(&labels.column_time)) }
                }
            }
            tbody {
                @for entry in &day.entries {
                    (entry_row(entry, view))
                }
            }
        }
    }
}

fn entry_row(entry: &ScheduleEntry, view: &ScheduleView) -> Markup {
    html! {
        tr class=[entry.is_past(view.now).then_some("past-event")] {
            td data-column="name" { (Cell(shown(&entry.name))) }
            td data-column="category" class="category-cell" { (Cell(shown(&entry.category))) }
            td data-column="mat" { (Cell(shown(&entry.mat))) }
            td data-column="time" { (Cell(shown(&entry.time))) }
        }
    }
}

/// Empty text counts as absent, so it renders as `-` too.
fn shown(value: &Option<FieldValue>) -> Option<&FieldValue> {
    value.as_ref().filter(|v| !v.is_blank())
}

/// Everything the page shows, borrowed from the controller.
#[derive(Debug)]
pub struct PageParts<'a> {
    pub locale: Locale,
    pub style: RenderStyle,
    pub scope: TournamentScope,
    pub schedule_type: ScheduleType,
    pub tournament_select: &'a Selector,
    pub club_select: Option<&'a Selector>,
    pub server_clock: &'a ServerClock,
    pub display: &'a DisplayState,
}

/// A complete HTML document. Of the loading, results and error regions at most one is visible.
pub fn page(parts: &PageParts<'_>) -> String {
    let labels = parts.locale.labels();
    let results = parts.display.results().map(|view| schedule_markup(view, parts.style, &labels));
    let error_text = parts.display.error_message();
    let server_time = server_time_line(parts.server_clock, &labels);

    html! {
        (DOCTYPE)
        html lang=(parts.locale.code()) {
            head {
                meta charset="utf-8";
                title { (Text(&labels.title)) }
            }
            body {
                h1 { (Text(&labels.title)) }
                form id="tournamentForm" {
                    fieldset {
                        (radio("tournamentType", "active", &labels.active, parts.scope == TournamentScope::Active))
                        (radio("tournamentType", "archived", &labels.archived, parts.scope == TournamentScope::Archived))
                    }
                    (select("tournamentSelect", "event_id", &labels.tournament, parts.tournament_select))
                    @if let Some(clubs) = parts.club_select {
                        (select("clubSelect", "club_id", &labels.club, clubs))
                    }
                    fieldset {
                        legend { (Text(&labels.schedule_type)) }
                        (radio("scheduleType", "planned", &labels.planned, parts.schedule_type == ScheduleType::Planned))
                        (radio("scheduleType", "real", &labels.real, parts.schedule_type == ScheduleType::Real))
                    }
                    button type="submit" { (Text(&labels.submit)) }
                }
                p id="serverTime" { (Text(&server_time)) }
                div id="loading" style=(display_style(parts.display.is_loading())) { (Text(&labels.loading)) }
                div id="results" style=(display_style(results.is_some())) {
                    div id="scheduleContainer" {
                        @if let Some(results) = results {
                            (results)
                        }
                    }
                }
                div id="error" class="error" style=(display_style(error_text.is_some())) {
                    (Text(error_text.unwrap_or_default()))
                }
            }
        }
    }
    .into_string()
}

fn radio(name: &str, value: &str, label: &str, checked: bool) -> Markup {
    html! {
        label {
            input type="radio" name=(name) value=(value) checked[checked];
            " " (Text(label))
        }
    }
}

fn select(id: &str, name: &str, label: &str, selector: &Selector) -> Markup {
    html! {
        label for=(id) { (Text(label)) }
        select id=(id) name=(name) disabled[selector.disabled] {
            (PreEscaped(selector.options_html.as_str()))
        }
    }
}
