use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use chrono::NaiveTime;

use crate::model::schedule::ScheduleResponse;
use crate::model::server_time::ServerTime;

/// A `<select>` element: its rendered options and whether it accepts input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub options_html: String,
    pub disabled: bool,
}

impl Selector {
    /// Disable the selector until the returned guard is dropped.
    pub fn disable(&mut self) -> DisabledGuard<'_> {
        self.disabled = true;
        DisabledGuard { selector: self }
    }
}

/// Keeps a [`Selector`] disabled for its lifetime and re-enables it on drop, whatever the outcome.
#[derive(Debug)]
pub struct DisabledGuard<'a> {
    selector: &'a mut Selector,
}

impl Deref for DisabledGuard<'_> {
    type Target = Selector;

    fn deref(&self) -> &Selector {
        self.selector
    }
}

impl DerefMut for DisabledGuard<'_> {
    fn deref_mut(&mut self) -> &mut Selector {
        self.selector
    }
}

impl Drop for DisabledGuard<'_> {
    fn drop(&mut self) {
        self.selector.disabled = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServerClock {
    #[default]
    Pending,
    Known(ServerTime),
    Unavailable,
}

/// Fetched schedule plus the per-render state: expanded days and the time used for past marking.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub response: ScheduleResponse,
    pub expanded: HashSet<String>,
    pub now: NaiveTime,
}

impl ScheduleView {
    pub fn new(response: ScheduleResponse, now: NaiveTime) -> Self {
        Self { response, expanded: HashSet::new(), now }
    }

    pub fn is_expanded(&self, day: &str) -> bool {
        self.expanded.contains(day)
    }
}

/// What the result area shows. At most one region is visible, by construction.
#[derive(Debug, Clone, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Results(ScheduleView),
    Error(String),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn results(&self) -> Option<&ScheduleView> {
        match self {
            DisplayState::Results(view) => Some(view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
