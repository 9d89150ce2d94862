use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::api::{Backend, ScheduleQuery, ScheduleType};
use crate::config::Config;
use crate::error::FetchError;
use crate::model::club::ClubSummary;
use crate::model::schedule::ScheduleResponse;
use crate::model::tournament::{TournamentLists, TournamentScope};
use crate::render::{self, PageParts, RenderStyle};
use crate::view::{DisplayState, ScheduleView, Selector, ServerClock};

/// Which backend endpoint a search goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// `/api/participants?event_id&club_id&schedule_type`
    #[default]
    Query,
    /// `/api/participants/{event_id}?club_id`
    Path,
    /// `/api/bjj-participants/{event_id}`
    Bjj,
    /// `/api/bjj-participants?url=`, `event_id` holds the URL
    BjjUrl,
}

/// The submitted search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub event_id: String,
    pub club_id: Option<String>,
    pub schedule_type: ScheduleType,
    pub endpoint: Endpoint,
}

impl SearchForm {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self { event_id: event_id.into(), club_id: None, schedule_type: ScheduleType::default(), endpoint: Endpoint::default() }
    }

    pub fn with_club(mut self, club_id: impl Into<String>) -> Self {
        self.club_id = Some(club_id.into());
        self
    }

    pub fn to_query(&self) -> ScheduleQuery {
        let event_id = self.event_id.clone();
        match self.endpoint {
            Endpoint::Query => ScheduleQuery::Participants { event_id, club_id: self.club_id.clone(), schedule_type: self.schedule_type },
            Endpoint::Path => ScheduleQuery::ParticipantsByPath { event_id, club_id: self.club_id.clone() },
            Endpoint::Bjj => ScheduleQuery::BjjParticipants { event_id },
            Endpoint::BjjUrl => ScheduleQuery::BjjParticipantsByUrl { url: event_id },
        }
    }
}

/// A search that has been submitted but not yet applied. It owns what it needs, so several can
/// be in flight while the controller keeps serving other events.
#[derive(Debug)]
pub struct PendingSearch<B> {
    backend: Arc<B>,
    query: ScheduleQuery,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub query: ScheduleQuery,
    pub result: Result<ScheduleResponse, FetchError>,
}

impl<B: Backend + 'static> PendingSearch<B> {
    pub fn query(&self) -> &ScheduleQuery {
        &self.query
    }

    /// Perform the fetch on the blocking pool.
    pub async fn run(self) -> SearchOutcome {
        let backend = self.backend;
        let query = self.query.clone();
        let result = joined(tokio::task::spawn_blocking(move || backend.schedule(&query))).await;
        SearchOutcome { query: self.query, result }
    }
}

/// Owns the view state: reference data caches, selectors, server time and the result area.
#[derive(Debug)]
pub struct ViewController<B> {
    backend: Arc<B>,
    config: Config,
    tournaments: Option<TournamentLists>,
    clubs: Vec<ClubSummary>,
    scope: TournamentScope,
    schedule_type: ScheduleType,
    tournament_select: Selector,
    club_select: Selector,
    server_clock: ServerClock,
    display: DisplayState,
}

impl<B: Backend + 'static> ViewController<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self::with_shared_backend(Arc::new(backend), config)
    }

    pub fn with_shared_backend(backend: Arc<B>, config: Config) -> Self {
        Self {
            backend,
            config,
            tournaments: None,
            clubs: Vec::new(),
            scope: TournamentScope::Active,
            schedule_type: ScheduleType::default(),
            tournament_select: Selector::default(),
            club_select: Selector::default(),
            server_clock: ServerClock::Pending,
            display: DisplayState::Idle,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn tournament_select(&self) -> &Selector {
        &self.tournament_select
    }

    pub fn club_select(&self) -> &Selector {
        &self.club_select
    }

    pub fn server_clock(&self) -> &ServerClock {
        &self.server_clock
    }

    pub fn tournaments(&self) -> Option<&TournamentLists> {
        self.tournaments.as_ref()
    }

    pub fn clubs(&self) -> &[ClubSummary] {
        &self.clubs
    }

    pub fn scope(&self) -> TournamentScope {
        self.scope
    }

    /// Fetch tournaments, clubs and server time concurrently. Each selector stays disabled until
    /// its own fetch has finished, successfully or not, and no region waits on another.
    #[instrument(level = "info", skip(self))]
    pub async fn load_reference_data(&mut self) {
        let labels = self.config.locale.labels();
        let max_active = self.config.max_active_tournaments;

        let tournaments_task = {
            let backend = Arc::clone(&self.backend);
            tokio::task::spawn_blocking(move || backend.tournaments())
        };
        let clubs_task = self.config.load_clubs.then(|| {
            let backend = Arc::clone(&self.backend);
            tokio::task::spawn_blocking(move || backend.clubs())
        });
        let time_task = {
            let backend = Arc::clone(&self.backend);
            tokio::task::spawn_blocking(move || backend.server_time())
        };

        let Self { tournaments, clubs, scope, tournament_select, club_select, server_clock, .. } = self;
        let scope = *scope;
        let labels = &labels;

        let load_tournaments = async move {
            let mut select = tournament_select.disable();
            select.options_html = render::loading_option(labels);
            match joined(tournaments_task).await {
                Ok(lists) => {
                    info!(active = lists.active.len(), archived = lists.archived.len(), "Loaded tournaments");
                    select.options_html = render::tournament_options(&lists, scope, max_active, labels);
                    *tournaments = Some(lists);
                }
                Err(e) => {
                    error!(error = %e, "Error fetching tournaments");
                    select.options_html = render::error_option(labels);
                }
            }
        };

        let load_clubs = async move {
            let Some(task) = clubs_task else {
                return;
            };
            let mut select = club_select.disable();
            select.options_html = render::loading_option(labels);
            match joined(task).await {
                Ok(loaded) => {
                    info!(clubs = loaded.len(), "Loaded clubs");
                    select.options_html = render::club_options(&loaded);
                    *clubs = loaded;
                }
                Err(e) => {
                    error!(error = %e, "Error fetching clubs");
                    select.options_html = render::error_option(labels);
                }
            }
        };

        let load_server_time = async move {
            *server_clock = match joined(time_task).await {
                Ok(time) => ServerClock::Known(time),
                Err(e) => {
                    warn!(error = %e, "Error fetching server time");
                    ServerClock::Unavailable
                }
            };
        };

        tokio::join!(load_tournaments, load_clubs, load_server_time);
    }

    /// Switch the tournament selector between the truncated active list and the archive. No fetch.
    pub fn toggle_tournament_scope(&mut self, show_archived: bool) {
        self.scope = TournamentScope::from_archived(show_archived);
        if let Some(lists) = &self.tournaments {
            self.tournament_select.options_html = render::tournament_options(
                lists,
                self.scope,
                self.config.max_active_tournaments,
                &self.config.locale.labels(),
            );
        }
    }

    /// Enter the loading state and hand back the fetch to run.
    #[instrument(level = "info", skip(self), fields(event_id = %form.event_id))]
    pub fn begin_search(&mut self, form: &SearchForm) -> PendingSearch<B> {
        self.schedule_type = form.schedule_type;
        self.display = DisplayState::Loading;
        PendingSearch { backend: Arc::clone(&self.backend), query: form.to_query() }
    }

    /// Show the outcome of a search. The last applied outcome wins.
    pub fn apply_search(&mut self, outcome: SearchOutcome, now_utc: DateTime<Utc>) -> &DisplayState {
        let labels = self.config.locale.labels();
        self.display = match outcome.result {
            Ok(response) => {
                let now = now_utc.with_timezone(&self.config.timezone).time();
                info!(query = ?outcome.query, days = response.schedule.days.len(), "Rendering schedule");
                DisplayState::Results(ScheduleView::new(response, now))
            }
            Err(e) => {
                error!(error = %e, query = ?outcome.query, "Schedule search failed");
                DisplayState::Error(e.user_message(&labels.generic_error))
            }
        };
        &self.display
    }

    /// Submit the form and wait for the result. `now_utc` decides which entries are past.
    pub async fn submit_search(&mut self, form: &SearchForm, now_utc: DateTime<Utc>) -> &DisplayState {
        let pending = self.begin_search(form);
        let outcome = pending.run().await;
        self.apply_search(outcome, now_utc)
    }

    /// Expand or collapse one day section. Returns whether it is expanded afterwards, or `None`
    /// when there is no such section.
    pub fn toggle_collapse(&mut self, day: &str) -> Option<bool> {
        if self.config.render_style == RenderStyle::Static {
            return None;
        }
        let DisplayState::Results(view) = &mut self.display else {
            return None;
        };
        if !view.response.schedule.non_empty_days().any(|d| d.day == day) {
            return None;
        }
        if view.expanded.remove(day) {
            Some(false)
        } else {
            view.expanded.insert(day.to_string());
            Some(true)
        }
    }

    /// Drop cached data and return to the initial state.
    pub fn clear(&mut self) {
        self.tournaments = None;
        self.clubs.clear();
        self.scope = TournamentScope::Active;
        self.schedule_type = ScheduleType::default();
        self.tournament_select = Selector::default();
        self.club_select = Selector::default();
        self.server_clock = ServerClock::Pending;
        self.display = DisplayState::Idle;
    }

    /// Markup of the schedule container alone.
    pub fn render_results(&self) -> Option<String> {
        self.display
            .results()
            .map(|view| render::schedule(view, self.config.render_style, &self.config.locale.labels()))
    }

    pub fn render_page(&self) -> String {
        render::page(&PageParts {
            locale: self.config.locale,
            style: self.config.render_style,
            scope: self.scope,
            schedule_type: self.schedule_type,
            tournament_select: &self.tournament_select,
            club_select: self.config.load_clubs.then_some(&self.club_select),
            server_clock: &self.server_clock,
            display: &self.display,
        })
    }
}

async fn joined<T>(task: JoinHandle<Result<T, FetchError>>) -> Result<T, FetchError> {
    match task.await {
        Ok(result) => result,
        Err(e) => Err(FetchError::Task(e.to_string())),
    }
}
