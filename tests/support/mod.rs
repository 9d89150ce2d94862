#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use schedule_viewer::api::{Backend, ScheduleQuery};
use schedule_viewer::config::Config;
use schedule_viewer::error::FetchError;
use schedule_viewer::model::club::ClubSummary;
use schedule_viewer::model::schedule::ScheduleResponse;
use schedule_viewer::model::server_time::ServerTime;
use schedule_viewer::model::tournament::{TournamentLists, TournamentsResponse};

pub fn load_tournaments() -> TournamentLists {
    let json = std::fs::read_to_string("tests/sample_tournaments.json").expect("failed to read sample_tournaments.json");
    serde_json::from_str::<TournamentsResponse>(&json).expect("tournaments fixture").tournaments
}

pub fn load_schedule() -> ScheduleResponse {
    let json = std::fs::read_to_string("tests/sample_schedule.json").expect("failed to read sample_schedule.json");
    serde_json::from_str(&json).expect("schedule fixture")
}

pub fn clubs() -> Vec<ClubSummary> {
    vec![
        ClubSummary { id: "academia_gorila_warszawa".into(), display_name: "Academia Gorila (Warszawa)".into() },
        ClubSummary { id: "academia_gorila_ruda_slaska".into(), display_name: "Academia Gorila (Ruda Śląska)".into() },
    ]
}

/// Config with UTC wall clock so tests need no zone arithmetic.
pub fn utc_config() -> Config {
    Config { timezone: chrono_tz::UTC, ..Config::default() }
}

/// In-memory backend. `None` replies fail with a 500 and the given detail.
pub struct FakeBackend {
    pub tournaments: Option<TournamentLists>,
    pub clubs: Option<Vec<ClubSummary>>,
    pub schedule: Result<ScheduleResponse, (u16, Option<String>)>,
    pub server_time: Option<ServerTime>,
    pub tournament_calls: AtomicUsize,
    pub club_calls: AtomicUsize,
    pub schedule_calls: AtomicUsize,
    pub last_query: Mutex<Option<ScheduleQuery>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            tournaments: Some(load_tournaments()),
            clubs: Some(clubs()),
            schedule: Ok(load_schedule()),
            server_time: Some(ServerTime { server_time: "2025-10-18 09:30:00".into(), timezone: "Europe/Warsaw".into() }),
            tournament_calls: AtomicUsize::new(0),
            club_calls: AtomicUsize::new(0),
            schedule_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }
}

impl FakeBackend {
    pub fn failing() -> Self {
        Self { tournaments: None, clubs: None, schedule: Err((500, None)), server_time: None, ..Self::default() }
    }
}

fn server_error(detail: &str) -> FetchError {
    FetchError::Status { status: 500, detail: Some(detail.to_string()) }
}

impl Backend for FakeBackend {
    fn tournaments(&self) -> Result<TournamentLists, FetchError> {
        self.tournament_calls.fetch_add(1, Ordering::SeqCst);
        self.tournaments.clone().ok_or_else(|| server_error("Failed to fetch tournament IDs"))
    }

    fn clubs(&self) -> Result<Vec<ClubSummary>, FetchError> {
        self.club_calls.fetch_add(1, Ordering::SeqCst);
        self.clubs.clone().ok_or_else(|| server_error("Failed to fetch clubs"))
    }

    fn schedule(&self, query: &ScheduleQuery) -> Result<ScheduleResponse, FetchError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        match &self.schedule {
            Ok(response) => Ok(response.clone()),
            Err((status, detail)) => Err(FetchError::Status { status: *status, detail: detail.clone() }),
        }
    }

    fn server_time(&self) -> Result<ServerTime, FetchError> {
        self.server_time.clone().ok_or_else(|| server_error("clock unavailable"))
    }
}
