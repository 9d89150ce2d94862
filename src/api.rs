use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, instrument, warn};
use url::Url;

use crate::error::FetchError;
use crate::model::club::{ClubSummary, ClubsResponse};
use crate::model::error_body::ErrorBody;
use crate::model::schedule::ScheduleResponse;
use crate::model::server_time::ServerTime;
use crate::model::tournament::{TournamentLists, TournamentsResponse};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    /// Scheduled times
    #[default]
    Planned,
    /// Real-time schedule
    Real,
}

impl ScheduleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleType::Planned => "planned",
            ScheduleType::Real => "real",
        }
    }
}

/// One of the backend's schedule endpoints, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleQuery {
    /// `GET /api/participants?event_id&club_id&schedule_type`
    Participants { event_id: String, club_id: Option<String>, schedule_type: ScheduleType },
    /// `GET /api/participants/{event_id}?club_id`
    ParticipantsByPath { event_id: String, club_id: Option<String> },
    /// `GET /api/bjj-participants/{event_id}`
    BjjParticipants { event_id: String },
    /// `GET /api/bjj-participants?url=`
    BjjParticipantsByUrl { url: String },
}

impl ScheduleQuery {
    /// Build the request URL below `base`, percent-encoding path segments and query values.
    pub fn to_url(&self, base: &Url) -> Result<Url, FetchError> {
        match self {
            ScheduleQuery::Participants { event_id, club_id, schedule_type } => {
                let mut url = endpoint(base, &["api", "participants"])?;
                {
                    let mut query = url.query_pairs_mut();
                    query.append_pair("event_id", event_id);
                    if let Some(club_id) = club_id {
                        query.append_pair("club_id", club_id);
                    }
                    query.append_pair("schedule_type", schedule_type.as_str());
                }
                Ok(url)
            }
            ScheduleQuery::ParticipantsByPath { event_id, club_id } => {
                let mut url = endpoint(base, &["api", "participants", event_id.as_str()])?;
                if let Some(club_id) = club_id {
                    url.query_pairs_mut().append_pair("club_id", club_id);
                }
                Ok(url)
            }
            ScheduleQuery::BjjParticipants { event_id } => endpoint(base, &["api", "bjj-participants", event_id.as_str()]),
            ScheduleQuery::BjjParticipantsByUrl { url: source } => {
                let mut url = endpoint(base, &["api", "bjj-participants"])?;
                url.query_pairs_mut().append_pair("url", source);
                Ok(url)
            }
        }
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// The backend operations the view needs. Implemented over HTTP by [`HttpBackend`].
pub trait Backend: Send + Sync {
    fn tournaments(&self) -> Result<TournamentLists, FetchError>;
    fn clubs(&self) -> Result<Vec<ClubSummary>, FetchError>;
    fn schedule(&self, query: &ScheduleQuery) -> Result<ScheduleResponse, FetchError>;
    fn server_time(&self) -> Result<ServerTime, FetchError>;
}

/// Blocking HTTP client for the schedule backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url)?;
        // Non-2xx responses still carry a JSON `detail`, so they must not become transport errors.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(30)))
            .build()
            .into();
        Ok(Self { base, agent })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response_result = {
            let _span = info_span!("backend_fetch", url = %url).entered();
            self.agent.get(url.as_str()).call()
        };
        let response = response_result.map_err(|source| {
            error!(error = %source, url = %url, "Request failed");
            FetchError::Transport { url: url.to_string(), source }
        })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, url = %url, "Failed to read response body");
            FetchError::Body(e.to_string())
        })?;

        let _span = info_span!("backend_decode", url = %url).entered();
        decode_response(status, &body)
    }
}

/// Turn a status code and the body text into the payload or a [`FetchError`].
///
/// A non-2xx body is only searched for a string `detail`; any other shape leaves the detail
/// empty so the caller falls back to its generic message.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.detail);
        warn!(status, detail = ?detail, "Backend returned non-success status");
        return Err(FetchError::Status { status, detail });
    }

    debug!(status, bytes = body.len(), "Received backend response");
    serde_json::from_str::<T>(body).map_err(|e| {
        error!(error = %e, "Failed to deserialize backend response");
        FetchError::Decode(e)
    })
}

impl Backend for HttpBackend {
    #[instrument(level = "info", skip(self))]
    fn tournaments(&self) -> Result<TournamentLists, FetchError> {
        let doc: TournamentsResponse = self.get_json(endpoint(&self.base, &["api", "tournaments"])?)?;
        info!(
            active = doc.tournaments.active.len(),
            archived = doc.tournaments.archived.len(),
            "Fetched tournaments"
        );
        Ok(doc.tournaments)
    }

    #[instrument(level = "info", skip(self))]
    fn clubs(&self) -> Result<Vec<ClubSummary>, FetchError> {
        let doc: ClubsResponse = self.get_json(endpoint(&self.base, &["api", "clubs"])?)?;
        info!(clubs = doc.clubs.len(), "Fetched clubs");
        Ok(doc.clubs)
    }

    #[instrument(level = "info", skip(self))]
    fn schedule(&self, query: &ScheduleQuery) -> Result<ScheduleResponse, FetchError> {
        let doc: ScheduleResponse = self.get_json(query.to_url(&self.base)?)?;
        info!(days = doc.schedule.days.len(), "Fetched schedule");
        Ok(doc)
    }

    #[instrument(level = "info", skip(self))]
    fn server_time(&self) -> Result<ServerTime, FetchError> {
        self.get_json(endpoint(&self.base, &["api", "server-time"])?)
    }
}
