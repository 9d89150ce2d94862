use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClubsResponse {
    #[serde(default)]
    pub clubs: Vec<ClubSummary>,
}
