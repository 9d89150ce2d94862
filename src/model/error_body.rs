use serde::{Deserialize, Serialize};

/// Body of every non-2xx backend response.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
