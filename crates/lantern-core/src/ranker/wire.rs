use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateKind, Region};
use crate::judge::Judgment;

/// Request body for `POST /v1/rank`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankRequestBody {
    pub query: String,
    pub candidates: Vec<WireCandidate>,
}

/// A candidate as it crosses the wire. Every field is optional so sparse
/// senders stay valid; region and element handles never leave the process.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WireCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CandidateKind>,
}

impl WireCandidate {
    pub fn from_candidate(c: &Candidate) -> Self {
        Self {
            text: (!c.text.is_empty()).then(|| c.text.clone()),
            href: c.href.clone(),
            kind: Some(c.kind),
        }
    }

    /// Converts into the internal model. Absent kind defaults to link and
    /// region to body; scoring on the remote side never uses region anyway.
    pub fn into_candidate(self) -> Candidate {
        Candidate::new(
            self.kind.unwrap_or(CandidateKind::Link),
            self.text.unwrap_or_default(),
            self.href.filter(|h| !h.trim().is_empty()),
            Region::Body,
        )
    }
}

/// Success body for `POST /v1/rank`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponseBody {
    pub ok: bool,
    pub cached: bool,
    pub raw: String,
    /// Decoded verdict, `null` when the reply did not parse.
    pub parsed: Option<Judgment>,
}

/// Error body shared by every non-2xx gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankErrorBody {
    pub ok: bool,
    pub error: String,
}

impl RankErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
