//! Failed reply payload returned by the Elastic Cloud API.

use std::fmt;

use cloud_multierror::{fields_of, Fields, Structured};
use serde::{Deserialize, Serialize};

/// One error of a [`BasicFailedReply`].
///
/// ```json
/// { "code": "deployments.not_found", "message": "...", "fields": ["id"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyElement {
    /// Machine-readable error code, e.g. `deployments.not_found`.
    pub code: String,

    /// Human-readable description.
    pub message: String,

    /// Request fields the error refers to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl fmt::Display for ReplyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ReplyElement {}

impl Structured for ReplyElement {
    fn fields(&self) -> Option<Fields> {
        fields_of(self)
    }
}

/// Body of a failed Elastic Cloud API call: `{"errors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFailedReply {
    /// The reported errors, in the order the API returned them.
    #[serde(default)]
    pub errors: Vec<ReplyElement>,
}

impl BasicFailedReply {
    /// Decode a reply body. Bodies without any error element yield `None`.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Self>(body) {
            Ok(reply) if !reply.errors.is_empty() => Some(reply),
            Ok(_) => {
                tracing::debug!("failed reply body has no errors");
                None
            }
            Err(err) => {
                tracing::debug!(%err, "response body is not a failed reply");
                None
            }
        }
    }

    /// The reply errors joined with `", "`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
