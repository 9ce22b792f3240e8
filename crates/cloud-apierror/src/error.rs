//! Typed error for failed Elastic Cloud API calls.

use cloud_multierror::{fields_of, BoxError, Fields, Prefixed, Structured};
use http::StatusCode;
use serde_json::json;

use crate::reply::BasicFailedReply;

/// Prefix of the list produced by [`ApiError::unpack`].
pub const API_ERROR_PREFIX: &str = "api error";

/// A failed Elastic Cloud API call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The API answered with a [`BasicFailedReply`].
    #[error("{status}: {}", .reply.summary())]
    Reply {
        /// HTTP status of the response.
        status: StatusCode,
        /// Decoded reply body.
        reply: BasicFailedReply,
    },

    /// The response body was not a failed reply (proxy pages, empty bodies).
    #[error("{status}: {body}")]
    Unexpected {
        /// HTTP status of the response.
        status: StatusCode,
        /// Raw response body, lossily decoded as UTF-8 and trimmed.
        body: String,
    },
}

impl ApiError {
    /// Classify a non-success response by its status and body.
    ///
    /// ```
    /// use cloud_apierror::ApiError;
    /// use http::StatusCode;
    ///
    /// let body = br#"{"errors":[{"code":"deployments.not_found","message":"no such deployment"}]}"#;
    /// let err = ApiError::from_response(StatusCode::NOT_FOUND, body);
    /// assert_eq!(err.to_string(), "404 Not Found: deployments.not_found: no such deployment");
    /// ```
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match BasicFailedReply::parse(body) {
            Some(reply) => Self::Reply { status, reply },
            None => Self::Unexpected {
                status,
                body: String::from_utf8_lossy(body).trim().to_owned(),
            },
        }
    }

    /// HTTP status of the failed response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Reply { status, .. } | Self::Unexpected { status, .. } => *status,
        }
    }

    /// The decoded reply, if the body was one.
    #[must_use]
    pub const fn reply(&self) -> Option<&BasicFailedReply> {
        match self {
            Self::Reply { reply, .. } => Some(reply),
            Self::Unexpected { .. } => None,
        }
    }

    /// Unpack into an `"api error"` list with one structured entry per
    /// reply element.
    ///
    /// An [`Unexpected`](ApiError::Unexpected) error becomes a single entry.
    #[must_use]
    pub fn unpack(self) -> Prefixed {
        let mut merr = Prefixed::new(API_ERROR_PREFIX);
        match self {
            Self::Reply { reply, .. } => {
                for element in reply.errors {
                    merr.append_structured(element);
                }
            }
            unexpected @ Self::Unexpected { .. } => {
                merr.append_structured(unexpected);
            }
        }
        merr
    }
}

impl Structured for ApiError {
    fn fields(&self) -> Option<Fields> {
        let value = match self {
            Self::Reply { status, reply } => json!({
                "status": status.as_u16(),
                "errors": reply.errors,
            }),
            Self::Unexpected { status, body } => json!({
                "status": status.as_u16(),
                "message": body,
            }),
        };
        fields_of(&value)
    }
}

/// Replace an [`ApiError`] with its [unpacked](ApiError::unpack) list.
///
/// Any other error is returned unchanged.
#[must_use]
pub fn unwrap_error(err: BoxError) -> BoxError {
    match err.downcast::<ApiError>() {
        Ok(api) => Box::new(api.unpack()),
        Err(other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOT_FOUND: &[u8] =
        br#"{"errors":[{"code":"deployments.not_found","message":"no such deployment"}]}"#;

    #[test]
    fn reply_body_is_decoded() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, NOT_FOUND);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.reply().unwrap().errors.len(), 1);
    }

    #[test]
    fn foreign_body_is_unexpected() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, b"  upstream down\n");
        assert!(err.reply().is_none());
        assert_eq!(err.to_string(), "502 Bad Gateway: upstream down");
    }

    #[test]
    fn unpack_reply_keeps_order() {
        let body = br#"{"errors":[{"code":"a","message":"one"},{"code":"b","message":"two"}]}"#;
        let merr = ApiError::from_response(StatusCode::BAD_REQUEST, body).unpack();
        assert_eq!(merr.prefix(), API_ERROR_PREFIX);
        assert_eq!(
            merr.to_string(),
            "api error: 2 errors occurred:\n\t* a: one\n\t* b: two\n\n",
        );
    }

    #[test]
    fn unpack_unexpected_is_single_entry() {
        let merr = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, b"oops").unpack();
        assert_eq!(merr.len(), 1);
        assert_eq!(merr.entries()[0].message(), "500 Internal Server Error: oops");
        let fields = merr.entries()[0].fields().unwrap();
        assert_eq!(fields["status"], 500);
        assert_eq!(fields["message"], "oops");
    }

    #[test]
    fn structured_fields_of_reply() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, NOT_FOUND);
        let fields = err.fields().unwrap();
        assert_eq!(fields["status"], 404);
        assert_eq!(fields["errors"][0]["code"], "deployments.not_found");
    }

    #[test]
    fn unwrap_error_unpacks_api_errors_only() {
        let api: BoxError = Box::new(ApiError::from_response(StatusCode::NOT_FOUND, NOT_FOUND));
        let unpacked = unwrap_error(api);
        assert!(unpacked.is::<Prefixed>());

        let plain: BoxError = "timeout".into();
        assert_eq!(unwrap_error(plain).to_string(), "timeout");
    }

    /// Compile-time assertion that `ApiError` is `Send + Sync`.
    const _: () = {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    };
}
