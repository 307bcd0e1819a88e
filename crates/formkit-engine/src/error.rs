//! Error taxonomy of the event pipeline
//!
//! Deliberate no-ops are not errors here: a rule that chooses to do nothing
//! reports `Reaction::Skip` as data. What remains is cancellation, blocked
//! submissions, integration failures and a generic wrapped remainder.
//!
//! Every variant is `Clone` so a memoized task outcome can be observed by
//! multiple awaiters.

use formkit_model::{Header, ServiceId, Tag};

/// Failure of an integration call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request was canceled in flight.
    #[error("request canceled")]
    Canceled,

    /// The response arrived but could not be decoded.
    #[error("response decoding failed: {0}")]
    Decode(String),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// An unexpected HTTP status.
    #[error("unexpected http status {status}")]
    Status {
        /// The status code.
        status: u16,
        /// Response body, when one was captured.
        body: Option<String>,
    },

    /// Anything the integration could not classify.
    #[error("unknown api failure")]
    Unknown,
}

/// Main pipeline error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// An in-flight unit of work was canceled. Callers that superseded the
    /// work themselves absorb this as a skip; anywhere else it surfaces as
    /// an aborted operation.
    #[error("operation canceled")]
    Canceled,

    /// A send was attempted while mandatory fields are invalid. Carries the
    /// offending field headers for field-level feedback.
    #[error("form has {} invalid input(s)", .0.len())]
    InvalidInputs(Vec<Header>),

    /// A rule addressed a field by tag and found nothing.
    #[error("no input carries tag {0}")]
    MissingInput(Tag),

    /// The integration rejected the caller's credentials; the caller should
    /// prompt re-authentication for this integration.
    #[error("authentication required for integration {0}")]
    Auth(ServiceId),

    /// Integration/API failure.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Anything else, wrapped with a human-readable description.
    #[error("{0}")]
    Other(String),
}

impl FormError {
    /// Whether this failure came from cancellation.
    #[inline]
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled | Self::Api(ApiError::Canceled))
    }
}

/// Map an integration call's errors into form errors, translating an HTTP
/// 401 into the "auth required for this integration" condition so the caller
/// can prompt re-authentication instead of showing a generic failure.
pub async fn with_auth_mapping<T>(
    integration: ServiceId,
    call: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, FormError> {
    match call.await {
        Ok(value) => Ok(value),
        Err(ApiError::Status { status: 401, .. }) => Err(FormError::Auth(integration)),
        Err(api) => Err(FormError::Api(api)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unauthorized_maps_to_auth_required() {
        let integration = ServiceId::new();
        let unauthorized = async {
            Err::<(), _>(ApiError::Status {
                status: 401,
                body: None,
            })
        };
        let err = with_auth_mapping(integration, unauthorized)
            .await
            .unwrap_err();
        assert_eq!(err, FormError::Auth(integration));
    }

    #[tokio::test]
    async fn other_statuses_stay_api_errors() {
        let integration = ServiceId::new();
        let server_error = async {
            Err::<(), _>(ApiError::Status {
                status: 500,
                body: Some("boom".into()),
            })
        };
        let err = with_auth_mapping(integration, server_error).await.unwrap_err();
        assert!(matches!(err, FormError::Api(ApiError::Status { status: 500, .. })));
    }

    #[test]
    fn cancellation_is_recognized_in_both_layers() {
        assert!(FormError::Canceled.is_canceled());
        assert!(FormError::Api(ApiError::Canceled).is_canceled());
        assert!(!FormError::Other("x".into()).is_canceled());
    }
}
