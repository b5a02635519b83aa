use std::borrow::Cow;
use std::collections::HashMap;

use reqwest::StatusCode;
use shared::{EntityId, ItineraryStatus};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("network_error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("invalid_request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("http_status {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid_response_body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("invalid_url")]
    Url(#[from] url::ParseError),
    #[error("storage_error")]
    Storage(#[from] std::io::Error),
    #[error("illegal status transition from {from} to {to}")]
    IllegalTransition {
        from: ItineraryStatus,
        to: ItineraryStatus,
    },
    #[error("itinerary {0} is not on the board")]
    UnknownItinerary(EntityId),
    #[error("itinerary {0} is already completed")]
    AlreadyCompleted(EntityId),
    #[error("invalid_input: {}", describe(.errors))]
    Validation {
        errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
    },
}

fn describe(errors: &HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>) -> String {
    let mut fields: Vec<_> = errors.iter().collect();
    fields.sort_by(|(left, _), (right, _)| left.cmp(right));
    fields
        .into_iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    pub fn validation<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = HashMap::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::Validation { errors: error_map }
    }

    /// HTTP status of a backend rejection, `None` for local and transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 both mean the stored credential was refused.
    pub fn is_credentials_rejected(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// Errors raised before any request left the client.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::IllegalTransition { .. }
                | Error::UnknownItinerary(_)
                | Error::AlreadyCompleted(_)
                | Error::Validation { .. }
                | Error::Request(_)
                | Error::Url(_)
        )
    }
}
