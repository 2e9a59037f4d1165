//! Conversions from external infrastructure errors into domain errors.

use reqwest::{Error as HttpError, StatusCode};
use timebot_domain::TimebotError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TimebotError);

impl From<InfraError> for TimebotError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TimebotError> for InfraError {
    fn from(value: TimebotError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTimebotError {
    fn into_timebot(self) -> TimebotError;
}

/* -------------------------------------------------------------------------- */
/* HTTP status → TimebotError */
/* -------------------------------------------------------------------------- */

/// Map a non-success response to the domain taxonomy.
///
/// `body` is appended to the message when non-empty.
pub fn status_error(status: StatusCode, url: &str, body: &str) -> TimebotError {
    let body = body.trim();
    let message = if body.is_empty() {
        format!("{url} returned status {status}")
    } else {
        format!("{url} returned status {status}: {body}")
    };

    match status.as_u16() {
        401 | 403 => TimebotError::Auth(message),
        404 => TimebotError::NotFound(message),
        429 => TimebotError::RateLimit(message),
        400..=499 => TimebotError::InvalidInput(message),
        _ => TimebotError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TimebotError */
/* -------------------------------------------------------------------------- */

impl IntoTimebotError for HttpError {
    fn into_timebot(self) -> TimebotError {
        if self.is_timeout() {
            return TimebotError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return TimebotError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return TimebotError::Network(format!("HTTP response could not be decoded: {self}"));
        }

        if let Some(status) = self.status() {
            let url = self.url().map(ToString::to_string).unwrap_or_default();
            return status_error(status, &url, "");
        }

        TimebotError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_timebot())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::Client;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        let url = "https://acme.harvestapp.com/people";
        assert!(matches!(status_error(StatusCode::UNAUTHORIZED, url, ""), TimebotError::Auth(_)));
        assert!(matches!(status_error(StatusCode::FORBIDDEN, url, ""), TimebotError::Auth(_)));
        assert!(matches!(status_error(StatusCode::NOT_FOUND, url, ""), TimebotError::NotFound(_)));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, url, ""),
            TimebotError::RateLimit(_)
        ));
        assert!(matches!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, url, ""),
            TimebotError::InvalidInput(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, url, ""),
            TimebotError::Network(_)
        ));
    }

    #[test]
    fn status_message_includes_body() {
        let err = status_error(StatusCode::BAD_REQUEST, "http://x/daily/add", " project archived ");
        assert_eq!(
            err,
            TimebotError::InvalidInput(
                "http://x/daily/add returned status 400 Bad Request: project archived".into()
            )
        );
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: TimebotError = InfraError::from(error).into();
        match mapped {
            TimebotError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {:?}", other),
        }
    }
}
