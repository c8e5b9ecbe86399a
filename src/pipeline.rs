//! Request pipeline: bounded retries around the transport, followed by
//! conversion of ambiguous HTTP outcomes into typed errors.

use reqwest::{Client, Method, Request, Response, StatusCode};
use tracing::warn;

use crate::config::MAX_RETRIES;
use crate::errors::{Error, Result};

/// Retry predicate applied after every physical attempt.
///
/// Connection-level failures and 5xx responses are re-issued until the
/// attempt cap; everything else (4xx included) is final.
pub fn should_retry(attempt: u32, status: Option<StatusCode>, connect_failure: bool) -> bool {
    if attempt >= MAX_RETRIES {
        return false;
    }

    if connect_failure {
        return true;
    }

    matches!(status, Some(status) if status.is_server_error())
}

/// Converts ambiguous status codes on the final response into typed errors.
///
/// Evaluated in order, first match wins; anything that falls through is
/// returned unchanged for the calling operation to interpret.
pub fn classify(method: &Method, response: Response) -> Result<Response> {
    let status = response.status();

    if *method == Method::GET && status == StatusCode::NO_CONTENT {
        return Err(Error::NoContent {
            url: response.url().clone(),
        });
    }

    if status == StatusCode::FORBIDDEN {
        return Err(Error::Forbidden {
            url: response.url().clone(),
        });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(Error::TooManyRequests {
            url: response.url().clone(),
        });
    }

    Ok(response)
}

/// Executes a request with up to `MAX_RETRIES` re-issues, then classifies
/// the final outcome. Remaining 4xx/5xx statuses become `Error::Network`.
///
/// Streaming bodies (multipart uploads) cannot be cloned and get exactly
/// one attempt.
pub(crate) async fn send(http: &Client, mut request: Request) -> Result<Response> {
    let method = request.method().clone();
    let mut attempt: u32 = 0;

    loop {
        let next = request.try_clone();

        match http.execute(request).await {
            Ok(response) => {
                if should_retry(attempt, Some(response.status()), false) {
                    if let Some(retry) = next {
                        warn!(status = %response.status(), attempt, "server error, retrying");
                        attempt += 1;
                        request = retry;
                        continue;
                    }
                }

                let response = classify(&method, response)?;
                return Ok(response.error_for_status()?);
            }
            Err(err) => {
                let connect_failure = err.is_connect() || err.is_timeout();
                if should_retry(attempt, None, connect_failure) {
                    if let Some(retry) = next {
                        warn!(error = %err, attempt, "connection failure, retrying");
                        attempt += 1;
                        request = retry;
                        continue;
                    }
                }

                return Err(Error::Network(err));
            }
        }
    }
}
