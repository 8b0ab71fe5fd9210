mod json_ext;

#[cfg(test)]
pub(crate) mod mock;

use crate::payload::Payload;
use crate::prelude::*;
use crate::Result;
use std::time::Instant;

pub(crate) use json_ext::parse_json;

/// HTTP verbs used by the Wistia data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, clap::ValueEnum)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// A single request to the remote API. It is built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL including the `api_password` query parameter.
    pub url: url::Url,

    /// Form-encoded into the request body. `None` means no body at all.
    pub payload: Option<Payload>,
}

/// Executes [`HttpRequest`]s and returns the raw response body.
///
/// Implementations must not inspect the response status code: error
/// responses from Wistia carry a JSON body that is returned to the caller as-is.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<Vec<u8>> {
        (**self).execute(request)
    }
}

/// The default [`Transport`] that goes to the network using a blocking
/// [`reqwest`] client. There are no retries and no timeout overrides.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(
                "wistia-rs/",
                env!("CARGO_PKG_VERSION"),
                " (https://github.com/UpliftAgency/wistia-py)",
            ))
            .build()
            .map_err(err_ctx!(HttpClientError::Build))?;

        Ok(Self::from_client(client))
    }

    /// Reuse an existing client, e.g. one with custom timeouts or proxies.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<Vec<u8>> {
        let span = info_span!(
            "request",
            method = %request.method,
            url = tracing_url(&request.url),
        );
        let _guard = span.enter();

        let mut builder = self.client.request(request.method.into(), request.url);

        if let Some(payload) = &request.payload {
            builder = builder.form(payload.fields());
        }

        let start = Instant::now();
        let result = builder.send();
        let duration = tracing_duration(start.elapsed());

        // `reqwest::Error` displays the full URL, and the query carries the password
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                let err = err.without_url();
                error!(duration, err = tracing_err(&err), "Network request failed");
                return Err(err!(HttpClientError::Request { source: err }));
            }
        };

        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            warn!(duration, %status, "Network request failed (error status)");
        } else {
            info!(duration, %status, "Network request succeeded");
        }

        let body = response.bytes().map_err(|err| {
            err!(HttpClientError::ReadPayload {
                source: err.without_url()
            })
        })?;

        Ok(body.to_vec())
    }
}

/// Errors at the layer of the HTTP API
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Failed to build the HTTP client")]
    Build { source: reqwest::Error },

    #[error("HTTP request failed")]
    Request { source: reqwest::Error },

    #[error("Failed to read HTTP response")]
    ReadPayload { source: reqwest::Error },

    #[error("Received a response body that is not valid JSON")]
    BadResponseJson { source: serde_json::Error },
}
