use super::HttpClientError;
use crate::prelude::*;
use crate::Result;
use serde::de::DeserializeOwned;

/// Parses the response body as JSON, logging the body if it isn't one.
pub(crate) fn parse_json<Res: DeserializeOwned>(bytes: &[u8]) -> Result<Res> {
    serde_json::from_slice(bytes).map_err(|err| {
        match std::str::from_utf8(bytes) {
            Ok(response_body) => warn!(%response_body, "Bad JSON response"),
            Err(utf8_decode_err) => warn!(
                response_body = ?bytes,
                ?utf8_decode_err,
                "Bad JSON response"
            ),
        };
        err!(HttpClientError::BadResponseJson { source: err })
    })
}
