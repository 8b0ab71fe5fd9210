mod model;

use crate::http::{self, HttpRequest, Method, ReqwestTransport, Transport};
use crate::payload::{Payload, ProjectOptions, RequiredParams};
use crate::prelude::*;
use crate::{Config, ErrorKind, Result};
use chrono::prelude::*;
use model::ExpiringTokenResponse;
use url::Url;

const API_BASE_URL: &str = "https://api.wistia.com/v1/";

/// Only the expiring tokens live in v2 for now, see
/// <https://wistia.com/support/developers/v2-api-change-summary-08172016>
const API_BASE_URL_V2: &str = "https://api.wistia.com/v2/";

const EXPIRING_TOKEN_PATH: &str = "expiring_token";

/// Blocking client for the Wistia data API.
///
/// Every method makes exactly one HTTP request. There are no retries, no
/// caching and no mutable state, so a single client may be shared freely
/// as long as its [`Transport`] allows that.
///
/// ```no_run
/// let config = wistia::Config::new("api-password")?;
/// let client = wistia::Client::new(config)?;
///
/// let params = wistia::RequiredParams::new().with("access", true);
/// let token = client.get_upload_expiring_token("project-id", &params, None)?;
/// # Ok::<(), wistia::Error>(())
/// ```
#[derive(Debug)]
pub struct Client<T = ReqwestTransport> {
    config: Config,
    transport: T,
}

impl Client {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds an absolute URL for the path relative to the API root, e.g.
    /// `medias.json`. The base URL version is chosen based on the path, and
    /// the API password is appended to the query string.
    pub fn build_url(&self, rel_path: &str) -> Result<Url> {
        let rel_path = rel_path.trim_start_matches('/');

        let base = if rel_path.contains(EXPIRING_TOKEN_PATH) {
            API_BASE_URL_V2
        } else {
            API_BASE_URL
        };

        let mut url: Url = format!("{base}{rel_path}")
            .parse()
            .map_err(err_ctx!(ErrorKind::InvalidUrl { rel_path }))?;

        let auth = format!("api_password={}", self.config.api_password);

        let query = match url.query() {
            Some(query) if !query.is_empty() => format!("{query}&{auth}"),
            _ => auth,
        };

        url.set_query(Some(&query));

        Ok(url)
    }

    /// Sends a single request to the API and returns the parsed JSON response.
    ///
    /// The payload, if any, is sent as a form in the request body. The
    /// response status code is not inspected, the body is returned as-is.
    pub fn call(
        &self,
        rel_path: &str,
        payload: Option<Payload>,
        method: Method,
    ) -> Result<serde_json::Value> {
        let url = self.build_url(rel_path)?;

        debug!(%method, rel_path, "Calling Wistia API");

        let body = self.transport.execute(HttpRequest {
            method,
            url,
            payload,
        })?;

        http::parse_json(&body)
    }

    /// Shortcut for [`Self::call()`] with `GET` and no payload
    pub fn get(&self, rel_path: &str) -> Result<serde_json::Value> {
        self.call(rel_path, None, Method::default())
    }

    /// Requests an expiring token, optionally requiring the given params
    /// from the uploader.
    ///
    /// If `expires_at` is `None` the token expires after the configured
    /// [`Config::expiry_delta()`] from now.
    ///
    /// See <https://wistia.com/support/developers/uploader#using-expiring-tokens>
    pub fn get_expiring_token(
        &self,
        required_params: &RequiredParams,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let expires_at = match expires_at {
            Some(expires_at) => expires_at,
            None => self.default_expires_at()?,
        };

        let mut payload = required_params.to_payload();
        payload.push("expires_at", expires_at.timestamp());

        debug!(%expires_at, "Requesting an expiring token");

        let json = self.call(EXPIRING_TOKEN_PATH, Some(payload), Method::Post)?;

        let response: ExpiringTokenResponse = serde_json::from_value(json).map_err(err_ctx!(
            ErrorKind::UnexpectedResponseShape {
                rel_path: EXPIRING_TOKEN_PATH
            }
        ))?;

        Ok(response.data.id)
    }

    /// Same as [`Self::get_expiring_token()`], but additionally requires
    /// the uploader to upload into the given project.
    pub fn get_upload_expiring_token(
        &self,
        project_id: &str,
        required_params: &RequiredParams,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String> {
        let required_params = required_params.clone().with("project_id", project_id);
        self.get_expiring_token(&required_params, expires_at)
    }

    /// Creates a project. See [`ProjectOptions`] for the defaults applied.
    pub fn project_create(&self, name: &str, options: ProjectOptions) -> Result<serde_json::Value> {
        let payload = options.into_payload(name);
        self.call("projects.json", Some(payload), Method::Post)
    }

    /// See <https://wistia.com/support/developers/data-api#medias_update>
    pub fn medias_update(&self, hashed_id: &str, params: Payload) -> Result<serde_json::Value> {
        self.call(&medias_path(hashed_id), Some(params), Method::Put)
    }

    /// See <https://wistia.com/support/developers/data-api#medias_delete>
    ///
    /// The request is sent without a body, `params` are dropped.
    pub fn medias_delete(&self, hashed_id: &str, params: Payload) -> Result<serde_json::Value> {
        if !params.is_empty() {
            warn!(
                hashed_id,
                ?params,
                "Params passed to medias_delete are not sent to the API"
            );
        }
        self.call(&medias_path(hashed_id), None, Method::Delete)
    }

    fn default_expires_at(&self) -> Result<DateTime<Utc>> {
        let delta = self.config.expiry_delta;

        chrono::Duration::from_std(delta)
            .ok()
            .and_then(|delta| Utc::now().checked_add_signed(delta))
            .ok_or_else(|| err!(ErrorKind::ExpiryOutOfRange { delta }))
    }
}

fn medias_path(hashed_id: &str) -> String {
    format!("medias/{hashed_id}.json")
}
