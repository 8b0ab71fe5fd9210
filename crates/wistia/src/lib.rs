//! A thin blocking client for the [Wistia data API].
//!
//! [`Client`] wraps a handful of endpoints: expiring token issuance, project
//! creation, media update and delete, plus a generic [`Client::call`] for
//! everything else. Responses are returned as raw [`serde_json::Value`]s.
//!
//! [Wistia data API]: https://wistia.com/support/developers/data-api
mod client;
mod config;
mod error;
mod http;
mod observability;
mod payload;

pub mod util;

pub use crate::client::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::http::{HttpClientError, HttpRequest, Method, ReqwestTransport, Transport};
pub use crate::observability::*;
pub use crate::payload::*;

#[allow(unused_imports)]
mod prelude {
    pub(crate) use crate::error::prelude::*;
    pub(crate) use crate::observability::logging::prelude::*;
    pub(crate) use crate::util::prelude::*;
}
