// stepview - Step-Through Debugger Client
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Transport adapter for communicating with the debugger backend
//!
//! Every call is an HTTP POST with a JSON body. The JSON reply is turned
//! into an [`Envelope`] before it leaves this module; logical errors
//! reported by the backend are ordinary envelopes, while anything that
//! prevents us from getting a well-formed envelope is a [`TransportError`].

use reqwest::header::CONTENT_TYPE;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{fmt, time::Duration};
use stepview_common::types::{Envelope, EnvelopeError};
use thiserror::Error;
use tracing::{debug, error};

/// Backend endpoints the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Open a session for a program
    Start,
    /// Execute one line
    Step,
    /// Run until the end of `main`
    RunToEnd,
    /// Terminate a session
    Stop,
}

impl Endpoint {
    /// URL path of the endpoint, relative to the server URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start => "/start",
            Self::Step => "/step",
            Self::RunToEnd => "/run_to_end",
            Self::Stop => "/stop",
        }
    }

    /// Human-readable name, used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Step => "step",
            Self::RunToEnd => "run-to-end",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures that prevent a well-formed envelope from being produced
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or the body could not be read
    #[error("{endpoint} request failed: {source}")]
    Request {
        /// Endpoint that was called
        endpoint: Endpoint,
        /// Underlying network error
        #[source]
        source: reqwest::Error,
    },
    /// The body was not JSON
    #[error("{endpoint} returned a non-JSON body (HTTP {status}): {source}")]
    InvalidJson {
        /// Endpoint that was called
        endpoint: Endpoint,
        /// HTTP status of the reply
        status: u16,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },
    /// The body was JSON but not a response we understand
    #[error("{endpoint} returned an unexpected response: {source}")]
    Envelope {
        /// Endpoint that was called
        endpoint: Endpoint,
        /// Discrimination failure
        #[source]
        source: EnvelopeError,
    },
}

/// Something that can deliver a request to the backend and hand back an envelope
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Post `body` to `endpoint` and discriminate the reply
    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<Envelope<T>, TransportError>
    where
        B: Serialize,
        T: DeserializeOwned;
}

/// HTTP transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    server_url: String,
}

impl HttpTransport {
    /// Create a transport without a request timeout
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(server_url, None)
    }

    /// Create a transport; `timeout` bounds every request when set
    pub fn with_timeout(
        server_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;

        debug!("Created HTTP transport for: {}", server_url);
        Ok(Self { client, server_url: server_url.trim_end_matches('/').to_string() })
    }

    /// Get server URL
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.server_url, endpoint.path())
    }
}

impl Transport for HttpTransport {
    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<Envelope<T>, TransportError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(%endpoint, %url, "Posting request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| {
                error!(%endpoint, "Request failed: {}", source);
                TransportError::Request { endpoint, source }
            })?;

        // Logical errors come back as 4xx with a JSON body, so the status
        // code alone decides nothing
        let status = response.status().as_u16();
        let text =
            response.text().await.map_err(|source| TransportError::Request { endpoint, source })?;

        let value: Value = serde_json::from_str(&text).map_err(|source| {
            error!(%endpoint, status, "Response is not JSON: {}", source);
            TransportError::InvalidJson { endpoint, status, source }
        })?;

        let envelope = Envelope::from_value(value)
            .map_err(|source| TransportError::Envelope { endpoint, source })?;

        debug!(%endpoint, status, kind = envelope.kind(), "Received response");
        Ok(envelope)
    }
}
