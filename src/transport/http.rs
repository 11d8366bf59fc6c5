use crate::request::RequestSpec;
use crate::transport::{TransportConfig, TransportError};
use crate::{Error, Result};
use reqwest::{redirect, Proxy};
use tracing::{info, warn};

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        // Connect deadline only: an open stream may run indefinitely.
        // Idle connections are not kept; every invocation opens its own.
        // Redirects are not followed, so a 3xx reaches the status check.
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(0)
            .redirect(redirect::Policy::none());

        if let Some(proxy_url) = &config.proxy_url {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!(proxy = %proxy_url, error = %e, "ignoring invalid proxy url"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// Send the request and return the response as soon as headers arrive.
    ///
    /// The body is left unread; status handling belongs to the caller.
    pub async fn execute_stream_response(
        &self,
        spec: &RequestSpec,
        invocation_id: &str,
    ) -> Result<reqwest::Response> {
        let mut req = self
            .client
            .request(spec.method().clone(), spec.url())
            .headers(spec.headers().to_header_map()?);

        if let Some(body) = spec.body() {
            req = req.json(body);
        }

        info!(
            invocation_id,
            method = %spec.method(),
            url = spec.url(),
            has_body = spec.body().is_some(),
            "sending streaming request"
        );

        req.send().await.map_err(|e| {
            warn!(invocation_id, error = %e, "streaming request failed before response");
            Error::Transport(TransportError::Http(e))
        })
    }
}
