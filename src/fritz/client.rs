//! Blocking HTTP transport for the router's web interface.

use std::time::{Duration, Instant};

use ureq::Agent;
use ureq::tls::TlsConfig;

use crate::error::TransportError;
use crate::utils::debug_enabled;

/// HTTP client bound to one router base URL.
///
/// TLS certificate verification is disabled on purpose: FRITZ!Box devices
/// ship self-signed certificates and the tool has to keep working against
/// them over https.
pub(crate) struct FritzClient {
    agent: Agent,
    base: String,
}

impl FritzClient {
    pub(crate) fn new(host: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .tls_config(TlsConfig::builder().disable_verification(true).build())
            .build();
        Self {
            agent: config.new_agent(),
            base: normalize_base_url(host),
        }
    }

    /// GET `base + path` with the given query parameters and return the
    /// body. Errors and debug lines carry the path only; query strings
    /// hold credential material and stay out of any output.
    pub(crate) fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base, path);
        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let start = Instant::now();
        let mut response = request.call().map_err(|source| TransportError::Request {
            path: path.to_string(),
            source,
        })?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| TransportError::Body {
                path: path.to_string(),
                source,
            })?;

        if debug_enabled() {
            eprintln!(
                "GET {} -> {} ({} bytes, {:.1}ms)",
                path,
                response.status(),
                body.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        }
        Ok(body)
    }
}

/// Prepend `http://` when no scheme is given and strip one trailing slash.
pub(crate) fn normalize_base_url(host: &str) -> String {
    let mut base = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    if base.ends_with('/') {
        base.pop();
    }
    base
}
