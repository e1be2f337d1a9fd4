//! HTTP server configuration object.

use std::net::SocketAddr;

use crate::inbound::http::cors::OriginPolicy;

/// Listener settings for [`create_server`](super::create_server).
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) origin_policy: OriginPolicy,
}

impl ServerConfig {
    /// Listen on `bind_addr` and apply `origin_policy` to cross-origin calls.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, origin_policy: OriginPolicy) -> Self {
        Self {
            bind_addr,
            origin_policy,
        }
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
