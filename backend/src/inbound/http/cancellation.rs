//! Per-request cancellation derived from the server's shutdown token.
//!
//! Tokens nest: shutdown, then connection, then request. The server gives
//! every accepted connection a [`ConnectionCancellation`] in its connection
//! data and cancels it when the client hangs up. Handlers hold a
//! [`RequestCancellation`] for as long as their future lives, and its token
//! is the one passed to the existence probe.

use actix_web::HttpRequest;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Child token that is cancelled when this value drops.
struct ScopedToken {
    token: CancellationToken,
    _guard: DropGuard,
}

impl ScopedToken {
    fn child_of(parent: &CancellationToken) -> Self {
        let token = parent.child_token();
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }
}

/// Cancellation scope of one client connection.
///
/// Lives in Actix connection data, so it drops once the connection and every
/// request it carried are gone.
pub struct ConnectionCancellation(ScopedToken);

impl ConnectionCancellation {
    pub fn child_of(shutdown: &CancellationToken) -> Self {
        Self(ScopedToken::child_of(shutdown))
    }

    pub fn token(&self) -> &CancellationToken {
        &self.0.token
    }
}

/// Cancellation scope of one handler invocation.
pub struct RequestCancellation(ScopedToken);

impl RequestCancellation {
    /// Derive a child of `root` that is also cancelled when this value drops.
    pub fn child_of(root: &CancellationToken) -> Self {
        Self(ScopedToken::child_of(root))
    }

    /// Derive from the connection scope of `req`, or from `root` when the
    /// request carries none (test requests, non-TCP transports).
    pub fn for_request(req: &HttpRequest, root: &CancellationToken) -> Self {
        let parent = req
            .conn_data::<ConnectionCancellation>()
            .map_or(root, ConnectionCancellation::token);
        Self::child_of(parent)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.0.token
    }
}
