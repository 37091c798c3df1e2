//! Client hangup detection.
//!
//! Actix keeps polling a handler after its client has gone, so a handler
//! never learns about a disconnect by being dropped. Instead every accepted
//! TCP connection gets a [`ConnectionCancellation`] in its connection data,
//! and a watcher task peeks at a duplicate of the socket. End of stream or a
//! socket error cancels the connection token, which cancels every request
//! still running on that connection.
//!
//! The watcher stops when the connection scope drops or the server shuts
//! down, so it never outlives the connection by more than the peer's close.

use std::any::Any;
use std::io;
use std::time::Duration;

use actix_web::dev::Extensions;
use actix_web::rt::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::inbound::http::cancellation::ConnectionCancellation;

/// Pause while unread request bytes wait for the dispatcher.
const PENDING_INPUT_BACKOFF: Duration = Duration::from_millis(50);

/// `HttpServer::on_connect` callback installing the connection scope.
pub(crate) fn watch_connections(
    shutdown: CancellationToken,
) -> impl Fn(&dyn Any, &mut Extensions) + Send + Sync + 'static {
    move |conn, data| {
        let connection = ConnectionCancellation::child_of(&shutdown);
        if let Some(stream) = conn.downcast_ref::<TcpStream>() {
            match duplicate(stream) {
                Ok(watched) => {
                    actix_web::rt::spawn(watch_for_hangup(
                        watched,
                        connection.token().clone(),
                    ));
                }
                Err(err) => warn!(error = %err, "client hangups will not cancel requests"),
            }
        }
        data.insert(connection);
    }
}

#[cfg(unix)]
fn duplicate(stream: &TcpStream) -> io::Result<TcpStream> {
    use std::os::fd::AsFd;

    let owned = stream.as_fd().try_clone_to_owned()?;
    let std_stream = std::net::TcpStream::from(owned);
    std_stream.set_nonblocking(true)?;
    TcpStream::from_std(std_stream)
}

#[cfg(windows)]
fn duplicate(stream: &TcpStream) -> io::Result<TcpStream> {
    use std::os::windows::io::AsSocket;

    let owned = stream.as_socket().try_clone_to_owned()?;
    let std_stream = std::net::TcpStream::from(owned);
    std_stream.set_nonblocking(true)?;
    TcpStream::from_std(std_stream)
}

/// Cancel `connection` once the peer closes or resets the socket.
async fn watch_for_hangup(stream: TcpStream, connection: CancellationToken) {
    let mut buf = [0_u8; 1];
    loop {
        let peeked = tokio::select! {
            biased;
            () = connection.cancelled() => return,
            peeked = stream.peek(&mut buf) => peeked,
        };
        match peeked {
            Ok(0) => {
                debug!("client closed the connection");
                connection.cancel();
                return;
            }
            Err(err) => {
                debug!(error = %err, "client connection failed");
                connection.cancel();
                return;
            }
            // Unread bytes belong to the dispatcher; peeking again at once
            // would spin.
            Ok(_) => {
                tokio::select! {
                    biased;
                    () = connection.cancelled() => return,
                    () = tokio::time::sleep(PENDING_INPUT_BACKOFF) => {}
                }
            }
        }
    }
}
