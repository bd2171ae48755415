use listenfd::ListenFd;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

/// Binds the HTTP listener.
///
/// Without an explicit host or port a socket passed in by the service manager is preferred.
pub async fn create_listener(
    (host, port): (Option<IpAddr>, Option<u16>),
    default_address: SocketAddr,
) -> io::Result<TcpListener> {
    if host.is_none() && port.is_none() {
        let mut listenfd = ListenFd::from_env();
        if let Some(listener) = listenfd.take_tcp_listener(0)? {
            listener.set_nonblocking(true)?;
            tracing::debug!("using socket from listenfd");
            return TcpListener::from_std(listener);
        }
    }

    let address = SocketAddr::from((
        host.unwrap_or(default_address.ip()),
        port.unwrap_or(default_address.port()),
    ));
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, "listening");
    Ok(listener)
}
