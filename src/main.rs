use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;

mod api;
mod config;
mod handler;
mod http;
mod logger;
mod tls;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        builder.worker_threads(workers);
    }

    builder.build()?.block_on(serve(cfg))
}

async fn serve(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg.logging)?;

    let addr = cfg.socket_addr()?;

    // Startup reads are fatal: no serving without credentials and page
    let acceptor = tls::build_acceptor(&cfg.tls)?;
    let page = tokio::fs::read(&cfg.site.page_file)
        .await
        .map_err(|e| format!("failed to read {}: {e}", cfg.site.page_file))?;

    let listener = bind_reusable(addr)?;
    let state = Arc::new(config::AppState::new(cfg, page.into()));
    logger::log_server_start(&addr, &state.config);

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                let acceptor = acceptor.clone();
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    serve_tls_connection(stream, peer_addr, acceptor, state).await;
                });
            }
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

/// Handshake and serve one connection.
///
/// A failed handshake is logged and the connection dropped; nothing here
/// reaches back into the accept loop. The HTTP/1.1 exchange runs under
/// the larger of the configured read and write timeouts.
async fn serve_tls_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    acceptor: TlsAcceptor,
    state: Arc<config::AppState>,
) {
    let tls_stream = match acceptor.accept(stream).await {
        Ok(s) => s,
        Err(e) => {
            logger::log_handshake_error(&peer_addr, &e);
            return;
        }
    };

    let perf = &state.config.performance;
    let grace = Duration::from_secs(perf.read_timeout.max(perf.write_timeout));

    let mut builder = http1::Builder::new();
    builder.keep_alive(perf.keep_alive_timeout > 0);

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        TokioIo::new(tls_stream),
        service_fn(move |req| {
            let state = Arc::clone(&service_state);
            async move { handler::handle_request(req, state, peer_addr).await }
        }),
    );

    match tokio::time::timeout(grace, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => logger::log_connection_error(&e),
        Err(_) => logger::log_warning(&format!(
            "Closed connection from {peer_addr} after {}s without completion",
            grace.as_secs()
        )),
    }
}

/// Bind a listener with `SO_REUSEADDR` and `SO_REUSEPORT` set, so a
/// restarted process can take the port back without waiting out
/// TIME_WAIT sockets.
fn bind_reusable(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;
    TcpListener::from_std(socket.into())
}
