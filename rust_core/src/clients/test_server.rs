//! One-shot HTTP(S) servers for exercising the fetcher without network access

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_native_tls::native_tls;

/// Serve `response` verbatim to the first connection, then close it.
///
/// Returns the URL to fetch and a handle resolving to the raw request text.
pub async fn serve_once(response: &'static [u8]) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        respond(socket, response).await
    });

    (format!("http://{}/currencies.js", addr), handle)
}

/// Like [`serve_once`] over TLS, with a self-signed certificate issued for
/// `rates.invalid`. The returned URL targets `127.0.0.1`, so the certificate
/// is both untrusted and hostname-mismatched.
///
/// The handle resolves to `None` when the client aborts the handshake.
pub async fn serve_tls_once(response: &'static [u8]) -> (String, JoinHandle<Option<String>>) {
    let cert = rcgen::generate_simple_self_signed(vec!["rates.invalid".to_string()]).unwrap();
    let identity = native_tls::Identity::from_pkcs8(
        cert.cert.pem().as_bytes(),
        cert.key_pair.serialize_pem().as_bytes(),
    )
    .unwrap();
    let acceptor =
        tokio_native_tls::TlsAcceptor::from(native_tls::TlsAcceptor::new(identity).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let stream = acceptor.accept(socket).await.ok()?;
        Some(respond(stream, response).await)
    });

    (format!("https://{}/currencies.js", addr), handle)
}

/// URL on a local port nothing is listening on
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/currencies.js", addr)
}

async fn respond<S>(mut socket: S, response: &[u8]) -> String
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buf[..n]);
    }

    socket.write_all(response).await.unwrap();
    // The client may already have hung up once it read the declared length
    let _ = socket.shutdown().await;

    String::from_utf8_lossy(&request).into_owned()
}
