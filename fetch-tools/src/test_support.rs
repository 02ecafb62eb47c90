//! In-process upstream servers for fetch tests.

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An axum router served on an ephemeral localhost port; stops on drop.
pub struct MockUpstream {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn spawn(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL whose port was just released, so connecting to it is refused.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
