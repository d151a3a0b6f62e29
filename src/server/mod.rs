//! Development-only static file server for the site directory
//!
//! A local preview aid, not part of the blog itself: the blog has no
//! server. Files are served as they are; the pages fetch the index and
//! documents themselves.

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Blog;

/// Router serving the site directory
pub fn router(blog: &Blog) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(&blog.site_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Start serving until interrupted
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Serving {} at http://{}:{} (development preview)",
        blog.site_dir.display(),
        ip,
        port
    );
    println!("Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr).await?;
    serve(listener, blog).await
}

/// Serve the site directory on an already bound listener
pub async fn serve(listener: TcpListener, blog: &Blog) -> Result<()> {
    tracing::debug!("Listening on {:?}", listener.local_addr()?);
    axum::serve(listener, router(blog)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_site_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("posts.json"), "[]").unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { serve(listener, &blog).await });

        let found = get(addr, "/posts.json").await;
        assert!(found.starts_with("HTTP/1.1 200"));
        assert!(found.ends_with("[]"));

        let missing = get(addr, "/pages/missing.md").await;
        assert!(missing.starts_with("HTTP/1.1 404"));
    }
}
