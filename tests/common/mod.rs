#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use tokio::net::TcpListener;
use vkbackup::types::Token;

pub async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

pub fn serve(listener: TcpListener, app: Router) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

// Fresh, empty directory unique to this test process
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("vkbackup-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn test_token() -> Token {
    Token {
        access_token: "ya29.test".to_string(),
        refresh_token: None,
        scope: "https://www.googleapis.com/auth/drive.file".to_string(),
        expires_in: 3600,
        obtained_at: 0,
    }
}
