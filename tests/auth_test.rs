mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{Form, Router, http::StatusCode, response::Json, routing::post};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use vkbackup::{
    auth::{OAuthClient, SharedAuthState, authorization_url},
    server::router,
    types::PkceToken,
};

fn oauth_client(token_url: &str) -> OAuthClient {
    OAuthClient {
        client_id: "client-123.apps.googleusercontent.com".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8765/callback".to_string(),
        token_url: token_url.to_string(),
    }
}

fn pkce_state(verifier: &str) -> SharedAuthState {
    Arc::new(Mutex::new(Some(PkceToken {
        code_verifier: verifier.to_string(),
        token: None,
    })))
}

async fn fake_token_endpoint(
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["client_secret"], "secret");
    if form["code"] != "good-code" || form["code_verifier"] != "verifier-abc" {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(json!({
        "access_token": "ya29.fresh",
        "expires_in": 3599,
        "scope": "https://www.googleapis.com/auth/drive.file",
        "token_type": "Bearer"
    })))
}

/// Starts the callback server wired to a fake token endpoint.
async fn start_callback_server(state: SharedAuthState) -> String {
    let (token_listener, token_addr) = common::bind().await;
    common::serve(
        token_listener,
        Router::new().route("/token", post(fake_token_endpoint)),
    );

    let oauth = Arc::new(oauth_client(&format!("http://{token_addr}/token")));
    let (listener, addr) = common::bind().await;
    common::serve(listener, router(state, oauth));
    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_service() {
    let base = start_callback_server(pkce_state("verifier-abc")).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn callback_without_code_stores_nothing() {
    let state = pkce_state("verifier-abc");
    let base = start_callback_server(Arc::clone(&state)).await;

    let page = reqwest::get(format!("{base}/callback"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("Missing authorization code"));
    assert!(state.lock().await.as_ref().unwrap().token.is_none());
}

#[tokio::test]
async fn callback_with_denied_consent_stores_nothing() {
    let state = pkce_state("verifier-abc");
    let base = start_callback_server(Arc::clone(&state)).await;

    let page = reqwest::get(format!("{base}/callback?error=access_denied"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("Login failed"));
    assert!(state.lock().await.as_ref().unwrap().token.is_none());
}

#[tokio::test]
async fn callback_exchanges_code_for_token() {
    let state = pkce_state("verifier-abc");
    let base = start_callback_server(Arc::clone(&state)).await;

    let page = reqwest::get(format!("{base}/callback?code=good-code"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Authentication successful"));

    let guard = state.lock().await;
    let token = guard.as_ref().unwrap().token.as_ref().unwrap();
    assert_eq!(token.access_token, "ya29.fresh");
    assert_eq!(token.expires_in, 3599);
    assert!(token.refresh_token.is_none());
}

#[tokio::test]
async fn callback_with_rejected_code_stores_nothing() {
    let state = pkce_state("verifier-abc");
    let base = start_callback_server(Arc::clone(&state)).await;

    let page = reqwest::get(format!("{base}/callback?code=stale-code"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(page.contains("Login failed"));
    assert!(state.lock().await.as_ref().unwrap().token.is_none());
}

#[test]
fn authorization_url_carries_pkce_challenge() {
    let url = authorization_url(&oauth_client("unused"), "challenge-xyz");

    assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(url.contains("client_id=client-123.apps.googleusercontent.com"));
    assert!(url.contains("code_challenge=challenge-xyz"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("scope=https://www.googleapis.com/auth/drive.file"));
}
