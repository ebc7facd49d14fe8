use axum::{Extension, Router, routing::get};
use std::{io, sync::Arc};
use tokio::net::TcpListener;

use crate::{
    api,
    auth::{OAuthClient, SharedAuthState},
};

pub fn router(state: SharedAuthState, oauth: Arc<OAuthClient>) -> Router {
    Router::new().route("/health", get(api::health)).route(
        "/callback",
        get(api::callback)
            .layer::<_, std::convert::Infallible>(Extension(state))
            .layer(Extension(oauth)),
    )
}

pub async fn start_api_server(
    listener: TcpListener,
    state: SharedAuthState,
    oauth: Arc<OAuthClient>,
) -> io::Result<()> {
    axum::serve(listener, router(state, oauth)).await
}
