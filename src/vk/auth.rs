pub const APP_ID: &str = "51792163";
pub const OAUTH_BASE_URL: &str = "https://oauth.vk.com/authorize";
pub const REDIRECT_URI: &str = "https://oauth.vk.com/blank.html";
pub const SCOPE: &str = "status,photos,offline";

/// Implicit-grant URL that yields a non-expiring VK token for this app.
///
/// Open it in a browser, approve access and copy `access_token` from the
/// address bar of the blank page into the `[VK]` section of `tokens.ini`.
pub fn authorize_url() -> String {
    format!(
        "{oauth_url}?client_id={client_id}&redirect_uri={redirect_uri}&display=page&scope={scope}&response_type=token&expires_in=0",
        oauth_url = OAUTH_BASE_URL,
        client_id = APP_ID,
        redirect_uri = REDIRECT_URI,
        scope = SCOPE,
    )
}
