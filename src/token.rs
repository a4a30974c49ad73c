use std::io::{self, Read, Write};

use reqwest::{
    blocking::{Client, Request},
    header::CONTENT_TYPE,
};
use serde::Deserialize;

use crate::{
    config::{ConfigProvider, Credentials},
    Environment, Result, SfError,
};

const TOKEN_PATH: &str = "/services/oauth2/token";

/// Body of a successful token endpoint response.
///
/// Only `access_token` is used; the rest is kept as returned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub instance_url: String,
    pub id: String,
    pub token_type: String,
    pub issued_at: String,
    pub signature: String,
}

#[derive(Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Builds the password grant request. Nothing is sent.
pub fn token_request(client: &Client, creds: &Credentials) -> reqwest::Result<Request> {
    client
        .post(format!("{}{}", creds.domain_url, TOKEN_PATH))
        .header(CONTENT_TYPE, "application/json")
        .query(&[
            ("grant_type", "password"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
        ])
        .build()
}

/// Requests a session token for `env` using the credentials in `config`.
///
/// Exactly one request is made. The response status is not checked: any
/// body that parses as a [`TokenResponse`] is accepted.
pub fn fetch_session_token<C>(env: Environment, config: &C) -> Result<TokenResponse>
where
    C: ConfigProvider + ?Sized,
{
    let creds = Credentials::from_config(env, config)?;

    // the query carries the credentials: keep urls out of error messages
    let request_failed = |e: reqwest::Error| SfError::RequestFailed(env, e.without_url().to_string());

    let client = Client::new();
    let request = token_request(&client, &creds).map_err(request_failed)?;
    let url = request.url();
    log::debug!(
        "{}: Requesting token from {}://{}{}",
        env,
        url.scheme(),
        url.host_str().unwrap_or_default(),
        url.path()
    );

    let response = client.execute(request).map_err(request_failed)?;
    let status = response.status();
    if status.is_success() {
        log::debug!("{}: Token endpoint responded with {}", env, status);
    } else {
        log::warn!("{}: Token endpoint responded with {}", env, status);
    }

    read_token_response(response)
}

/// Reads `body` to the end and parses it as a token response.
pub fn read_token_response<R: Read>(mut body: R) -> Result<TokenResponse> {
    let mut buf = Vec::new();
    body.read_to_end(&mut buf)
        .map_err(|e| SfError::BodyReadFailed(e.to_string()))?;
    drop(body);

    serde_json::from_slice::<TokenResponse>(&buf).map_err(|e| {
        match serde_json::from_slice::<OAuthErrorResponse>(&buf) {
            Ok(oauth) if oauth.error_description.is_empty() => {
                SfError::DeserializationFailed(format!("token endpoint error: {}", oauth.error))
            }
            Ok(oauth) => SfError::DeserializationFailed(format!(
                "token endpoint error: {}: {}",
                oauth.error, oauth.error_description
            )),
            Err(_) => SfError::DeserializationFailed(e.to_string()),
        }
    })
}

pub fn report_session<W: Write>(out: &mut W, token: &TokenResponse) -> io::Result<()> {
    writeln!(out, "Session ID: {}", token.access_token)
}
