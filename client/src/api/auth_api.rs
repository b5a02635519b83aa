use secrecy::{ExposeSecret, SecretString};
use shared::{LoginRequest, RegisterRequest, TokenResponse};
use tracing::info;

use super::check;
use crate::error::Result;
use crate::http::ApiClient;

fn validate_credentials(email: &str, password: &SecretString) -> Vec<(&'static str, &'static str)> {
    let mut errors = Vec::new();
    if email.trim().is_empty() {
        errors.push(("email", "email must not be empty"));
    }
    if password.expose_secret().trim().is_empty() {
        errors.push(("password", "password must not be empty"));
    }
    errors
}

/// Exchanges credentials for a bearer token. Persisting it is up to the caller.
pub async fn login(client: &ApiClient, email: &str, password: SecretString) -> Result<TokenResponse> {
    check(validate_credentials(email, &password))?;
    let request = LoginRequest {
        email: email.trim().to_owned(),
        password,
    };
    let response: TokenResponse = client.post_json("/login", &request).await?;
    info!(email = %request.email, "Api login succeeded");
    Ok(response)
}

pub async fn register(
    client: &ApiClient,
    name: &str,
    email: &str,
    password: SecretString,
) -> Result<TokenResponse> {
    let mut errors = validate_credentials(email, &password);
    if name.trim().is_empty() {
        errors.push(("name", "name must not be empty"));
    }
    check(errors)?;
    let request = RegisterRequest {
        name: name.trim().to_owned(),
        email: email.trim().to_owned(),
        password,
    };
    let response: TokenResponse = client.post_json("/register", &request).await?;
    info!(email = %request.email, "Api account registered");
    Ok(response)
}
