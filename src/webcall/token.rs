use crate::{secrets::Secrets, CONFIG};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Resource paths every client token may access.
pub const USER_ACL_PATHS: [&str; 4] = [
    "/v1/users/**",
    "/v1/conversations/**",
    "/v1/sessions/**",
    "/v1/knocking/**",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGrant {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acl {
    pub paths: BTreeMap<String, PathGrant>,
}

impl Acl {
    pub fn user() -> Self {
        Self {
            paths: USER_ACL_PATHS
                .iter()
                .map(|path| (path.to_string(), PathGrant::default()))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iat: i64,
    pub jti: String,
    pub application_id: String,
    pub sub: String,
    pub exp: i64,
    pub acl: Acl,
}

#[derive(Debug, Serialize)]
pub struct UserToken {
    #[serde(rename = "userJwt")]
    pub user_jwt: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("NEXMO_APP_ID is not set")]
    MissingAppId,
    #[error("NEXMO_PRIVATE_KEY is not set")]
    MissingPrivateKey,
    #[error("failed to read private key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        log::error!("Error generating user token: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Loads the RS256 signing key. The setting holds either the PEM itself,
/// possibly with escaped newlines from a one-line env file, or a path.
pub fn load_private_key(value: &str) -> Result<EncodingKey, TokenError> {
    let pem = if value.trim_start().starts_with("-----BEGIN") {
        value.replace("\\n", "\n").into_bytes()
    } else {
        std::fs::read(value).map_err(|source| TokenError::KeyFile {
            path: value.to_string(),
            source,
        })?
    };

    EncodingKey::from_rsa_pem(&pem).map_err(TokenError::InvalidKey)
}

/// Signs a client token for the configured user, valid for `lifetime`
/// from `now`.
pub fn generate_user_jwt(
    secrets: &Secrets,
    now: DateTime<Utc>,
    lifetime: Duration,
) -> Result<String, TokenError> {
    let application_id = secrets
        .nexmo_app_id
        .clone()
        .ok_or(TokenError::MissingAppId)?;
    let private_key = secrets
        .nexmo_private_key
        .as_deref()
        .ok_or(TokenError::MissingPrivateKey)?;
    let key = load_private_key(private_key)?;

    let iat = now.timestamp();
    let claims = Claims {
        iat,
        jti: Uuid::new_v4().to_string(),
        application_id,
        sub: secrets.nexmo_app_user_name.clone(),
        exp: (now + lifetime).timestamp(),
        acl: Acl::user(),
    };

    encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(TokenError::Encode)
}

/// Hands a valid token to whoever asks. There is deliberately no
/// authentication in front of this endpoint.
pub async fn no_auth_handler(
    secrets: Extension<Secrets>,
) -> Result<Json<UserToken>, TokenError> {
    log::debug!("Issuing token for {}", secrets.nexmo_app_user_name);

    let user_jwt = generate_user_jwt(
        &secrets,
        Utc::now(),
        Duration::seconds(CONFIG.settings.token_expiry),
    )?;

    Ok(Json(UserToken { user_jwt }))
}
