use crate::error::StewardError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use steward_domain::{User, ID};
use steward_infra::StewardContext;
use tracing::warn;

use super::Policy;

pub const ADMIN_SECRET_HEADER: &str = "steward-admin-secret";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    /// Expiration time (as UTC timestamp in seconds)
    exp: usize,
    /// Issued at (as UTC timestamp in seconds)
    iat: usize,
    user_id: ID,
    church_id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;

    Ok(claims)
}

/// Creates a session token for the `User` that expires at `expires` (millis)
pub fn create_user_token(
    user: &User,
    secret: &str,
    now: i64,
    expires: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        exp: (expires / 1000) as usize,
        iat: (now / 1000) as usize,
        user_id: user.id.clone(),
        church_id: user.church_id.clone(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

async fn auth_user_req(req: &HttpRequest, ctx: &StewardContext) -> Option<User> {
    let token = req.headers().get("authorization")?;
    let token = match token.to_str() {
        Ok(token) => parse_authtoken_header(token),
        Err(_) => return None,
    };
    let claims = match decode_token(&ctx.config.jwt_secret, &token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Rejected session token: {:?}", e);
            return None;
        }
    };

    match ctx.repos.users.find(&claims.user_id).await {
        // A token is only valid within the church it was issued for
        Some(user) if user.church_id == claims.church_id => Some(user),
        _ => None,
    }
}

/// Finds the `User` making the request and the `Policy` of its `Role`
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &StewardContext,
) -> Result<(User, Policy), StewardError> {
    match auth_user_req(req, ctx).await {
        Some(user) => {
            let policy = Policy::for_role(user.role);
            Ok((user, policy))
        }
        None => Err(StewardError::Unauthorized(
            "Unable to find user from credentials".into(),
        )),
    }
}

/// Ensures the request carries the admin secret code
pub fn protect_admin_route(req: &HttpRequest, ctx: &StewardContext) -> Result<(), StewardError> {
    let secret = match req.headers().get(ADMIN_SECRET_HEADER) {
        Some(secret) => secret.to_str().map_err(|_| {
            StewardError::Unauthorized("Malformed admin secret code provided".to_string())
        })?,
        None => {
            return Err(StewardError::Unauthorized(format!(
                "Unable to find admin secret code in {} header",
                ADMIN_SECRET_HEADER
            )))
        }
    };

    if secret != ctx.config.admin_secret_code {
        return Err(StewardError::Unauthorized(format!(
            "Invalid admin secret code provided in {} header",
            ADMIN_SECRET_HEADER
        )));
    }
    Ok(())
}
