use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use crate::{
    config::Config,
    models::user::User,
    repositories::UserRepository,
    utils::jwt::{verify_access_token, Claims},
};

pub async fn auth(
    State((pool, config)): State<(PgPool, Config)>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = extract_auth_header(request.headers());
    let (claims, user) = authenticate_request(auth_header.as_deref(), &pool, &config).await?;
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

// Auth + require admin role for admin-only routes
pub async fn auth_admin(
    State((pool, config)): State<(PgPool, Config)>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = extract_auth_header(request.headers());
    let (claims, user) = authenticate_request(auth_header.as_deref(), &pool, &config).await?;
    if !user.is_admin() {
        return Err(StatusCode::FORBIDDEN);
    }

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(rest) = header.strip_prefix("bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

async fn authenticate_request(
    auth_header: Option<&str>,
    pool: &PgPool,
    config: &Config,
) -> Result<(Claims, User), StatusCode> {
    let token = auth_header
        .and_then(parse_bearer_token)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims =
        verify_access_token(token, &config.jwt_secret).map_err(|_| StatusCode::UNAUTHORIZED)?;
    let user_id = claims.user_id().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = UserRepository::new()
        .find_by_id(pool, user_id)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    Ok((claims, user))
}

fn extract_auth_header(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_case_insensitive() {
        assert_eq!(parse_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer_token("BEARER abc"), Some("abc"));
    }

    #[test]
    fn non_bearer_schemes_are_rejected() {
        assert_eq!(parse_bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(parse_bearer_token("token"), None);
    }
}
