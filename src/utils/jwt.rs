use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub email: String,
    pub role: String,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

impl Claims {
    pub fn new(user_id: UserId, email: String, role: String, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id.to_string(),
            email,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> anyhow::Result<UserId> {
        let raw: i64 = self.sub.parse()?;
        Ok(UserId::new(raw))
    }
}

pub fn create_access_token(
    user_id: UserId,
    email: String,
    role: String,
    secret: &str,
    expiration_hours: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, email, role, expiration_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_round_trip() {
        let token = create_access_token(
            UserId::new(9),
            "alice@example.com".to_string(),
            "admin".to_string(),
            "test-secret",
            12,
        )
        .expect("token creation");

        let claims = verify_access_token(&token, "test-secret").expect("token verification");
        assert_eq!(claims.user_id().unwrap(), UserId::new(9));
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_access_token(
            UserId::new(1),
            "a@b.c".to_string(),
            "customer".to_string(),
            "secret-one",
            1,
        )
        .unwrap();

        assert!(verify_access_token(&token, "secret-two").is_err());
    }
}
