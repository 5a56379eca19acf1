use crate::error::RemindlyError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use remindly_domain::ID;
use remindly_infra::RemindlyContext;
use serde::{Deserialize, Serialize};

/// Tokens are issued by the authentication service which signs them with
/// the shared `jwt_secret`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject, the id of the owner
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at (as UTC timestamp)
}

/// The authenticated owner of a request
#[derive(Debug, Clone)]
pub struct Owner {
    pub id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(secret: &str, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256)).map(|t| t.claims)
}

pub fn protect_route(req: &HttpRequest, ctx: &RemindlyContext) -> Result<Owner, RemindlyError> {
    let token = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(RemindlyError::Unauthorized(
                    "Malformed authorization header provided".into(),
                ))
            }
        },
        None => {
            return Err(RemindlyError::Unauthorized(
                "Unable to find token in authorization header".into(),
            ))
        }
    };

    let claims = decode_token(&ctx.config.jwt_secret, &token)
        .map_err(|e| RemindlyError::Unauthorized(format!("Token invalid: {}", e)))?;

    match claims.sub.parse::<ID>() {
        Ok(id) => Ok(Owner { id }),
        Err(_) => Err(RemindlyError::Unauthorized(
            "Token subject is not a valid owner id".into(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn get_token(ctx: &RemindlyContext, sub: &str, expired: bool) -> String {
        let now = chrono::Utc::now().timestamp() as usize;
        let exp = if expired { now - 60 * 60 } else { now + 60 * 60 };
        let claims = Claims {
            sub: sub.to_string(),
            exp,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    fn request_with_token(token: &str) -> HttpRequest {
        TestRequest::default()
            .insert_header(("authorization", format!("Bearer {}", token)))
            .to_http_request()
    }

    #[test]
    fn decodes_valid_token() {
        let ctx = RemindlyContext::create_inmemory();
        let owner_id = ID::default();
        let token = get_token(&ctx, &owner_id.as_string(), false);

        let owner = protect_route(&request_with_token(&token), &ctx).expect("Valid token");
        assert_eq!(owner.id, owner_id);
    }

    #[test]
    fn rejects_missing_expired_and_foreign_tokens() {
        let ctx = RemindlyContext::create_inmemory();
        let owner_id = ID::default().as_string();

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let token = get_token(&ctx, &owner_id, true);
        assert!(protect_route(&request_with_token(&token), &ctx).is_err());

        let mut other_ctx = RemindlyContext::create_inmemory();
        other_ctx.config.jwt_secret = "another-secret".into();
        let token = get_token(&other_ctx, &owner_id, false);
        assert!(protect_route(&request_with_token(&token), &ctx).is_err());

        assert!(protect_route(&request_with_token("123"), &ctx).is_err());
    }

    #[test]
    fn rejects_token_with_malformed_subject() {
        let ctx = RemindlyContext::create_inmemory();
        let token = get_token(&ctx, "test@test.test", false);
        assert!(protect_route(&request_with_token(&token), &ctx).is_err());
    }
}
