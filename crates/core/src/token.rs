//! Client-side decoding of identity-provider tokens.
//!
//! The client never verifies signatures (it holds no keys); it only reads
//! the payload to learn group membership and user identifiers. The backend
//! remains the authority on whether a token is valid.

use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::DbId;

/// Claims the client cares about. Unknown claims are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
    #[serde(rename = "custom:teacher_id", default)]
    pub teacher_id: Option<serde_json::Value>,
    #[serde(rename = "custom:student_id", default)]
    pub student_id: Option<serde_json::Value>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn role(&self) -> Role {
        Role::from_groups(&self.groups)
    }

    /// Numeric backend user id, from the first claim that carries one.
    ///
    /// Checks `custom:teacher_id`, then `custom:student_id`, then a numeric
    /// `sub`.
    pub fn user_id(&self) -> Option<DbId> {
        self.teacher_id
            .as_ref()
            .and_then(numeric_claim)
            .or_else(|| self.student_id.as_ref().and_then(numeric_claim))
            .or_else(|| self.sub.as_deref().and_then(|s| s.trim().parse().ok()))
    }
}

fn numeric_claim(value: &serde_json::Value) -> Option<DbId> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode the payload of a JWT without verifying its signature or expiry.
pub fn decode_claims(token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let header = decode_header(token)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"issuer-secret-the-client-never-sees"),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn decodes_groups_and_email() {
        let token = sign(serde_json::json!({
            "sub": "abc-123",
            "email": "knight@ucf.edu",
            "cognito:groups": ["teacher"],
        }));

        let claims = decode_claims(&token).expect("payload should decode");
        assert_eq!(claims.email.as_deref(), Some("knight@ucf.edu"));
        assert_eq!(claims.role(), Role::Teacher);
    }

    #[test]
    fn expired_token_still_decodes() {
        let token = sign(serde_json::json!({ "exp": 1, "cognito:groups": ["student"] }));
        let claims = decode_claims(&token).expect("expiry is not checked client-side");
        assert_eq!(claims.role(), Role::Student);
    }

    #[test]
    fn user_id_prefers_custom_claims() {
        let claims = TokenClaims {
            sub: Some("99".into()),
            teacher_id: Some(serde_json::json!("7")),
            ..Default::default()
        };
        assert_eq!(claims.user_id(), Some(7));

        let claims = TokenClaims {
            sub: Some("99".into()),
            student_id: Some(serde_json::json!(12)),
            ..Default::default()
        };
        assert_eq!(claims.user_id(), Some(12));
    }

    #[test]
    fn user_id_falls_back_to_numeric_sub() {
        let claims = TokenClaims {
            sub: Some("42".into()),
            ..Default::default()
        };
        assert_eq!(claims.user_id(), Some(42));

        let claims = TokenClaims {
            sub: Some("not-a-number".into()),
            ..Default::default()
        };
        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn garbage_token_fails() {
        assert!(decode_claims("not.a.jwt").is_err());
        assert!(decode_claims("").is_err());
    }
}
