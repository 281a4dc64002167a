use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assumed when a token carries none.
pub const DEFAULT_ROLE: &str = "Admin";

/// Claims issued by the identity provider.
///
/// The `sub` field is the user's UUID.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    pub iat: Option<usize>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// The signed-in user as seen by the handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: String,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }

    pub fn into_principal(self) -> Result<Principal, String> {
        Ok(Principal {
            id: self.user_id()?,
            role: self.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            email: self.email,
        })
    }
}

/// Validate an HS256 token signed with `secret` and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| format!("{e}"))
}
