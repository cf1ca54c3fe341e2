use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload used for authentication. Expiry is absolute so verification
/// never does clock-skew-dependent "time remaining" math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,   // user ID
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}
