//! Authentication module
//!
//! Provides HMAC-SHA512 password digests and HS512 JWT issuance.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtKeys, JwtService, TOKEN_LIFETIME_DAYS};
pub use middleware::AuthUser;
pub use password::{PasswordDigest, PasswordService, SALT_LEN};
