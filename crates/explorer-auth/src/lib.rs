//! # explorer-auth
//!
//! HS256 bearer tokens. The identity provider issues them; this crate
//! validates them at the HTTP boundary and can mint them for tooling and
//! tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
