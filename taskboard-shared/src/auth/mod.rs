/// Authentication primitives for taskboard
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`session`]: Opaque session token generation
///
/// The web layer owns the cookie plumbing; this module only provides the
/// cryptographic pieces. Handlers never see plaintext credentials beyond
/// the login/register request itself.

pub mod password;
pub mod session;
