//! Password digests.

pub use bcrypt::BcryptError;

/// bcrypt work factor. Fixed; changing it only affects newly stored users.
pub const HASH_COST: u32 = 12;

/// Hash a plaintext password with a fresh salt.
///
/// This is CPU bound for a noticeable amount of time; async callers should
/// run it on a blocking thread.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, HASH_COST)
}
