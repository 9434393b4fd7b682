use crate::error::AppError;

/// bcrypt work factor. The produced hash string embeds this cost and the
/// per-call random salt, so verification needs no extra state.
const HASH_COST: u32 = 10;

/// Hashes a plaintext password with a fresh random salt. Two calls with the
/// same input yield different hashes.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

/// Verifies a plaintext candidate against a stored hash using the salt and
/// cost embedded in it. The comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, hash)?)
}
