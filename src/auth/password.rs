//! Salted password hashing: Argon2id with a per-credential random salt,
//! encoded as `base64(salt).base64(key)`, verified in constant time.

use crate::error::AppError;
use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;
// Argon2id cost parameters: one pass over 64 MiB with four lanes.
const T_COST: u32 = 1;
const M_COST_KIB: u32 = 64 * 1024;
const LANES: u32 = 4;

fn kdf() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(M_COST_KIB, T_COST, LANES, Some(KEY_LEN))
        .map_err(|e| AppError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive(plain: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN], AppError> {
    let mut key = [0u8; KEY_LEN];
    kdf()?
        .hash_password_into(plain, salt, &mut key)
        .map_err(|e| AppError::Hashing(e.to_string()))?;
    Ok(key)
}

/// Derive an encoded hash from a plaintext password with a fresh random salt.
/// Two calls on the same input produce different encodings.
pub fn hash(plain: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive(plain.as_bytes(), &salt)?;
    Ok(format!("{}.{}", BASE64.encode(salt), BASE64.encode(key)))
}

/// Re-derive from the stored salt and compare in constant time. Malformed
/// encodings are a generic authentication failure; a key-length mismatch is
/// a non-match that still pays for an equivalent comparison.
pub fn verify(plain: &str, encoded: &str) -> Result<bool, AppError> {
    let Some((salt_b64, key_b64)) = encoded.split_once('.') else {
        return Err(AppError::Auth);
    };
    let salt = BASE64.decode(salt_b64).map_err(|_| AppError::Auth)?;
    let stored = BASE64.decode(key_b64).map_err(|_| AppError::Auth)?;
    let derived = derive(plain.as_bytes(), &salt)?;
    if stored.len() != derived.len() {
        let _ = derived.ct_eq(&derived);
        return Ok(false);
    }
    Ok(derived.ct_eq(stored.as_slice()).into())
}

/// Async wrapper: Argon2 is CPU-bound, so the derivation runs on the
/// blocking pool instead of stalling the event loop.
pub async fn hash_password(plain: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(&plain))
        .await
        .map_err(|e| AppError::Hashing(format!("join: {e}")))?
}

/// Async wrapper for [`verify`]; same blocking-pool dispatch as hashing.
pub async fn verify_password(plain: String, encoded: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(&plain, &encoded))
        .await
        .map_err(|e| AppError::Hashing(format!("join: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let encoded = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &encoded).unwrap());
        assert!(!verify("correct horse battery stable", &encoded).unwrap());
    }

    #[test]
    fn same_password_hashes_to_distinct_encodings() {
        let a = hash("s3cret!").unwrap();
        let b = hash("s3cret!").unwrap();
        assert_ne!(a, b);
        assert!(verify("s3cret!", &a).unwrap());
        assert!(verify("s3cret!", &b).unwrap());
    }

    #[test]
    fn encoded_form_is_salt_dot_key() {
        let encoded = hash("x").unwrap();
        let (salt_b64, key_b64) = encoded.split_once('.').unwrap();
        assert_eq!(BASE64.decode(salt_b64).unwrap().len(), SALT_LEN);
        assert_eq!(BASE64.decode(key_b64).unwrap().len(), KEY_LEN);
    }

    #[test]
    fn malformed_encodings_are_auth_failures() {
        assert!(matches!(verify("pw", "no-dot-here"), Err(AppError::Auth)));
        assert!(matches!(verify("pw", "!!!.###"), Err(AppError::Auth)));
    }

    #[test]
    fn truncated_stored_key_is_a_non_match() {
        let encoded = hash("pw").unwrap();
        let (salt_b64, key_b64) = encoded.split_once('.').unwrap();
        let mut key = BASE64.decode(key_b64).unwrap();
        key.truncate(16);
        let short = format!("{salt_b64}.{}", BASE64.encode(key));
        assert!(!verify("pw", &short).unwrap());
    }
}
