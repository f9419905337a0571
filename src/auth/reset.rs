//! Password-reset tokens. The random token goes to the user; only its
//! SHA-256 digest is persisted, so a database disclosure yields nothing
//! usable.

use crate::error::AppError;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const TOKEN_LEN: usize = 32;

/// A freshly generated reset token: the hex token for the user and the hex
/// digest for storage.
pub struct ResetToken {
    pub token: String,
    pub digest: String,
}

impl ResetToken {
    pub fn generate() -> Self {
        let mut raw = [0u8; TOKEN_LEN];
        OsRng.fill_bytes(&mut raw);
        ResetToken {
            token: hex::encode(raw),
            digest: hex::encode(Sha256::digest(raw)),
        }
    }
}

/// Digest a user-supplied token for lookup. Non-hex input is a generic
/// authentication failure, indistinguishable from an unknown token.
pub fn digest(token: &str) -> Result<String, AppError> {
    let raw = hex::decode(token).map_err(|_| AppError::Auth)?;
    Ok(hex::encode(Sha256::digest(&raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_issued_token_matches_stored_digest() {
        let reset = ResetToken::generate();
        assert_eq!(digest(&reset.token).unwrap(), reset.digest);
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(ResetToken::generate().token, ResetToken::generate().token);
    }

    #[test]
    fn non_hex_token_is_an_auth_failure() {
        assert!(matches!(digest("not hex!"), Err(AppError::Auth)));
    }

    #[test]
    fn digest_differs_from_token() {
        let reset = ResetToken::generate();
        assert_ne!(reset.token, reset.digest);
    }
}
