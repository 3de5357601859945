use crate::error::SigningError;
use k256::ecdsa::{
    Signature, SigningKey, VerifyingKey,
    signature::{Signer as _, Verifier},
};
use std::fmt;

/// secp256k1 signing key together with its derived public key
///
/// The public key is computed once at construction so repeated lookups
/// do not redo the point multiplication.
#[derive(Clone)]
pub struct Signer {
    key: SigningKey,
    public_key: String,
}

impl Signer {
    /// Parse a 32-byte private key from hex
    ///
    /// Surrounding whitespace and a leading `0x` are ignored so values pasted
    /// into environment files work unchanged.
    pub fn from_hex(private_key: &str) -> Result<Self, SigningError> {
        let trimmed = private_key.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed)?;
        let key = SigningKey::from_slice(&bytes).map_err(|_| SigningError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(key))
    }

    /// Generate a fresh random key
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::thread_rng()))
    }

    fn from_signing_key(key: SigningKey) -> Self {
        let point = key.verifying_key().to_encoded_point(true);
        let public_key = hex::encode(point.as_bytes());
        Self { key, public_key }
    }

    /// Compressed public key as hex
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign `message`, returning the compact signature as hex
    pub fn sign(&self, message: &[u8]) -> Result<String, SigningError> {
        let signature: Signature = self
            .key
            .try_sign(message)
            .map_err(|_| SigningError::SigningFailed)?;
        Ok(hex::encode(signature.to_bytes()))
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Check a hex signature produced by [`Signer::sign`]
///
/// Returns `Ok(false)` for a well-formed signature that does not match;
/// malformed keys or signatures are errors.
pub fn verify(public_key: &str, message: &[u8], signature: &str) -> Result<bool, SigningError> {
    let key_bytes = hex::decode(public_key)?;
    let verifying_key =
        VerifyingKey::from_sec1_bytes(&key_bytes).map_err(|_| SigningError::InvalidPublicKey)?;

    let signature_bytes = hex::decode(signature)?;
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| SigningError::InvalidSignature)?;

    Ok(verifying_key.verify(message, &signature).is_ok())
}
