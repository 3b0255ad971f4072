//! sr25519 signing with the substrate signing context.

use core::fmt;

use schnorrkel::{Keypair, PublicKey, Signature};

/// Signing context shared by substrate chains.
pub const SIGNING_CTX: &[u8] = b"substrate";

/// Schnorr signer over ristretto255.
///
/// Signatures are randomized, so two signatures over the same message
/// differ; both verify.
pub struct Sr25519Signer {
    keypair: Keypair,
}

impl Sr25519Signer {
    /// Wrap a keypair.
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.keypair.sign_simple(SIGNING_CTX, message).to_bytes()
    }

    /// The 32-byte public key.
    pub fn public_key(&self) -> [u8; 32] {
        self.keypair.public.to_bytes()
    }
}

impl fmt::Debug for Sr25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sr25519Signer")
            .field("public", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

/// Verify a 64-byte sr25519 signature. Malformed inputs verify as `false`.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(signature) = Signature::from_bytes(signature) else {
        return false;
    };
    let Ok(public) = PublicKey::from_bytes(public_key) else {
        return false;
    };
    public.verify_simple(SIGNING_CTX, message, &signature).is_ok()
}
