//! Elliptic curve keys
//!
//! A key pairs a public curve point with an optional private scalar.
//! The private key k is an integer in [1, n−1]; the public key is the
//! point Q = k·G. A key created from the public part alone can check
//! signatures but not create them.

mod wif;

pub use wif::Wif;

use crate::ec::{self, Point, Scalar, SCALAR_SIZE};
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use std::time::{SystemTime, UNIX_EPOCH};

/// An elliptic curve public and (optionally) private key, usable for
/// digital signatures but not for encryption.
///
/// Two keys are equal when their public points are equal.
#[derive(Clone, Debug)]
pub struct Key {
    /// The private scalar; `None` for verify-only keys
    private: Option<Scalar>,
    /// The public point Q = k·G; never the identity
    public: Point,
    /// Creation time in seconds since the epoch, or zero for keys
    /// rebuilt from existing material
    creation_time_secs: u64,
}

impl Key {
    /// Generate an entirely new keypair from the given secure generator.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let (private, public) = ec::generate_keypair(rng);
        let creation_time_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Key {
            private: Some(private),
            public,
            creation_time_secs,
        }
    }

    /// Create a key from the private scalar only. The public point is
    /// calculated from it; since 1 ≤ k < n it is never the identity.
    pub fn from_private_scalar(private: Scalar) -> Self {
        let public = ec::scalar_mult_base_g(&private);
        Key {
            private: Some(private),
            public,
            creation_time_secs: 0,
        }
    }

    /// Create a key from 32 big-endian private key bytes.
    ///
    /// Rejects values outside [1, n−1].
    pub fn from_private_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Self> {
        Ok(Self::from_private_scalar(Scalar::new(*bytes)?))
    }

    /// Create a key from the public point only. The resulting key can
    /// verify signatures but not create them.
    pub fn from_public_point(public: Point) -> Result<Self> {
        if public.is_identity() {
            return Err(Error::param("Key", "public key cannot be the identity"));
        }
        Ok(Key {
            private: None,
            public,
            creation_time_secs: 0,
        })
    }

    /// The public key as a curve point. This is never the identity.
    pub fn public_point(&self) -> &Point {
        &self.public
    }

    /// The private scalar, when this key has one.
    pub fn private_scalar(&self) -> Option<&Scalar> {
        self.private.as_ref()
    }

    /// Whether this key can be used to sign messages.
    pub fn can_sign(&self) -> bool {
        self.private.is_some()
    }

    /// Creation time in seconds since the epoch, or zero when unknown.
    pub fn creation_time_seconds(&self) -> u64 {
        self.creation_time_secs
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public
    }
}

impl Eq for Key {}

/// A wrapper for the byte encoding of a public key.
///
/// Compressed keys are 33 bytes (prefix `0x02`/`0x03` plus x), the
/// older uncompressed keys 65 bytes (prefix `0x04` plus x and y). The
/// point at infinity has no valid public key encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPublicKey(Vec<u8>);

impl EncodedPublicKey {
    /// Encode the public key of `key`.
    pub fn from_key(key: &Key, compressed: bool) -> Self {
        // A key's public point is never the identity
        EncodedPublicKey(key.public_point().serialize(compressed))
    }

    /// Encode a public point. The identity is rejected.
    pub fn from_point(point: &Point, compressed: bool) -> Result<Self> {
        if point.is_identity() {
            return Err(Error::param(
                "EncodedPublicKey",
                "the identity has no public key encoding",
            ));
        }
        Ok(EncodedPublicKey(point.serialize(compressed)))
    }

    /// `true` if the encoded key is in compressed form.
    pub fn is_compressed(&self) -> bool {
        self.0.len() == crate::ec::POINT_COMPRESSED_SIZE
    }

    /// The bytes of the encoded key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decode back into a curve point.
    pub fn decode(&self) -> Result<Point> {
        Point::deserialize(&self.0)
    }
}

#[cfg(test)]
mod tests;
