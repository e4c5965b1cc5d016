//! secp256k1 elliptic curve cryptography for Bitcoin
//!
//! This crate provides the primitives needed to generate and handle
//! Bitcoin keys: arithmetic over the secp256k1 field and curve group,
//! ECDSA signing and verification with public key recovery, SEC1 point
//! encodings, Base58/Base58Check, addresses and the "dumpprivkey" (WIF)
//! private key format.
//!
//! # Layout
//!
//! - [`ec`]: field elements, curve points and scalars
//! - [`ecdsa`]: sign / verify / recover
//! - [`keys`]: key pairs, encoded public keys, WIF
//! - [`address`]: networks and Bitcoin addresses
//! - [`base58`]: the textual codec and its checksummed envelope
//! - [`hash`]: SHA-256 and RIPEMD-160
//!
//! All values are immutable once constructed; every operation is a pure
//! function of its inputs, safe to call concurrently. Entropy is always
//! supplied by the caller as a [`rand::CryptoRng`] generator.

#![forbid(unsafe_code)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash primitives
pub mod hash;
pub use hash::{hash160, Ripemd160, Sha256};

// Base58 / Base58Check codec
pub mod base58;

// Elliptic curve primitives
pub mod ec;
pub use ec::{base_point_g, FieldElement, Point, Scalar};

// Keys and their encodings
pub mod keys;
pub use keys::{EncodedPublicKey, Key, Wif};

// Networks and addresses
pub mod address;
pub use address::{Address, Network};

// Signing, verification and key recovery
pub mod ecdsa;
pub use ecdsa::Signature;
