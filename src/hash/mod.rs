//! Hash primitives used by Bitcoin keys and addresses

pub mod ripemd160;
pub mod sha256;

pub use ripemd160::Ripemd160;
pub use sha256::Sha256;

/// Calculates RIPEMD160(SHA256(input)), the 20-byte digest at the core
/// of a Bitcoin address.
pub fn hash160(input: &[u8]) -> [u8; ripemd160::RIPEMD160_OUTPUT_SIZE] {
    Ripemd160::digest(&Sha256::digest(input))
}
