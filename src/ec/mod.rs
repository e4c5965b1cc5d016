//! secp256k1 elliptic curve primitives
//!
//! secp256k1 is the Koblitz curve used by Bitcoin, defined in Standards
//! for Efficient Cryptography (SEC 2, Certicom Research). The domain
//! parameters over F_p are the sextuple (p, a, b, G, n, h) where:
//!
//! ```text
//! p = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
//!   = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1
//! ```
//!
//! The curve E: y² = x³ + ax + b over F_p is defined by a = 0, b = 7.
//! The base point G in compressed form is:
//!
//! ```text
//! G = 02 79BE667E F9DCBBAC 55A06295 CE870B07 029BFCDB 2DCE28D9 59F2815B 16F81798
//! ```
//!
//! and the order n of G and the cofactor h are:
//!
//! ```text
//! n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
//! h = 01
//! ```

pub mod constants;
mod field;
mod point;
mod scalar;

pub use constants::{
    FIELD_ELEMENT_SIZE, POINT_COMPRESSED_SIZE, POINT_INFINITY_SIZE, POINT_UNCOMPRESSED_SIZE,
    SCALAR_SIZE,
};
pub use field::FieldElement;
pub use point::Point;
pub use scalar::Scalar;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// secp256k1 curve parameters (base point G)
struct Secp256k1Params {
    g_x: [u8; 32],
    g_y: [u8; 32],
}

const SECP256K1: Secp256k1Params = Secp256k1Params {
    g_x: [
        0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
        0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
        0x17, 0x98,
    ],
    g_y: [
        0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
        0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
        0xD4, 0xB8,
    ],
};

/// Get the standard base point G of the secp256k1 curve
pub fn base_point_g() -> Point {
    let x = FieldElement::from_bytes(&SECP256K1.g_x).expect("standard base point must be valid");
    let y = FieldElement::from_bytes(&SECP256K1.g_y).expect("standard base point must be valid");
    Point::from_affine(x, y).expect("standard base point must be valid")
}

/// Scalar multiplication with the base point: scalar · G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Point {
    base_point_g().multiply(scalar.as_bytes())
}

/// General scalar multiplication: scalar · point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Point {
    point.multiply(scalar.as_bytes())
}

/// Generate a keypair from a cryptographically secure generator.
///
/// The private scalar is drawn uniformly from [1, n−1] by rejection
/// sampling; since 1 ≤ k < n, the public point k·G is never the
/// identity.
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> (Scalar, Point) {
    let mut scalar_bytes = [0u8; SCALAR_SIZE];
    loop {
        rng.fill_bytes(&mut scalar_bytes);
        match Scalar::new(scalar_bytes) {
            Ok(private_key) => {
                scalar_bytes.zeroize();
                let public_key = scalar_mult_base_g(&private_key);
                return (private_key, public_key);
            }
            Err(_) => continue,
        }
    }
}
