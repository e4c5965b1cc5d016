//! secp256k1 scalar arithmetic modulo the group order
//!
//! Scalars represent private keys, signing nonces and signature
//! components: integers modulo
//! n = 0xFFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141.

use crate::ec::constants::SCALAR_SIZE;
use crate::error::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// secp256k1 scalar value, stored as canonical big-endian bytes < n.
///
/// Zeroized on drop: the same type carries private keys and nonces.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Debug)]
pub struct Scalar([u8; SCALAR_SIZE]);

impl Scalar {
    /// The curve order n (big-endian)
    pub(crate) const ORDER: [u8; SCALAR_SIZE] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    /// n − 2, the Fermat inversion exponent (big-endian)
    const ORDER_MINUS_2: [u8; SCALAR_SIZE] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x3F,
    ];

    /// ⌊n / 2⌋, the boundary of the low half (big-endian)
    const ORDER_HALF: [u8; SCALAR_SIZE] = [
        0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
        0x20, 0xA0,
    ];

    /// n as little-endian 32-bit limbs
    const N_LIMBS: [u32; 8] = [
        0xD036_4141,
        0xBFD2_5E8C,
        0xAF48_A03B,
        0xBAAE_DCE6,
        0xFFFF_FFFE,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
        0xFFFF_FFFF,
    ];

    /// Create a scalar from big-endian bytes.
    ///
    /// The value must already lie in [1, n−1]; zero and values ≥ n are
    /// rejected. This is the private-key domain.
    pub fn new(bytes: [u8; SCALAR_SIZE]) -> Result<Self> {
        if bytes.iter().all(|&b| b == 0) {
            return Err(Error::param("Scalar", "scalar cannot be zero"));
        }
        if Self::bytes_ge(&bytes, &Self::ORDER) {
            return Err(Error::param("Scalar", "scalar not below the group order"));
        }
        Ok(Scalar(bytes))
    }

    /// Reduce an arbitrary 256-bit big-endian value modulo n.
    ///
    /// Any 256-bit value is below 2n, so a single conditional
    /// subtraction canonicalises it. Zero is a legal result here: this
    /// constructor serves digest and coordinate reduction, not keys.
    pub(crate) fn reduce(mut bytes: [u8; SCALAR_SIZE]) -> Self {
        if Self::bytes_ge(&bytes, &Self::ORDER) {
            let mut borrow = 0i16;
            for i in (0..SCALAR_SIZE).rev() {
                let diff = (bytes[i] as i16) - (Self::ORDER[i] as i16) - borrow;
                if diff < 0 {
                    bytes[i] = (diff + 256) as u8;
                    borrow = 1;
                } else {
                    bytes[i] = diff as u8;
                    borrow = 0;
                }
            }
        }
        Scalar(bytes)
    }

    fn from_bytes_unchecked(bytes: [u8; SCALAR_SIZE]) -> Self {
        Scalar(bytes)
    }

    /// Serialize this scalar to big-endian bytes.
    pub fn serialize(&self) -> [u8; SCALAR_SIZE] {
        self.0
    }

    /// Borrow the big-endian byte representation.
    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.0
    }

    /// Check if this scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Check whether the value lies in the high half (n/2, n−1].
    pub fn is_high(&self) -> bool {
        Self::bytes_ge(&self.0, &Self::ORDER_HALF) && self.0 != Self::ORDER_HALF
    }

    /// Add two scalars modulo n
    pub(crate) fn add_mod_n(&self, other: &Self) -> Self {
        let a = Self::to_le_limbs(&self.0);
        let b = Self::to_le_limbs(&other.0);

        let mut r = [0u32; 8];
        let mut carry = 0u64;
        for i in 0..8 {
            let tmp = a[i] as u64 + b[i] as u64 + carry;
            r[i] = tmp as u32;
            carry = tmp >> 32;
        }

        // If the addition overflowed or r >= n, subtract n once
        if carry == 1 || Self::limbs_ge(&r, &Self::N_LIMBS) {
            Self::sub_limbs_in_place(&mut r, &Self::N_LIMBS);
        }

        Self::from_bytes_unchecked(Self::limbs_to_be(&r))
    }

    /// Multiply two scalars modulo n.
    /// Double-and-add over the bits of `other`, MSB first.
    pub(crate) fn mul_mod_n(&self, other: &Self) -> Self {
        let mut acc = Self::from_bytes_unchecked([0u8; SCALAR_SIZE]);

        for byte in other.0 {
            for bit in (0..8).rev() {
                acc = acc.add_mod_n(&acc);
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add_mod_n(self);
                }
            }
        }

        acc
    }

    /// Compute the multiplicative inverse modulo n via Fermat:
    /// a⁻¹ ≡ a^(n−2) (mod n). Left-to-right binary exponentiation.
    pub(crate) fn inv_mod_n(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("Scalar", "zero has no inverse"));
        }

        let mut result = {
            let mut one = [0u8; SCALAR_SIZE];
            one[SCALAR_SIZE - 1] = 1;
            Self::from_bytes_unchecked(one)
        };
        let base = self.clone();

        for byte in Self::ORDER_MINUS_2 {
            for bit in (0..8).rev() {
                result = result.mul_mod_n(&result);
                if (byte >> bit) & 1 == 1 {
                    result = result.mul_mod_n(&base);
                }
            }
        }

        Ok(result)
    }

    /// Compute the additive inverse modulo n: n − self for nonzero
    /// values, zero for zero.
    pub(crate) fn negate(&self) -> Self {
        if self.is_zero() {
            return Self::from_bytes_unchecked([0u8; SCALAR_SIZE]);
        }

        let a = Self::to_le_limbs(&self.0);
        let mut r = Self::N_LIMBS;
        Self::sub_limbs_in_place(&mut r, &a);
        Self::from_bytes_unchecked(Self::limbs_to_be(&r))
    }

    /// Big-endian byte-array comparison: a >= b
    #[inline(always)]
    fn bytes_ge(a: &[u8; SCALAR_SIZE], b: &[u8; SCALAR_SIZE]) -> bool {
        for i in 0..SCALAR_SIZE {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true
    }

    /// Convert big-endian bytes to little-endian 32-bit limbs
    #[inline(always)]
    fn to_le_limbs(bytes_be: &[u8; SCALAR_SIZE]) -> [u32; 8] {
        let mut limbs = [0u32; 8];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let start = 28 - i * 4;
            *limb = u32::from_be_bytes([
                bytes_be[start],
                bytes_be[start + 1],
                bytes_be[start + 2],
                bytes_be[start + 3],
            ]);
        }
        limbs
    }

    /// Convert little-endian limbs back to big-endian bytes
    #[inline(always)]
    fn limbs_to_be(limbs: &[u32; 8]) -> [u8; SCALAR_SIZE] {
        let mut out = [0u8; SCALAR_SIZE];
        for (i, &limb) in limbs.iter().enumerate() {
            let start = 28 - i * 4;
            out[start..start + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Compare two limb arrays: a >= b
    #[inline(always)]
    fn limbs_ge(a: &[u32; 8], b: &[u32; 8]) -> bool {
        for i in (0..8).rev() {
            if a[i] > b[i] {
                return true;
            }
            if a[i] < b[i] {
                return false;
            }
        }
        true
    }

    /// Subtract b from a in place (a is known to be >= b modulo wrap)
    #[inline(always)]
    fn sub_limbs_in_place(a: &mut [u32; 8], b: &[u32; 8]) {
        let mut borrow = 0u64;
        for i in 0..8 {
            let tmp = (a[i] as u64)
                .wrapping_sub(b[i] as u64)
                .wrapping_sub(borrow);
            a[i] = tmp as u32;
            borrow = (tmp >> 63) & 1;
        }
    }
}
