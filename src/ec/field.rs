//! secp256k1 prime field arithmetic
//!
//! Elements of F_p for p = 2^256 - 2^32 - 977. The modulus satisfies
//! p ≡ 3 (mod 4) and p ≡ 7 (mod 9), which yields the closed-form
//! square-root and cube-root exponents used below.

use crate::ec::constants::FIELD_ELEMENT_SIZE;
use crate::error::{Error, Result};
use core::fmt;
use subtle::{Choice, ConditionallySelectable};

/// Number of 32-bit limbs for a field element (8 × 32 = 256 bits)
const NLIMBS: usize = 8;

/// secp256k1 field element representing values in F_p, where
/// p = 2²⁵⁶ − 2³² − 977.
/// Internally stored as 8 little-endian 32-bit limbs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement(pub(crate) [u32; NLIMBS]);

impl FieldElement {
    /// p = 0xFFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
    /// stored as eight 32-bit words, little-endian.
    pub(crate) const MOD_LIMBS: [u32; NLIMBS] = [
        0xFFFFFC2F, // least significant
        0xFFFFFFFE, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFF, // most significant
    ];

    /// First nontrivial cube root of 1 in F_p.
    ///
    /// U₁ = 0x851695D4 9A83F8EF 919BB861 53CBCB16 630FB68A ED0A766A 3EC693D6 8E6AFA40
    pub const UNITY_CUBEROOT_1: FieldElement = FieldElement([
        0x8E6AFA40, 0x3EC693D6, 0xED0A766A, 0x630FB68A, 0x53CBCB16, 0x919BB861, 0x9A83F8EF,
        0x851695D4,
    ]);

    /// Second nontrivial cube root of 1 in F_p; U₁ · U₂ = 1 and U₁² = U₂.
    ///
    /// U₂ = 0x7AE96A2B 657C0710 6E64479E AC3434E9 9CF04975 12F58995 C1396C28 719501EE
    pub const UNITY_CUBEROOT_2: FieldElement = FieldElement([
        0x719501EE, 0xC1396C28, 0x12F58995, 0x9CF04975, 0xAC3434E9, 0x6E64479E, 0x657C0710,
        0x7AE96A2B,
    ]);

    /// p − 2, the Fermat inversion exponent (big-endian)
    const P_MINUS_2: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
        0xFC, 0x2D,
    ];

    /// (p + 1) / 4, the square-root exponent for p ≡ 3 (mod 4) (big-endian)
    const SQRT_EXP: [u8; 32] = [
        0x3F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xBF, 0xFF,
        0xFF, 0x0C,
    ];

    /// (p + 2) / 9, the cube-root exponent for p ≡ 7 (mod 9) (big-endian)
    const CUBE_EXP: [u8; 32] = [
        0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7,
        0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x71, 0xC7, 0x1C, 0x55, 0x55,
        0x54, 0xE9,
    ];

    /// Build a field element from a small literal (`0 ≤ n < 2³²`)
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    /// The additive identity: 0
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity: 1
    #[inline]
    pub fn one() -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = 1;
        FieldElement(limbs)
    }

    /// Create a field element from big-endian bytes.
    /// Rejects values ≥ p.
    pub fn from_bytes(bytes: &[u8; FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let mut limbs = [0u32; NLIMBS];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            *limb = u32::from_be_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ]);
        }

        let (_, borrow) = Self::sbb8(limbs, Self::MOD_LIMBS);
        if borrow == 0 {
            // limbs ≥ p
            return Err(Error::param("FieldElement", "value not below the field modulus"));
        }
        Ok(FieldElement(limbs))
    }

    /// Convert this field element into big-endian bytes.
    pub fn to_bytes(&self) -> [u8; FIELD_ELEMENT_SIZE] {
        let mut out = [0u8; FIELD_ELEMENT_SIZE];
        for (i, &limb) in self.0.iter().enumerate() {
            let offset = (NLIMBS - 1 - i) * 4;
            out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Check: is self < p ?
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        let (_, borrow) = Self::sbb8(self.0, Self::MOD_LIMBS);
        borrow == 1
    }

    /// Check if the element is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Return true if the element is odd (least-significant bit = 1).
    pub fn is_odd(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    /// Constant-time addition: (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        let (sum, carry) = Self::adc8(self.0, other.0);

        // If the addition overflowed or sum >= p, subtract p once
        let (reduced, borrow) = Self::sbb8(sum, Self::MOD_LIMBS);
        let need_reduce = (carry | (borrow ^ 1)) & 1;

        Self::conditional_select(&sum, &reduced, Choice::from(need_reduce as u8))
    }

    /// Constant-time subtraction: (self - other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        let (diff, borrow) = Self::sbb8(self.0, other.0);
        let (diff_plus_p, _) = Self::adc8(diff, Self::MOD_LIMBS);
        Self::conditional_select(&diff, &diff_plus_p, Choice::from(borrow as u8))
    }

    /// Doubling: (2 · self) mod p
    #[inline(always)]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Field multiplication: (self · other) mod p
    /// Schoolbook 8×8 → 16-limb product, then reduction
    pub fn mul(&self, other: &Self) -> Self {
        // Phase 1: 8×8 → 16 partial accumulators in u128
        let mut t = [0u128; NLIMBS * 2];
        for i in 0..NLIMBS {
            for j in 0..NLIMBS {
                t[i + j] += (self.0[i] as u128) * (other.0[j] as u128);
            }
        }

        // Phase 2: carry-propagate into 16 × u32 limbs
        let mut wide = [0u32; NLIMBS * 2];
        let mut carry: u128 = 0;
        for i in 0..(NLIMBS * 2) {
            let v = t[i] + carry;
            wide[i] = (v & 0xFFFF_FFFF) as u32;
            carry = v >> 32;
        }

        // Phase 3: reduce 16 limbs → 8 limbs mod p
        Self::reduce_wide(wide)
    }

    /// Field squaring: (self²) mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Negate this field element: returns p - self if non-zero, else zero
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            self.clone()
        } else {
            FieldElement::zero().sub(self)
        }
    }

    /// Modular exponentiation with a 32-byte big-endian exponent.
    /// Left-to-right binary square-and-multiply.
    pub fn pow(&self, exp: &[u8; 32]) -> Self {
        let mut result = FieldElement::one();
        let base = self.clone();

        for &byte in exp.iter() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.mul(&base);
                }
            }
        }

        result
    }

    /// Compute the multiplicative inverse via Fermat: a^(p-2) mod p.
    /// Defined only for nonzero elements.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("FieldElement", "zero has no inverse"));
        }
        Ok(self.pow(&Self::P_MINUS_2))
    }

    /// Division: (self · other⁻¹) mod p
    pub fn div(&self, other: &Self) -> Result<Self> {
        Ok(self.mul(&other.invert()?))
    }

    /// Compute a square root using the fact that p ≡ 3 (mod 4):
    /// the candidate is self^((p+1)/4), accepted iff its square gives
    /// back self. Quadratic non-residues return `None`.
    pub fn sqrt(&self) -> Option<Self> {
        let z = self.pow(&Self::SQRT_EXP);
        if z.square() == *self {
            Some(z)
        } else {
            None
        }
    }

    /// Compute the cube roots using the fact that p ≡ 7 (mod 9).
    ///
    /// Writing p − 1 = 9u + 6, for any v the value v^(3u+2) lies in
    /// {1, U₁, U₂}; exactly when it equals 1 the candidate
    /// c = v^(u+1) = v^((p+2)/9) satisfies c³ = v, and the full root set
    /// is { c, c·U₁, c·U₂ }. Non-residues return `None`.
    ///
    /// This entry point is experimental: nothing in the signing or
    /// address paths depends on it.
    pub fn cube_root(&self) -> Option<[Self; 3]> {
        let c = self.pow(&Self::CUBE_EXP);
        if c.square().mul(&c) != *self {
            return None;
        }
        let second = c.mul(&Self::UNITY_CUBEROOT_1);
        let third = c.mul(&Self::UNITY_CUBEROOT_2);
        Some([c, second, third])
    }

    /// 8-limb addition with carry
    #[inline(always)]
    fn adc8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut carry = 0u64;
        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let tmp = (a_limb as u64) + (b_limb as u64) + carry;
            *r_limb = (tmp & 0xFFFF_FFFF) as u32;
            carry = tmp >> 32;
        }
        (r, carry as u32)
    }

    /// 8-limb subtraction with borrow
    #[inline(always)]
    fn sbb8(a: [u32; NLIMBS], b: [u32; NLIMBS]) -> ([u32; NLIMBS], u32) {
        let mut r = [0u32; NLIMBS];
        let mut borrow = 0u32;

        for ((&a_limb, &b_limb), r_limb) in a.iter().zip(b.iter()).zip(r.iter_mut()) {
            let ai = a_limb as u64;
            let bi = b_limb as u64;
            let tmp = ai.wrapping_sub(bi + borrow as u64);

            *r_limb = tmp as u32;
            borrow = (ai < bi + borrow as u64) as u32;
        }

        (r, borrow)
    }

    /// Constant-time select: if flag == 0 return a else return b
    fn conditional_select(a: &[u32; NLIMBS], b: &[u32; NLIMBS], flag: Choice) -> Self {
        let mut out = [0u32; NLIMBS];
        for ((a_limb, b_limb), out_limb) in a.iter().zip(b.iter()).zip(out.iter_mut()) {
            *out_limb = u32::conditional_select(a_limb, b_limb, flag);
        }
        FieldElement(out)
    }

    /// Reduce a 16-word (512-bit) value modulo p = 2²⁵⁶ − 2³² − 977,
    /// using 2²⁵⁶ ≡ 2³² + 977 (mod p).
    fn reduce_wide(t: [u32; NLIMBS * 2]) -> FieldElement {
        // step 1 – fold the high half: each high limb h at weight
        // 2^(32j+256) contributes h·977 at limb j and h at limb j+1
        let mut r = [0u64; NLIMBS + 1];
        for (i, limb) in r.iter_mut().take(NLIMBS).enumerate() {
            *limb = t[i] as u64;
        }
        for j in 0..NLIMBS {
            let hi = t[j + NLIMBS] as u64;
            r[j] += hi * 977;
            r[j + 1] += hi;
        }

        // step 2 – propagate carries over the low eight limbs
        let mut carry = 0u64;
        for limb in r.iter_mut().take(NLIMBS) {
            let tmp = *limb + carry;
            *limb = tmp & 0xFFFF_FFFF;
            carry = tmp >> 32;
        }

        // step 3 – fold the residual limb the same way until it is gone
        let mut acc = [0u64; NLIMBS];
        acc.copy_from_slice(&r[..NLIMBS]);
        let mut extra = r[NLIMBS] + carry;
        while extra != 0 {
            acc[0] += extra * 977;
            acc[1] += extra;
            let mut c = 0u64;
            for limb in acc.iter_mut() {
                let tmp = *limb + c;
                *limb = tmp & 0xFFFF_FFFF;
                c = tmp >> 32;
            }
            extra = c;
        }

        // step 4 – at most two conditional subtractions of p
        let mut out = [0u32; NLIMBS];
        for (i, out_limb) in out.iter_mut().enumerate() {
            *out_limb = acc[i] as u32;
        }

        for _ in 0..2 {
            let (sub, borrow) = Self::sbb8(out, Self::MOD_LIMBS);
            let selected = Self::conditional_select(&out, &sub, Choice::from((borrow ^ 1) as u8));
            out = selected.0;
        }

        FieldElement(out)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
