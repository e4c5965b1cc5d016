//! secp256k1 elliptic curve point operations
//!
//! Affine points on y² = x³ + 7 together with the group law, scalar
//! multiplication and the SEC1 byte encodings (including the 1-byte
//! encoding of the point at infinity).

use crate::ec::constants::{
    FIELD_ELEMENT_SIZE, POINT_COMPRESSED_SIZE, POINT_INFINITY_SIZE, POINT_UNCOMPRESSED_SIZE,
    SCALAR_SIZE,
};
use crate::ec::field::FieldElement;
use crate::error::{validate, Error, Result};
use core::fmt;
use subtle::Choice;

/// A point on the secp256k1 elliptic curve in affine coordinates,
/// or the point at infinity (the additive identity).
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let self_is_identity: bool = self.is_identity.into();
        let other_is_identity: bool = other.is_identity.into();
        if self_is_identity || other_is_identity {
            return self_is_identity == other_is_identity;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Point {
    /// Create the identity point (point at infinity).
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Create a point from affine coordinates.
    ///
    /// Returns an error if the coordinates do not satisfy y² = x³ + 7.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> Result<Self> {
        if !Self::is_on_curve(&x, &y) {
            return Err(Error::param(
                "Point",
                "coordinates do not satisfy the curve equation",
            ));
        }
        Ok(Self::from_affine_unchecked(x, y))
    }

    /// Create a point from coordinates known to be on the curve
    /// (group-law outputs).
    pub(crate) fn from_affine_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Point {
            is_identity: Choice::from(0),
            x,
            y,
        }
    }

    /// Create a point from the x coordinate alone. Of the two matching
    /// y values, the one whose parity equals the request is chosen:
    /// `want_even_y` selects the even solution.
    ///
    /// Fails when x is not the abscissa of any curve point (for random
    /// x that happens with probability about one half).
    pub fn from_x(x_bytes: &[u8; FIELD_ELEMENT_SIZE], want_even_y: bool) -> Result<Self> {
        let x = FieldElement::from_bytes(x_bytes)?;
        let rhs = x.square().mul(&x).add(&FieldElement::from_u32(7));
        let y = rhs
            .sqrt()
            .ok_or(Error::param("Point", "invalid x coordinate"))?;
        let y = if y.is_odd() == want_even_y { y.negate() } else { y };
        Ok(Self::from_affine_unchecked(x, y))
    }

    /// Check if this point is the identity element.
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Check if this point is valid (identity or on the curve).
    pub fn is_valid(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        Self::is_on_curve(&self.x, &self.y)
    }

    /// The affine x coordinate; `None` for the identity.
    pub fn x(&self) -> Option<&FieldElement> {
        if self.is_identity() {
            None
        } else {
            Some(&self.x)
        }
    }

    /// The affine y coordinate; `None` for the identity.
    pub fn y(&self) -> Option<&FieldElement> {
        if self.is_identity() {
            None
        } else {
            Some(&self.y)
        }
    }

    /// Negate: the identity maps to itself, (x, y) maps to (x, −y).
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        Self::from_affine_unchecked(self.x.clone(), self.y.negate())
    }

    /// Add two points using the affine group law.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        if self.x == other.x {
            if self.y == other.y {
                // other = self, so this is a doubling
                return self.double();
            }
            // other = -self, so the sum is the point at infinity
            return Self::identity();
        }

        // λ = (y₂ − y₁) / (x₂ − x₁)
        let dx_inv = other
            .x
            .sub(&self.x)
            .invert()
            .expect("distinct x coordinates have a nonzero difference");
        let lambda = other.y.sub(&self.y).mul(&dx_inv);

        let x3 = lambda.square().sub(&self.x).sub(&other.x);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Self::from_affine_unchecked(x3, y3)
    }

    /// Double a point (add it to itself).
    ///
    /// No finite secp256k1 point has y = 0, so doubling a finite point
    /// never lands on the identity.
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        // λ = (3·x²) / (2·y)
        let x_sq = self.x.square();
        let three_x_sq = x_sq.add(&x_sq).add(&x_sq);
        let inv_two_y = self
            .y
            .double()
            .invert()
            .expect("2·y is nonzero for a finite point");
        let lambda = three_x_sq.mul(&inv_two_y);

        // x₃ = λ² − 2·x₁
        let x3 = lambda.square().sub(&self.x.double());

        // y₃ = λ·(x₁ − x₃) − y₁
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);

        Self::from_affine_unchecked(x3, y3)
    }

    /// Scalar multiplication: compute k · self for a 256-bit big-endian
    /// multiplier. Values up to 2²⁵⁶ − 1 are accepted; in particular
    /// k = n yields the identity for any point in the prime-order group.
    ///
    /// Left-to-right signed scan comparing the bits of 3k and k
    /// (SEC1 D.3.2): where the bits differ, self or −self is added.
    pub fn multiply(&self, k: &[u8; SCALAR_SIZE]) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        if k.iter().all(|&b| b == 0) {
            return Self::identity();
        }

        let h = triple(k);
        let neg = self.negate();
        let mut r = self.clone();

        let top = bit_length(&h) - 2;
        for i in (1..=top).rev() {
            r = r.double();

            let h_bit = test_bit(&h, i);
            let k_bit = test_bit(k, i);

            if h_bit != k_bit {
                r = r.add(if h_bit { self } else { &neg });
            }
        }

        r
    }

    /// Shamir's trick: compute k·p + l·q with one joint double-and-add
    /// pass over the bits of both multipliers, using the precomputed
    /// sum p + q.
    pub fn sum_of_two_multiplies(
        p: &Point,
        k: &[u8; SCALAR_SIZE],
        q: &Point,
        l: &[u8; SCALAR_SIZE],
    ) -> Point {
        let m = bit_length(k).max(bit_length(l));
        let z = p.add(q);
        let mut r = Point::identity();

        for i in (0..m).rev() {
            r = r.double();

            match (test_bit(k, i), test_bit(l, i)) {
                (true, true) => r = r.add(&z),
                (true, false) => r = r.add(p),
                (false, true) => r = r.add(q),
                (false, false) => {}
            }
        }

        r
    }

    /// Serialize this point with or without compression.
    ///
    /// The result is 1 byte for the identity (`[0x00]`), 33 bytes for a
    /// compressed point (`0x02`/`0x03` prefix by y parity) or 65 bytes
    /// uncompressed (`0x04` prefix).
    pub fn serialize(&self, compressed: bool) -> Vec<u8> {
        if self.is_identity() {
            return vec![0u8; POINT_INFINITY_SIZE];
        }

        if compressed {
            let mut out = Vec::with_capacity(POINT_COMPRESSED_SIZE);
            out.push(if self.y.is_odd() { 0x03 } else { 0x02 });
            out.extend_from_slice(&self.x.to_bytes());
            out
        } else {
            let mut out = Vec::with_capacity(POINT_UNCOMPRESSED_SIZE);
            out.push(0x04);
            out.extend_from_slice(&self.x.to_bytes());
            out.extend_from_slice(&self.y.to_bytes());
            out
        }
    }

    /// Deserialize a point from its SEC1 encoding.
    ///
    /// Accepts the three forms produced by [`Point::serialize`]; any
    /// other prefix or length mismatch is rejected. Uncompressed
    /// coordinates are checked against the curve equation.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        validate::min_length("point encoding", bytes.len(), 1)?;

        match bytes[0] {
            0x00 => {
                validate::length("infinity point encoding", bytes.len(), POINT_INFINITY_SIZE)?;
                Ok(Self::identity())
            }
            0x02 | 0x03 => {
                validate::length(
                    "compressed point encoding",
                    bytes.len(),
                    POINT_COMPRESSED_SIZE,
                )?;
                let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
                x_bytes.copy_from_slice(&bytes[1..]);
                Self::from_x(&x_bytes, bytes[0] == 0x02)
                    .map_err(|_| Error::encoding("point", "x is not on the curve"))
            }
            0x04 => {
                validate::length(
                    "uncompressed point encoding",
                    bytes.len(),
                    POINT_UNCOMPRESSED_SIZE,
                )?;
                let mut x_bytes = [0u8; FIELD_ELEMENT_SIZE];
                let mut y_bytes = [0u8; FIELD_ELEMENT_SIZE];
                x_bytes.copy_from_slice(&bytes[1..33]);
                y_bytes.copy_from_slice(&bytes[33..]);
                let x = FieldElement::from_bytes(&x_bytes)
                    .map_err(|_| Error::encoding("point", "x coordinate out of range"))?;
                let y = FieldElement::from_bytes(&y_bytes)
                    .map_err(|_| Error::encoding("point", "y coordinate out of range"))?;
                Self::from_affine(x, y)
                    .map_err(|_| Error::encoding("point", "coordinates not on the curve"))
            }
            _ => Err(Error::encoding("point", "invalid encoding prefix")),
        }
    }

    fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        let y_squared = y.square();
        let rhs = x.square().mul(x).add(&FieldElement::from_u32(7));
        y_squared == rhs
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "Infinity")
        } else {
            write!(f, "[{}, {}]", self.x, self.y)
        }
    }
}

/// 3k as a 33-byte big-endian value (k + 2k cannot overflow 264 bits)
fn triple(k: &[u8; SCALAR_SIZE]) -> [u8; SCALAR_SIZE + 1] {
    let mut out = [0u8; SCALAR_SIZE + 1];
    let mut carry = 0u16;
    for i in (0..SCALAR_SIZE).rev() {
        let v = 3 * (k[i] as u16) + carry;
        out[i + 1] = v as u8;
        carry = v >> 8;
    }
    out[0] = carry as u8;
    out
}

/// Test bit `i` (counting from the least-significant bit) of a
/// big-endian byte string. Bits beyond the string are zero.
fn test_bit(bytes: &[u8], i: usize) -> bool {
    let byte_idx = i / 8;
    if byte_idx >= bytes.len() {
        return false;
    }
    (bytes[bytes.len() - 1 - byte_idx] >> (i % 8)) & 1 == 1
}

/// Position of the highest set bit plus one; zero for an all-zero string.
fn bit_length(bytes: &[u8]) -> usize {
    for (idx, &b) in bytes.iter().enumerate() {
        if b != 0 {
            return (bytes.len() - idx - 1) * 8 + (8 - b.leading_zeros() as usize);
        }
    }
    0
}
