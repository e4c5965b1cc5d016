//! ECDSA signing, verification and public key recovery
//!
//! The ECDSA algorithm supports key recovery: a signature can be
//! reversed to find the public key used to calculate it. This is
//! convenient when you have a message and a signature and want to find
//! out who signed it, rather than requiring the signer's identity up
//! front. Every signature admits up to four candidate keys; recovery is
//! offered both by explicit candidate index and by matching against a
//! Bitcoin address.

use crate::address::{Address, Network};
use crate::ec::{self, Point, Scalar, SCALAR_SIZE};
use crate::error::{validate, Error, Result};
use crate::keys::Key;
use core::fmt;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// The two components that make up an ECDSA signature.
///
/// The constructor does not check the components; a signature is usable
/// exactly when both lie in [1, n−1], which [`Signature::is_valid`]
/// reports and [`verify`] enforces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: [u8; SCALAR_SIZE],
    s: [u8; SCALAR_SIZE],
}

impl Signature {
    /// Construct a signature from its raw big-endian components.
    pub fn new(r: [u8; SCALAR_SIZE], s: [u8; SCALAR_SIZE]) -> Self {
        Signature { r, s }
    }

    /// The r component, big-endian.
    pub fn r(&self) -> &[u8; SCALAR_SIZE] {
        &self.r
    }

    /// The s component, big-endian.
    pub fn s(&self) -> &[u8; SCALAR_SIZE] {
        &self.s
    }

    /// `true` if both components lie in the range [1, n−1].
    pub fn is_valid(&self) -> bool {
        in_scalar_range(&self.r) && in_scalar_range(&self.s)
    }

    /// `true` if the s component lies in the low half of the range
    /// (BIP 146 canonical form).
    pub fn is_low_s(&self) -> bool {
        !Scalar::reduce(self.s).is_high()
    }

    /// The canonical low-s form of this signature: an s above n/2 is
    /// replaced by n − s, which verifies against the same inputs.
    pub fn normalize_s(&self) -> Signature {
        let s = Scalar::reduce(self.s);
        if s.is_high() {
            Signature {
                r: self.r,
                s: s.negate().serialize(),
            }
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[0x")?;
        for byte in self.r {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ", 0x")?;
        for byte in self.s {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "]")
    }
}

/// Produce the signature of the given hash of a message.
///
/// The nonce is drawn uniformly from [1, n−1] by rejection sampling
/// from the supplied cryptographically secure generator, and the
/// resulting signature is canonicalised to low-s form.
///
/// Fails when the key has no private part. Hashes longer than 256 bits
/// are truncated to their leftmost 256 bits.
pub fn sign<R: CryptoRng + RngCore>(hash: &[u8], key: &Key, rng: &mut R) -> Result<Signature> {
    let d = key
        .private_scalar()
        .ok_or(Error::param("sign", "a private key is required to sign"))?;

    let z = Scalar::reduce(fit_digest(hash));

    loop {
        // Select a random nonce k in the interval [1, n-1]
        let mut nonce_bytes = [0u8; SCALAR_SIZE];
        rng.fill_bytes(&mut nonce_bytes);
        let k = match Scalar::new(nonce_bytes) {
            Ok(k) => {
                nonce_bytes.zeroize();
                k
            }
            Err(_) => continue,
        };

        // u = k·G and r = u.x mod n; if r = 0, pick a new nonce
        let u = ec::scalar_mult_base_g(&k);
        let r = Scalar::reduce(
            u.x()
                .expect("k in [1, n-1] gives a finite point")
                .to_bytes(),
        );
        if r.is_zero() {
            continue;
        }

        // s = k⁻¹(z + r·d) mod n; if s = 0, pick a new nonce
        let k_inv = k.inv_mod_n()?;
        let s = k_inv.mul_mod_n(&z.add_mod_n(&r.mul_mod_n(d)));
        if s.is_zero() {
            continue;
        }

        return Ok(Signature::new(r.serialize(), s.serialize()).normalize_s());
    }
}

/// Check whether (r, s) is a valid signature over the given hash for
/// the public key Q.
///
/// Structural problems (Q at infinity or outside the prime-order group,
/// components out of range, a degenerate verification point) report
/// `false` rather than raising.
pub fn verify(hash: &[u8], signature: &Signature, q: &Point) -> bool {
    // The public key must be a finite point of order n
    if q.is_identity() {
        return false;
    }
    if !q.multiply(&Scalar::ORDER).is_identity() {
        return false;
    }

    // r and s must be integers in the interval [1, n-1]
    if !signature.is_valid() {
        return false;
    }

    let z = Scalar::reduce(fit_digest(hash));
    let r = Scalar::reduce(signature.r);
    let s = Scalar::reduce(signature.s);

    // w = s⁻¹, u1 = z·w, u2 = r·w
    let w = match s.inv_mod_n() {
        Ok(w) => w,
        Err(_) => return false,
    };
    let u1 = z.mul_mod_n(&w);
    let u2 = r.mul_mod_n(&w);

    // The signature is valid iff (u1·G + u2·Q).x ≡ r (mod n)
    let point = Point::sum_of_two_multiplies(&ec::base_point_g(), u1.as_bytes(), q, u2.as_bytes());
    let x = match point.x() {
        Some(x) => x,
        None => return false,
    };

    Scalar::reduce(x.to_bytes()) == r
}

/// Given the components of a signature, recover the public key that
/// generated it, following SEC1 v2 section 4.1.6.
///
/// `key_idx` ranges over the four possible candidates (0 to 3); the
/// caller must either store the index alongside the signature or try
/// each in turn. `Ok(None)` means this index yields no key.
pub fn recover(hash: &[u8], signature: &Signature, key_idx: u8) -> Result<Option<Point>> {
    validate::parameter(key_idx <= 3, "key index", "must be between 0 and 3")?;
    validate::parameter(
        signature.is_valid(),
        "signature",
        "components out of range",
    )?;

    // x = r + jn for j = keyIdx / 2; coordinates live modulo p, so a
    // candidate at or above p yields nothing
    let x = match x_candidate(&signature.r, key_idx / 2) {
        Some(x) => x,
        None => return Ok(None),
    };

    // Consider x as the abscissa of a point R, with the y parity chosen
    // by the low index bit
    let big_r = match Point::from_x(&x, (key_idx & 1) == 0) {
        Ok(p) => p,
        Err(_) => return Ok(None),
    };

    // R must lie in the prime-order group
    if !big_r.multiply(&Scalar::ORDER).is_identity() {
        return Ok(None);
    }

    Ok(Some(candidate_key(hash, signature, &big_r)))
}

/// Recover the public key behind a signature by matching candidate
/// addresses against the supplied one.
///
/// Because an address does not reveal whether its key was compressed,
/// both encodings are tried for each of the four candidates, on the
/// network the address names. Returns `None` when no candidate matches.
pub fn recover_for_address(hash: &[u8], signature: &Signature, address: &Address) -> Option<Point> {
    if !signature.is_valid() {
        return None;
    }

    let network = if address.is_production() {
        Network::Mainnet
    } else {
        Network::Testnet
    };

    for j in 0..2u8 {
        let x = match x_candidate(&signature.r, j) {
            Some(x) => x,
            None => continue,
        };

        // Either of the two y solutions works as a starting point; the
        // inner loop flips to the other one
        let mut big_r = match Point::from_x(&x, true) {
            Ok(p) => p,
            Err(_) => continue,
        };

        if !big_r.multiply(&Scalar::ORDER).is_identity() {
            continue;
        }

        for _ in 0..2 {
            let q = candidate_key(hash, signature, &big_r);

            // The four candidates all pass signature verification, so
            // the only discriminator is the address itself. Compressed
            // first, as that is the standard.
            for compressed in [true, false] {
                if Address::from_point(network, &q, compressed) == *address {
                    return Some(q);
                }
            }

            big_r = big_r.negate();
        }
    }

    None
}

/// Compute a candidate public key Q = r⁻¹(sR − zG), rewritten as
/// (r⁻¹s)·R + (r⁻¹·(−z))·G so both factors are plain scalars.
fn candidate_key(hash: &[u8], signature: &Signature, big_r: &Point) -> Point {
    let z = Scalar::reduce(fit_digest(hash));
    let e_inv = z.negate();
    let r = Scalar::reduce(signature.r);
    let s = Scalar::reduce(signature.s);

    let r_inv = r.inv_mod_n().expect("r is in [1, n-1]");
    let sr_inv = r_inv.mul_mod_n(&s);
    let er_inv = r_inv.mul_mod_n(&e_inv);

    let p1 = ec::base_point_g().multiply(er_inv.as_bytes());
    let p2 = big_r.multiply(sr_inv.as_bytes());
    p2.add(&p1)
}

/// x = r + j·n as 32 bytes, or `None` when the sum leaves 256 bits.
fn x_candidate(r: &[u8; SCALAR_SIZE], j: u8) -> Option<[u8; SCALAR_SIZE]> {
    if j == 0 {
        return Some(*r);
    }

    let mut x = [0u8; SCALAR_SIZE];
    let mut carry = 0u16;
    for i in (0..SCALAR_SIZE).rev() {
        let v = r[i] as u16 + Scalar::ORDER[i] as u16 + carry;
        x[i] = v as u8;
        carry = v >> 8;
    }
    if carry != 0 {
        None
    } else {
        Some(x)
    }
}

/// Interpret the hash as a big-endian integer and keep its leftmost 256
/// bits: hashes longer than the group order are right-shifted so the
/// high bits survive.
fn fit_digest(hash: &[u8]) -> [u8; SCALAR_SIZE] {
    let mut out = [0u8; SCALAR_SIZE];

    let first = match hash.iter().position(|&b| b != 0) {
        Some(i) => i,
        None => return out,
    };
    let sig = &hash[first..];
    let bit_len = (sig.len() - 1) * 8 + (8 - sig[0].leading_zeros() as usize);

    if bit_len <= 8 * SCALAR_SIZE {
        out[SCALAR_SIZE - sig.len()..].copy_from_slice(sig);
        return out;
    }

    let shift = bit_len - 8 * SCALAR_SIZE;
    let keep = sig.len() - shift / 8;
    let src = &sig[..keep];
    let bit_shift = shift % 8;

    if bit_shift == 0 {
        // src is exactly 32 significant bytes
        out.copy_from_slice(&src[src.len() - SCALAR_SIZE..]);
    } else {
        // src holds 256 + bit_shift significant bits in 33 bytes
        for i in 0..SCALAR_SIZE {
            out[i] = (src[i] << (8 - bit_shift)) | (src[i + 1] >> bit_shift);
        }
    }
    out
}

/// 1 ≤ value < n, big-endian comparison
fn in_scalar_range(bytes: &[u8; SCALAR_SIZE]) -> bool {
    if bytes.iter().all(|&b| b == 0) {
        return false;
    }
    for i in 0..SCALAR_SIZE {
        if bytes[i] < Scalar::ORDER[i] {
            return true;
        }
        if bytes[i] > Scalar::ORDER[i] {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests;
