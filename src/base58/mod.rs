//! Base58 and Base58Check encoding
//!
//! Base58 is the textual byte encoding Bitcoin uses for addresses and
//! dumped private keys. Compared with base 64 it drops the characters
//! `0OIl` that look alike in many fonts, and it has no punctuation, so
//! an encoded value double-clicks as a single word and survives e-mail
//! line wrapping.
//!
//! Base58Check wraps a payload as
//!
//! ```text
//! [one version byte] [payload bytes] [4 checksum bytes]
//! ```
//!
//! where the checksum is the first four bytes of the double-SHA-256 of
//! everything before it, and encodes the result in Base58.

use crate::error::{validate, Error, Result};
use crate::hash::Sha256;

/// The 58-character alphabet. Note this is not the same base58 as used
/// by Flickr.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Reverse lookup: ASCII byte to digit value, -1 for non-alphabet bytes
const INDEXES: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as i8;
        i += 1;
    }
    table
};

/// Length of the checksum suffix in a Base58Check string
const CHECKSUM_SIZE: usize = 4;

/// Encodes the given bytes in base58. No checksum is appended.
///
/// Each leading zero byte is represented by one leading '1' character.
pub fn encode(input: &[u8]) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut digits = input.to_vec();
    let zero_count = digits.iter().take_while(|&&b| b == 0).count();

    // Repeated division: each pass emits one base-58 digit, least
    // significant first.
    let mut out = Vec::with_capacity(input.len() * 2);
    let mut start = zero_count;
    while start < digits.len() {
        let remainder = divmod(&mut digits, start, 256, 58);
        if digits[start] == 0 {
            start += 1;
        }
        out.push(ALPHABET[remainder as usize]);
    }

    // Drop high-order zero digits, then account for the leading zero bytes
    while out.last() == Some(&ALPHABET[0]) {
        out.pop();
    }
    out.resize(out.len() + zero_count, ALPHABET[0]);

    out.reverse();
    String::from_utf8(out).expect("the alphabet is ASCII")
}

/// Decode a base58 string into bytes.
///
/// Rejects any character outside the alphabet. Each leading '1' is
/// restored as one leading zero byte.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut digits = Vec::with_capacity(input.len());
    for c in input.chars() {
        let value = if (c as u32) < 128 {
            INDEXES[c as usize]
        } else {
            -1
        };
        if value < 0 {
            return Err(Error::encoding("Base58", "illegal character"));
        }
        digits.push(value as u8);
    }

    let zero_count = digits.iter().take_while(|&&d| d == 0).count();

    let mut out = Vec::with_capacity(input.len());
    let mut start = zero_count;
    while start < digits.len() {
        let remainder = divmod(&mut digits, start, 58, 256);
        if digits[start] == 0 {
            start += 1;
        }
        out.push(remainder);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    out.resize(out.len() + zero_count, 0);

    out.reverse();
    Ok(out)
}

/// Encode a version byte and payload with the 4-byte double-SHA-256
/// checksum appended.
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_SIZE);
    data.push(version);
    data.extend_from_slice(payload);

    let check = Sha256::double_digest(&data);
    data.extend_from_slice(&check[..CHECKSUM_SIZE]);

    encode(&data)
}

/// Decode a Base58Check string into its version byte and payload,
/// verifying the checksum.
pub fn decode_check(input: &str) -> Result<(u8, Vec<u8>)> {
    let decoded = decode(input)?;
    validate::min_length("Base58Check input", decoded.len(), 1 + CHECKSUM_SIZE)?;

    let split = decoded.len() - CHECKSUM_SIZE;
    let check = Sha256::double_digest(&decoded[..split]);
    validate::encoding(
        check[..CHECKSUM_SIZE] == decoded[split..],
        "Base58Check",
        "checksum does not validate",
    )?;

    let version = decoded[0];
    Ok((version, decoded[1..split].to_vec()))
}

/// In-place long division of `number[start..]` interpreted in
/// `from_base`: the quotient replaces the digits and the remainder in
/// `to_base` is returned.
fn divmod(number: &mut [u8], start: usize, from_base: u32, to_base: u32) -> u8 {
    let mut remainder = 0u32;
    for digit in number[start..].iter_mut() {
        let temp = remainder * from_base + *digit as u32;
        *digit = (temp / to_base) as u8;
        remainder = temp % to_base;
    }
    remainder as u8
}
