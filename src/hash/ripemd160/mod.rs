//! RIPEMD-160 hash function (ISO/IEC 10118-3)
//!
//! Bitcoin shortens public keys to 20 bytes with RIPEMD-160 applied on
//! top of SHA-256; see [`crate::hash::hash160`].

use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

/// Size of a RIPEMD-160 digest in bytes
pub const RIPEMD160_OUTPUT_SIZE: usize = 20;

/// RIPEMD-160 message block size in bytes
pub const RIPEMD160_BLOCK_SIZE: usize = 64;

// Message word selection for the left line
const R_LEFT: [usize; 80] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, //
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8, //
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12, //
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2, //
    4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13,
];

// Message word selection for the right line
const R_RIGHT: [usize; 80] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12, //
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2, //
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13, //
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14, //
    12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11,
];

// Rotation amounts for the left line
const S_LEFT: [u32; 80] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8, //
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12, //
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5, //
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12, //
    9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6,
];

// Rotation amounts for the right line
const S_RIGHT: [u32; 80] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6, //
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11, //
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5, //
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8, //
    8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11,
];

// Round constants, one per group of sixteen steps
const K_LEFT: [u32; 5] = [0x00000000, 0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xA953FD4E];
const K_RIGHT: [u32; 5] = [0x50A28BE6, 0x5C4DD124, 0x6D703EF3, 0x7A6D76E9, 0x00000000];

/// RIPEMD-160 hash function state
#[derive(Clone, Zeroize)]
pub struct Ripemd160 {
    state: [u32; 5],
    buffer: [u8; RIPEMD160_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Ripemd160 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Default for Ripemd160 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ripemd160 {
    fn init_state() -> [u32; 5] {
        [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0]
    }

    /// Create a fresh hasher
    pub fn new() -> Self {
        Ripemd160 {
            state: Self::init_state(),
            buffer: [0u8; RIPEMD160_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    /// Absorb input bytes
    pub fn update(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), RIPEMD160_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == RIPEMD160_BLOCK_SIZE {
                let mut block = [0u8; RIPEMD160_BLOCK_SIZE];
                block.copy_from_slice(&self.buffer);
                Self::compress(&mut self.state, &block);
                block.zeroize();
                self.total_bytes += RIPEMD160_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
    }

    /// Pad, run the final compressions and produce the digest
    pub fn finalize(mut self) -> [u8; RIPEMD160_OUTPUT_SIZE] {
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes * 8;

        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let mut block = [0u8; RIPEMD160_BLOCK_SIZE];
            block.copy_from_slice(&self.buffer);
            Self::compress(&mut self.state, &block);
            self.buffer = [0u8; RIPEMD160_BLOCK_SIZE];
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..56] {
                *b = 0;
            }
        }

        // RIPEMD-160 counts length little-endian, unlike the SHA family
        LittleEndian::write_u64(&mut self.buffer[56..], bit_len);
        let mut block = [0u8; RIPEMD160_BLOCK_SIZE];
        block.copy_from_slice(&self.buffer);
        Self::compress(&mut self.state, &block);

        let mut out = [0u8; RIPEMD160_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Calculate the one-shot hash of the contents
    pub fn digest(contents: &[u8]) -> [u8; RIPEMD160_OUTPUT_SIZE] {
        let mut hasher = Self::new();
        hasher.update(contents);
        hasher.finalize()
    }

    // Step function: the five boolean functions, indexed by step group
    fn f(j: usize, x: u32, y: u32, z: u32) -> u32 {
        match j / 16 {
            0 => x ^ y ^ z,
            1 => (x & y) | (!x & z),
            2 => (x | !y) ^ z,
            3 => (x & z) | (y & !z),
            _ => x ^ (y | !z),
        }
    }

    fn compress(state: &mut [u32; 5], block: &[u8; RIPEMD160_BLOCK_SIZE]) {
        let mut x = [0u32; 16];
        for (i, word) in x.iter_mut().enumerate() {
            *word = LittleEndian::read_u32(&block[i * 4..]);
        }

        let (mut al, mut bl, mut cl, mut dl, mut el) =
            (state[0], state[1], state[2], state[3], state[4]);
        let (mut ar, mut br, mut cr, mut dr, mut er) =
            (state[0], state[1], state[2], state[3], state[4]);

        for j in 0..80 {
            let round = j / 16;

            let t = al
                .wrapping_add(Self::f(j, bl, cl, dl))
                .wrapping_add(x[R_LEFT[j]])
                .wrapping_add(K_LEFT[round])
                .rotate_left(S_LEFT[j])
                .wrapping_add(el);
            al = el;
            el = dl;
            dl = cl.rotate_left(10);
            cl = bl;
            bl = t;

            let t = ar
                .wrapping_add(Self::f(79 - j, br, cr, dr))
                .wrapping_add(x[R_RIGHT[j]])
                .wrapping_add(K_RIGHT[round])
                .rotate_left(S_RIGHT[j])
                .wrapping_add(er);
            ar = er;
            er = dr;
            dr = cr.rotate_left(10);
            cr = br;
            br = t;
        }

        let t = state[1].wrapping_add(cl).wrapping_add(dr);
        state[1] = state[2].wrapping_add(dl).wrapping_add(er);
        state[2] = state[3].wrapping_add(el).wrapping_add(ar);
        state[3] = state[4].wrapping_add(al).wrapping_add(br);
        state[4] = state[0].wrapping_add(bl).wrapping_add(cr);
        state[0] = t;

        x.zeroize();
    }
}

#[cfg(test)]
mod tests;
