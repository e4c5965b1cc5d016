//! Size constants for secp256k1 encodings

/// Size of a field element in bytes (256 bits)
pub const FIELD_ELEMENT_SIZE: usize = 32;

/// Size of a scalar in bytes (256 bits)
pub const SCALAR_SIZE: usize = 32;

/// Size of the point-at-infinity encoding: a single zero byte
pub const POINT_INFINITY_SIZE: usize = 1;

/// Size of a compressed point encoding: prefix byte + x-coordinate
pub const POINT_COMPRESSED_SIZE: usize = 1 + FIELD_ELEMENT_SIZE;

/// Size of an uncompressed point encoding: prefix byte + x + y
pub const POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * FIELD_ELEMENT_SIZE;
