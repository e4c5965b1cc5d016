//! Bitcoin addresses
//!
//! An address is the RIPEMD160-of-SHA256 hash of an encoded public key
//! (20 bytes), wrapped in a Base58Check envelope whose version byte
//! names the network. Because a public key encodes in both compressed
//! and uncompressed form, one private key leads to two different
//! addresses.

use crate::base58;
use crate::ec::Point;
use crate::error::{validate, Result};
use crate::hash::hash160;
use crate::keys::Key;
use core::fmt;
use std::hash::{Hash, Hasher};

/// Length of the hash at the core of an address, in bytes
pub const HASH160_LENGTH: usize = 20;

const PROD_ADDRESS_VERSION: u8 = 0;
const TEST_ADDRESS_VERSION: u8 = 111;
const PROD_WIF_VERSION: u8 = 128;
const TEST_WIF_VERSION: u8 = 239;

/// The Bitcoin network a key or address belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// The production network
    Mainnet,
    /// The test network
    Testnet,
}

impl Network {
    /// The Base58Check version byte for addresses on this network
    pub const fn address_version(self) -> u8 {
        match self {
            Network::Mainnet => PROD_ADDRESS_VERSION,
            Network::Testnet => TEST_ADDRESS_VERSION,
        }
    }

    /// The Base58Check version byte for dumped private keys on this network
    pub const fn wif_version(self) -> u8 {
        match self {
            Network::Mainnet => PROD_WIF_VERSION,
            Network::Testnet => TEST_WIF_VERSION,
        }
    }

    /// Recognize a network from an address version byte
    pub fn from_address_version(version: u8) -> Option<Self> {
        match version {
            PROD_ADDRESS_VERSION => Some(Network::Mainnet),
            TEST_ADDRESS_VERSION => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Recognize a network from a dumped-private-key version byte
    pub fn from_wif_version(version: u8) -> Option<Self> {
        match version {
            PROD_WIF_VERSION => Some(Network::Mainnet),
            TEST_WIF_VERSION => Some(Network::Testnet),
            _ => None,
        }
    }
}

/// A Bitcoin address: a version byte plus the 20-byte hash of an
/// addressable object (a public key).
///
/// Two addresses are equal when their hashes are equal; the version
/// byte does not take part in comparison, so a mainnet and a testnet
/// address over the same key compare equal.
#[derive(Clone, Debug)]
pub struct Address {
    version: u8,
    hash: [u8; HASH160_LENGTH],
    /// Whether the key behind this address was compressed; unknown when
    /// the address was built from a bare hash or parsed from text
    compressed_key: Option<bool>,
}

impl Address {
    /// Construct the address of a key on the given network.
    pub fn from_key(network: Network, key: &Key, compressed: bool) -> Self {
        Self::from_point(network, key.public_point(), compressed)
    }

    /// Construct the address of a public point on the given network.
    pub fn from_point(network: Network, point: &Point, compressed: bool) -> Self {
        Address {
            version: network.address_version(),
            hash: hash160(&point.serialize(compressed)),
            compressed_key: Some(compressed),
        }
    }

    /// Construct an address from an already-computed hash160.
    ///
    /// A bare hash carries no indication of whether the public key was
    /// compressed.
    pub fn from_hash160(network: Network, hash: [u8; HASH160_LENGTH]) -> Self {
        Address {
            version: network.address_version(),
            hash,
            compressed_key: None,
        }
    }

    /// Parse an address from its standard "human readable" form, such
    /// as `17kzeh4N8g49GFvdDzSf8PjaPfyoD1MndL`.
    ///
    /// The network is inferred from the version byte. An unrecognized
    /// version still parses; it simply reports [`Address::is_valid`] as
    /// false for both networks.
    pub fn parse(text: &str) -> Result<Self> {
        let (version, payload) = base58::decode_check(text)?;
        validate::length("address payload", payload.len(), HASH160_LENGTH)?;

        let mut hash = [0u8; HASH160_LENGTH];
        hash.copy_from_slice(&payload);
        Ok(Address {
            version,
            hash,
            compressed_key: None,
        })
    }

    /// The (big endian) 20 byte hash that is the core of the address.
    /// It does not depend on the network.
    pub fn hash160(&self) -> &[u8; HASH160_LENGTH] {
        &self.hash
    }

    /// The raw version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The network this address belongs to, if the version byte names one.
    pub fn network(&self) -> Option<Network> {
        Network::from_address_version(self.version)
    }

    /// `true` if this address is for the production network.
    pub fn is_production(&self) -> bool {
        self.version == PROD_ADDRESS_VERSION
    }

    /// `true` if this address is for the test network.
    pub fn is_test(&self) -> bool {
        self.version == TEST_ADDRESS_VERSION
    }

    /// `true` if this address is for the production or the test network.
    pub fn is_valid(&self) -> bool {
        self.is_production() || self.is_test()
    }

    /// Whether the public key behind this address was compressed, when
    /// that is known.
    pub fn uses_compressed_key(&self) -> Option<bool> {
        self.compressed_key
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_check(self.version, &self.hash))
    }
}
