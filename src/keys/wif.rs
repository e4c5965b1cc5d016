//! Import and export of private keys in the form used by the Bitcoin
//! `dumpprivkey` command (WIF).
//!
//! The payload is the 32 private key bytes; a 33rd byte of value 0x01
//! signals that the corresponding address must be generated from the
//! compressed public key. The whole is wrapped in a Base58Check
//! envelope whose version byte names the network (128 production,
//! 239 test).

use crate::address::{Address, Network};
use crate::base58;
use crate::ec::SCALAR_SIZE;
use crate::error::{Error, Result};
use crate::keys::Key;
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A private key in "dumpprivkey" form: network, 32 key bytes and the
/// compressed-public-key marker.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Wif {
    #[zeroize(skip)]
    network: Network,
    key_bytes: [u8; SCALAR_SIZE],
    #[zeroize(skip)]
    compressed: bool,
}

impl Wif {
    /// Prepare a private key to be dumped.
    ///
    /// Fails when the key has no private part.
    pub fn from_key(network: Network, key: &Key, compressed: bool) -> Result<Self> {
        let private = key
            .private_scalar()
            .ok_or(Error::param("Wif", "key has no private value"))?;
        Ok(Wif {
            network,
            key_bytes: private.serialize(),
            compressed,
        })
    }

    /// Parse a dumped private key, checking that its version byte
    /// matches the expected network.
    pub fn parse(network: Network, text: &str) -> Result<Self> {
        let (version, payload) = base58::decode_check(text)?;
        if version != network.wif_version() {
            return Err(Error::encoding("Wif", "mismatched version number"));
        }

        // Exported keys may append a 0x01 byte to tell other clients
        // that the address must be generated from the compressed form
        // of the public key.
        let compressed = match payload.len() {
            33 if payload[32] == 0x01 => true,
            32 => false,
            _ => {
                return Err(Error::encoding(
                    "Wif",
                    "payload is not 32 or 33 private key bytes",
                ))
            }
        };

        let mut key_bytes = [0u8; SCALAR_SIZE];
        key_bytes.copy_from_slice(&payload[..SCALAR_SIZE]);
        Ok(Wif {
            network,
            key_bytes,
            compressed,
        })
    }

    /// The network this dump is for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether the address is to be derived from the compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The raw 32 private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.key_bytes
    }

    /// Rebuild the key from this dump.
    ///
    /// Fails when the dumped bytes are not a valid private scalar.
    pub fn key(&self) -> Result<Key> {
        Key::from_private_bytes(&self.key_bytes)
    }

    /// The address corresponding to this dump, on its network and with
    /// its compression choice.
    pub fn address(&self) -> Result<Address> {
        Ok(Address::from_key(self.network, &self.key()?, self.compressed))
    }
}

impl fmt::Display for Wif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; SCALAR_SIZE + 1];
        payload[..SCALAR_SIZE].copy_from_slice(&self.key_bytes);
        let len = if self.compressed {
            payload[SCALAR_SIZE] = 0x01;
            SCALAR_SIZE + 1
        } else {
            SCALAR_SIZE
        };

        let encoded = base58::encode_check(self.network.wif_version(), &payload[..len]);
        let result = f.write_str(&encoded);
        payload.zeroize();
        result
    }
}
