//! Key, public key encoding and WIF tests

use super::*;
use crate::address::{Address, Network};
use crate::ec::Scalar;
use rand::rngs::OsRng;

#[test]
fn test_generate() {
    let mut rng = OsRng;
    let key = Key::generate(&mut rng);

    assert!(key.can_sign());
    assert!(key.private_scalar().is_some());
    assert!(!key.public_point().is_identity());
    assert!(key.creation_time_seconds() > 0);

    // The public point is the private scalar times G
    let rebuilt = Key::from_private_scalar(key.private_scalar().unwrap().clone());
    assert_eq!(rebuilt.public_point(), key.public_point());
}

#[test]
fn test_from_private_bytes_bounds() {
    assert!(Key::from_private_bytes(&[0u8; 32]).is_err());
    assert!(Key::from_private_bytes(&Scalar::ORDER).is_err());

    let mut one = [0u8; 32];
    one[31] = 1;
    let key = Key::from_private_bytes(&one).unwrap();
    // 1 · G = G
    assert_eq!(key.public_point(), &crate::ec::base_point_g());
    assert_eq!(key.creation_time_seconds(), 0);
}

#[test]
fn test_from_public_point() {
    let mut rng = OsRng;
    let full = Key::generate(&mut rng);

    let verify_only = Key::from_public_point(full.public_point().clone()).unwrap();
    assert!(!verify_only.can_sign());
    assert!(verify_only.private_scalar().is_none());

    // A key compares by its public point alone
    assert_eq!(verify_only, full);

    assert!(Key::from_public_point(crate::ec::Point::identity()).is_err());
}

#[test]
fn test_encoded_public_key() {
    let mut rng = OsRng;
    let key = Key::generate(&mut rng);

    let compressed = EncodedPublicKey::from_key(&key, true);
    assert!(compressed.is_compressed());
    assert_eq!(compressed.as_bytes().len(), 33);
    assert!(compressed.as_bytes()[0] == 0x02 || compressed.as_bytes()[0] == 0x03);

    let uncompressed = EncodedPublicKey::from_key(&key, false);
    assert!(!uncompressed.is_compressed());
    assert_eq!(uncompressed.as_bytes().len(), 65);
    assert_eq!(uncompressed.as_bytes()[0], 0x04);

    // Both forms decode back to the same point
    assert_eq!(&compressed.decode().unwrap(), key.public_point());
    assert_eq!(&uncompressed.decode().unwrap(), key.public_point());

    assert!(EncodedPublicKey::from_point(&crate::ec::Point::identity(), true).is_err());
}

#[test]
fn test_wif_compressed_vector() {
    // A known mainnet dump for a compressed key
    let text = "KwgV68eZay1uAfuuhz56Z5qkHnut75d9SfPRoqCDQ6SNUdQPHBQd";
    let wif = Wif::parse(Network::Mainnet, text).unwrap();

    assert!(wif.is_compressed());
    assert_eq!(wif.network(), Network::Mainnet);
    assert_eq!(
        wif.address().unwrap().to_string(),
        "1L7S4no7372gqFp9YLRXcjYazvxNB7gD3j"
    );

    // Re-encoding reproduces the original text
    assert_eq!(wif.to_string(), text);
    let rebuilt = Wif::from_key(Network::Mainnet, &wif.key().unwrap(), true).unwrap();
    assert_eq!(rebuilt.to_string(), text);
}

#[test]
fn test_wif_uncompressed_vector() {
    // A known mainnet dump for an uncompressed key
    let text = "5HvMQpVuF3GcP8TVFivwjAFforNVoEjdMKDLDRWjEPXfrQRqW82";
    let wif = Wif::parse(Network::Mainnet, text).unwrap();

    assert!(!wif.is_compressed());
    assert_eq!(
        wif.address().unwrap().to_string(),
        "1GgNTrgohvfnrhCbpbqK1JzuiD75v4ujXy"
    );
    assert_eq!(wif.to_string(), text);
}

#[test]
fn test_wif_roundtrip_random() {
    let mut rng = OsRng;

    for network in [Network::Mainnet, Network::Testnet] {
        for compressed in [true, false] {
            let key = Key::generate(&mut rng);
            let wif = Wif::from_key(network, &key, compressed).unwrap();

            let parsed = Wif::parse(network, &wif.to_string()).unwrap();
            assert_eq!(parsed.is_compressed(), compressed);
            assert_eq!(parsed.key().unwrap(), key);
            assert_eq!(
                parsed.address().unwrap(),
                Address::from_key(network, &key, compressed)
            );
        }
    }
}

#[test]
fn test_wif_rejects_wrong_network() {
    let text = "KwgV68eZay1uAfuuhz56Z5qkHnut75d9SfPRoqCDQ6SNUdQPHBQd";
    assert!(Wif::parse(Network::Testnet, text).is_err());
}

#[test]
fn test_wif_rejects_bad_payloads() {
    // Wrong payload sizes under a correct version and checksum
    for bad_len in [31usize, 34] {
        let text = crate::base58::encode_check(128, &vec![1u8; bad_len]);
        assert!(Wif::parse(Network::Mainnet, &text).is_err());
    }

    // 33 bytes whose trailing byte is not the 0x01 marker
    let mut payload = [1u8; 33];
    payload[32] = 0x02;
    let text = crate::base58::encode_check(128, &payload);
    assert!(Wif::parse(Network::Mainnet, &text).is_err());

    // Corrupted checksum
    assert!(Wif::parse(
        Network::Mainnet,
        "KwgV68eZay1uAfuuhz56Z5qkHnut75d9SfPRoqCDQ6SNUdQPHBQe"
    )
    .is_err());
}

#[test]
fn test_wif_requires_private_key() {
    let mut rng = OsRng;
    let full = Key::generate(&mut rng);
    let verify_only = Key::from_public_point(full.public_point().clone()).unwrap();

    assert!(Wif::from_key(Network::Mainnet, &verify_only, true).is_err());
}
