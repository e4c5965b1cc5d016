//! ECDSA sign / verify / recover tests

use super::*;
use crate::address::{Address, Network};
use crate::ec::base_point_g;
use crate::keys::Key;
use rand::rngs::OsRng;
use rand::Rng;

// A fixed signing transcript: d is the private key, Q = d·G, and
// (r, s) signs the SHA-256 of "bitcoin-crypto test message" with a
// fixed nonce. s is already in the low half of the range.
const VEC_DIGEST: &str = "283f53732426bf626fed0d8227444efed69e4574b6190d396c2baf03fe29d06e";
const VEC_D: &str = "c0de000000000000000000000000000000000000000000000000000000001234";
const VEC_QX: &str = "89d8a2b416f376745cca565ff7e1d7a0736e97d17cd56e6b194645a7992f20d8";
const VEC_QY: &str = "4357c5698fb5ef0cebf5af9ec5f8379f55c7003c4c097158694cd256ee1b91fc";
const VEC_R: &str = "bb50e2d89a4ed70663d080659fe0ad4b9bc3e06c17a227433966cb59ceee020d";
const VEC_S: &str = "3bad8a1b7c8258ec44b7bdeca7a42e0ec172aabc0f1a8807e9b7f06384606c35";

fn bytes32(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&hex::decode(hex_str).unwrap());
    out
}

fn vector_key() -> Key {
    Key::from_private_bytes(&bytes32(VEC_D)).unwrap()
}

fn vector_signature() -> Signature {
    Signature::new(bytes32(VEC_R), bytes32(VEC_S))
}

fn random_digest(rng: &mut OsRng) -> [u8; 72] {
    let mut digest = [0u8; 72];
    rng.fill(&mut digest[..]);
    digest
}

#[test]
fn test_verify_known_vector() {
    let key = vector_key();
    let digest = bytes32(VEC_DIGEST);

    assert_eq!(hex::encode(key.public_point().x().unwrap().to_bytes()), VEC_QX);
    assert_eq!(hex::encode(key.public_point().y().unwrap().to_bytes()), VEC_QY);

    assert!(verify(&digest, &vector_signature(), key.public_point()));
}

#[test]
fn test_verify_rejects_wrong_inputs() {
    let key = vector_key();
    let digest = bytes32(VEC_DIGEST);
    let signature = vector_signature();

    // Wrong digest
    let mut other_digest = digest;
    other_digest[0] ^= 1;
    assert!(!verify(&other_digest, &signature, key.public_point()));

    // Tampered components
    let mut bad_r = *signature.r();
    bad_r[31] ^= 1;
    assert!(!verify(&digest, &Signature::new(bad_r, *signature.s()), key.public_point()));
    let mut bad_s = *signature.s();
    bad_s[31] ^= 1;
    assert!(!verify(&digest, &Signature::new(*signature.r(), bad_s), key.public_point()));

    // Wrong key
    let other = Key::generate(&mut OsRng);
    assert!(!verify(&digest, &signature, other.public_point()));

    // Identity as the public key
    assert!(!verify(&digest, &signature, &crate::ec::Point::identity()));
}

#[test]
fn test_verify_rejects_out_of_range_components() {
    let key = vector_key();
    let digest = bytes32(VEC_DIGEST);

    let zero = [0u8; 32];
    let r = *vector_signature().r();
    assert!(!verify(&digest, &Signature::new(zero, r), key.public_point()));
    assert!(!verify(&digest, &Signature::new(r, zero), key.public_point()));
    assert!(!verify(
        &digest,
        &Signature::new(crate::ec::Scalar::ORDER, r),
        key.public_point()
    ));
    assert!(!verify(
        &digest,
        &Signature::new(r, crate::ec::Scalar::ORDER),
        key.public_point()
    ));
}

#[test]
fn test_sign_verify_roundtrip() {
    let mut rng = OsRng;

    for _ in 0..5 {
        let key = Key::generate(&mut rng);
        let digest = random_digest(&mut rng);

        let signature = sign(&digest, &key, &mut rng).unwrap();
        assert!(signature.is_valid());
        assert!(signature.is_low_s());
        assert!(verify(&digest, &signature, key.public_point()));
        assert!(!verify(&digest[..40], &signature, key.public_point()));
    }
}

#[test]
fn test_sign_accepts_any_digest_length() {
    let mut rng = OsRng;
    let key = Key::generate(&mut rng);

    // Shorter and longer than 32 bytes, including all-zero input
    for digest in [&b""[..], &[0u8; 7][..], &[0xFFu8; 64][..]] {
        let signature = sign(digest, &key, &mut rng).unwrap();
        assert!(verify(digest, &signature, key.public_point()));
    }
}

#[test]
fn test_sign_requires_private_key() {
    let mut rng = OsRng;
    let full = Key::generate(&mut rng);
    let verify_only = Key::from_public_point(full.public_point().clone()).unwrap();

    assert!(sign(&[1u8; 32], &verify_only, &mut rng).is_err());
}

#[test]
fn test_high_s_still_verifies() {
    let key = vector_key();
    let digest = bytes32(VEC_DIGEST);
    let signature = vector_signature();

    // (r, n - s) verifies against the same inputs
    let high = Signature::new(
        *signature.r(),
        crate::ec::Scalar::reduce(*signature.s()).negate().serialize(),
    );
    assert!(!high.is_low_s());
    assert!(verify(&digest, &high, key.public_point()));

    // Normalisation restores the canonical form and is idempotent
    assert_eq!(high.normalize_s(), signature);
    assert_eq!(signature.normalize_s(), signature);
}

#[test]
fn test_recover_by_index_known_vector() {
    let key = vector_key();
    let digest = bytes32(VEC_DIGEST);
    let signature = vector_signature();

    // The fixed nonce gives an R with even y, so candidate 0 is the key
    let recovered = recover(&digest, &signature, 0).unwrap().unwrap();
    assert_eq!(&recovered, key.public_point());
}

#[test]
fn test_recover_by_index_finds_signer() {
    let mut rng = OsRng;

    for _ in 0..5 {
        let key = Key::generate(&mut rng);
        let digest = random_digest(&mut rng);
        let signature = sign(&digest, &key, &mut rng).unwrap();

        let mut found = false;
        for key_idx in 0..4 {
            if let Some(candidate) = recover(&digest, &signature, key_idx).unwrap() {
                // Every candidate passes verification; only one is the
                // signer's actual public key
                assert!(verify(&digest, &signature, &candidate));
                if &candidate == key.public_point() {
                    found = true;
                }
            }
        }
        assert!(found, "the signing key must appear among the candidates");
    }
}

#[test]
fn test_recover_rejects_bad_arguments() {
    let digest = bytes32(VEC_DIGEST);
    let signature = vector_signature();

    assert!(recover(&digest, &signature, 4).is_err());
    assert!(recover(&digest, &Signature::new([0u8; 32], *signature.s()), 0).is_err());
    assert!(recover(
        &digest,
        &Signature::new(*signature.r(), crate::ec::Scalar::ORDER),
        0
    )
    .is_err());
}

#[test]
fn test_recover_for_address() {
    let mut rng = OsRng;

    for network in [Network::Mainnet, Network::Testnet] {
        for compressed in [true, false] {
            let key = Key::generate(&mut rng);
            let digest = random_digest(&mut rng);
            let signature = sign(&digest, &key, &mut rng).unwrap();
            let address = Address::from_key(network, &key, compressed);

            let recovered = recover_for_address(&digest, &signature, &address)
                .expect("the signer's own address must match a candidate");
            assert_eq!(&recovered, key.public_point());
        }
    }
}

#[test]
fn test_recover_for_address_no_match() {
    let mut rng = OsRng;
    let key = Key::generate(&mut rng);
    let digest = random_digest(&mut rng);
    let signature = sign(&digest, &key, &mut rng).unwrap();

    // An address for an unrelated key matches no candidate
    let stranger = Key::generate(&mut rng);
    let address = Address::from_key(Network::Mainnet, &stranger, true);
    assert!(recover_for_address(&digest, &signature, &address).is_none());

    // Structurally invalid signatures recover nothing
    let invalid = Signature::new([0u8; 32], *signature.s());
    let own = Address::from_key(Network::Mainnet, &key, true);
    assert!(recover_for_address(&digest, &invalid, &own).is_none());
}

#[test]
fn test_signature_validity() {
    assert!(vector_signature().is_valid());
    assert!(!Signature::new([0u8; 32], [1u8; 32]).is_valid());
    assert!(!Signature::new([1u8; 32], [0u8; 32]).is_valid());
    assert!(!Signature::new(crate::ec::Scalar::ORDER, [1u8; 32]).is_valid());

    let mut n_minus_1 = crate::ec::Scalar::ORDER;
    n_minus_1[31] -= 1;
    assert!(Signature::new(n_minus_1, n_minus_1).is_valid());
}

#[test]
fn test_fit_digest_leftmost_bits() {
    // A 33-byte digest keeps its leftmost 256 bits: the value is
    // shifted right by the excess bit length
    let mut long = [0u8; 33];
    long[0] = 0x80;
    long[32] = 0xFF;
    let fitted = fit_digest(&long);
    // 0x80 << 256 shifted right by 8 bits leaves 0x80 in the top byte
    assert_eq!(fitted[0], 0x80);
    assert_eq!(fitted[31], 0x00);

    // Leading zero bytes do not count toward the bit length
    let mut padded = [0u8; 40];
    padded[8..].copy_from_slice(&[0x11u8; 32]);
    assert_eq!(fit_digest(&padded), [0x11u8; 32]);

    // Short digests right-align
    let short = [0xABu8, 0xCD];
    let fitted = fit_digest(&short);
    assert_eq!(fitted[30], 0xAB);
    assert_eq!(fitted[31], 0xCD);
    assert_eq!(fit_digest(&[]), [0u8; 32]);
}

#[test]
fn test_fit_digest_odd_bit_length() {
    // 257 significant bits: everything shifts right by one bit
    let mut long = [0u8; 33];
    long[0] = 0x01; // bit 256 set
    long[1] = 0x80;
    long[32] = 0x03;
    let fitted = fit_digest(&long);
    assert_eq!(fitted[0], 0xC0);
    assert_eq!(fitted[31], 0x01);
}

#[test]
fn test_verify_uses_same_fit_as_sign() {
    let mut rng = OsRng;
    let key = Key::generate(&mut rng);

    // A digest with more than 256 significant bits
    let mut digest = [0u8; 48];
    rng.fill(&mut digest[..]);
    digest[0] |= 0x80;

    let signature = sign(&digest, &key, &mut rng).unwrap();
    assert!(verify(&digest, &signature, key.public_point()));
}

#[test]
fn test_base_point_subgroup_check_in_verify() {
    // n · G = O, exercised through the public verify path with the
    // order itself as the multiplier
    assert!(base_point_g().multiply(&crate::ec::Scalar::ORDER).is_identity());
}
