//! RIPEMD-160 test vectors and behavior tests

use super::*;
use crate::hash::hash160;

#[test]
fn test_ripemd160_empty() {
    let expected = "9c1185a5c5e9fc54612808977ee8f548b2258d31";
    assert_eq!(hex::encode(Ripemd160::digest(&[])), expected);
}

#[test]
fn test_ripemd160_abc() {
    let expected = "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc";
    assert_eq!(hex::encode(Ripemd160::digest(b"abc")), expected);
}

#[test]
fn test_ripemd160_message_digest() {
    let expected = "5d0689ef49d2fae572b881b123a85ffa21595f36";
    assert_eq!(hex::encode(Ripemd160::digest(b"message digest")), expected);
}

#[test]
fn test_ripemd160_alphabet() {
    let expected = "f71c27109c692c1b56bbdceb5b9d2865b3708dbc";
    assert_eq!(
        hex::encode(Ripemd160::digest(b"abcdefghijklmnopqrstuvwxyz")),
        expected
    );
}

#[test]
fn test_ripemd160_streaming_matches_oneshot() {
    let data = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

    for split in [0, 3, 17, data.len()] {
        let mut hasher = Ripemd160::new();
        hasher.update(&data[..split]);
        hasher.update(&data[split..]);
        assert_eq!(hasher.finalize(), Ripemd160::digest(data));
    }
}

#[test]
fn test_hash160_of_base_point() {
    // RIPEMD160(SHA256(compressed G)), the best-known hash160 there is
    let g = crate::ec::base_point_g();
    assert_eq!(
        hex::encode(hash160(&g.serialize(true))),
        "751e76e8199196d454941c45d1b3a323f1433bd6"
    );
}
