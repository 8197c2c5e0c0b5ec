//! End-to-end test vectors.

use crate::{decrypt, decrypt_to, encrypt, encrypt_to};
use alloc::vec::Vec;

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    hex::decode(
        hex.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>(),
    )
    .unwrap()
}

fn run_test_vector(
    test_num: usize,
    key_hex: &str,
    nonce_hex: &str,
    ad_hex: &str,
    msg: &[u8],
    expected_ct_hex: &str,
    expected_tag_hex: &str,
) {
    let key = hex_to_bytes(key_hex);
    let nonce = hex_to_bytes(nonce_hex);
    let ad = hex_to_bytes(ad_hex);
    let expected_ct = hex_to_bytes(expected_ct_hex);
    let expected_tag = hex_to_bytes(expected_tag_hex);

    // Encryption must reproduce both ciphertext and tag.
    let (ciphertext, tag) = encrypt(msg, &ad, &key, &nonce)
        .unwrap_or_else(|e| panic!("vector {test_num}: encryption failed: {e}"));
    assert_eq!(
        ciphertext, expected_ct,
        "vector {test_num}: ciphertext mismatch"
    );
    assert_eq!(tag.as_slice(), &expected_tag[..], "vector {test_num}: tag mismatch");

    // The buffer-based path must agree with the allocating path.
    let mut ct_buf = alloc::vec![0u8; msg.len()];
    let mut tag_buf = [0u8; 16];
    encrypt_to(msg, &ad, &key, &nonce, &mut ct_buf, &mut tag_buf)
        .unwrap_or_else(|e| panic!("vector {test_num}: encrypt_to failed: {e}"));
    assert_eq!(ct_buf, expected_ct);
    assert_eq!(tag_buf, tag);

    // Decryption must round-trip.
    let decrypted = decrypt(&ciphertext, &tag, &ad, &key, &nonce)
        .unwrap_or_else(|e| panic!("vector {test_num}: decryption failed: {e}"));
    assert_eq!(decrypted, msg, "vector {test_num}: decryption mismatch");

    let mut msg_buf = alloc::vec![0u8; ciphertext.len()];
    decrypt_to(&ciphertext, &tag, &ad, &key, &nonce, &mut msg_buf)
        .unwrap_or_else(|e| panic!("vector {test_num}: decrypt_to failed: {e}"));
    assert_eq!(msg_buf, msg);

    // A corrupted tag must be rejected.
    let mut bad_tag = tag;
    bad_tag[0] ^= 1;
    assert!(
        decrypt(&ciphertext, &bad_tag, &ad, &key, &nonce).is_err(),
        "vector {test_num}: corrupted tag accepted"
    );
}

#[test]
fn test_vector_1_empty_plaintext_no_ad() {
    run_test_vector(
        1,
        "4b7a9c3ef8d2165a0b3e5f8c9d4a7b1e2c5f8a9d3b6e4c7f0a1d2e5b8c9f4a7d",
        "a5b8c2d9e3f4a7b1c8d5e9f2a3b6c7d8",
        "",
        b"",
        "",
        "e3b7c5993e804d7e1f95905fe8fa1d74",
    );
}

#[test]
fn test_vector_2_single_block_plaintext_no_ad() {
    run_test_vector(
        2,
        "2f8e4d7c3b9a5e1f8d2c6b4a9f3e7d5c1b8a6f4e3d2c9b5a8f7e6d4c3b2a1f9e",
        "7c3e9f5a1d8b4c6f2e9a5d7b3f8c1e4a",
        "",
        &hex_to_bytes("55f00fcc339669aa55f00fcc339669aa"),
        "66fc201d96ace3ca550326964c2fa950",
        "2e4d9b3bf320283de63ea5547454878d",
    );
}

#[test]
fn test_vector_3_empty_plaintext_with_ad() {
    run_test_vector(
        3,
        "9f3e7d5c4b8a2f1e9d8c7b6a5f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c9b8a7f6e",
        "3d8c7f2a5b9e4c1f8a6d3b7e5c2f9a4d",
        "394a5b6c7d8e9fb0c1d2e3f405162738495a6b7c8d9eafc0d1e2f30415263748",
        b"",
        "",
        "531a4d1ed47bda55d01cc510512099e4",
    );
}

#[test]
fn test_vector_4_single_byte_plaintext() {
    run_test_vector(
        4,
        "7b6a5f4e3d2c1b0a9f8e7d6c5b4a3f2e1d0c9b8a7f6e5d4c3b2a1f0e9d8c7b6a",
        "2e7c9f5d3b8a4c6f1e9b5d7a3f8c2e4a",
        "",
        &[0xff],
        "51",
        "588535eb70c53ba5cce0d215194cb1c9",
    );
}

#[test]
fn test_vector_5_two_blocks_plaintext_with_ad() {
    run_test_vector(
        5,
        "4c8b7a9f3e5d2c6b1a8f9e7d6c5b4a3f2e1d0c9b8a7f6e5d4c3b2a1f0e9d8c7b",
        "7e3c9a5f1d8b4e6c2a9f5d7b3e8c1a4f",
        "c3d4e5f60718293a4b5c6d7e8fa0b1c2d3e4f5061728394a5b6c7d8e9fb0c1d2\
         e3f405162738495a6b7c8d9eafc0d1e2",
        &hex_to_bytes("aa55f00fcc339669aa55f00fcc339669aa55f00fcc339669aa55f00fcc339669"),
        "03694107097ff7ea0b1eac408fabb60acd89df4d0288fa9063309e5e323bf78f",
        "2a3144f369a893c3d756f262067e5e59",
    );
}

#[test]
fn test_vector_6_all_zeros_plaintext_with_ad() {
    run_test_vector(
        6,
        "9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b3a2f1e0d9c8b7a6f5e4d3c2b1a0f9e8d",
        "5f9d3b7e2c8a4f6d1b9e5c7a3d8f2b6e",
        "daebfc0d1e2f405162738495a6b7c8d9",
        &[0u8; 128],
        "eef78d00c4de4c557d5c769e499af7b98e5ad36cdaf1ff775a8629d82751e97e\
         8f98caa0773fe81ee40266f0d52ddbbef621504863bf39552682b29748f8c244\
         5c176cd63865732141edc59073cff90e5996a23a763f8dd058a6a91ada1d8f83\
         2f5e600b39f799a698228b68d20cd189e5e423b253a44c78060435050698ccae",
        "59970b0b35a7822f3b88b63396c2da98",
    );
}

// The vectors below pin the 16-block batched path and its guard. With no
// associated data the rotation offset stays at zero, so a 256-byte message
// is exactly one batch; a single absorbed AD block leaves the offset
// unaligned and forces the same message through the scalar path instead.

const BATCH_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const BATCH_NONCE: &str = "0f0e0d0c0b0a09080706050403020100";
const BATCH_CT_256: &str =
    "337f8828a50f453e5ae96300319893e1a305bdb8c39ce2d882211a2d9e5174de\
     541ec5900493d4030e9c71d957f725dfa936d41dc25195447dbf0ee2fe77f8e8\
     0e359ff211a459f2a307b3980816793d813752c3cd6225c7709dc3051212a892\
     b43b76167e4b0a2b0f298af5d8ec1ec583084356c2c9823046e4dde708213295\
     a82d3236b25e32338613b4deb93ae3e29b94708eeead238c0dacf7527801ab0a\
     e461eec0a0c96990dd6653a2c1ed97b0a141ff9789ac7c2a2bd70db4e58aebb1\
     7a4b74dde37913d6baf9c549730ef2cfc7c26507652d21b460ad59eb53f304bc\
     65c203175105d0a742b8f65bdf567c4c291cf2981ccda4f2446346a31a1ec7f5";

fn counting_msg(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

#[test]
fn test_vector_batch_aligned_256() {
    run_test_vector(
        7,
        BATCH_KEY,
        BATCH_NONCE,
        "",
        &counting_msg(256),
        BATCH_CT_256,
        "048b99065c941e27221e8a076a54d84b",
    );
}

#[test]
fn test_vector_batch_plus_partial_257() {
    let ct: String = alloc::format!("{BATCH_CT_256}f7");
    run_test_vector(
        8,
        BATCH_KEY,
        BATCH_NONCE,
        "",
        &counting_msg(257),
        &ct,
        "b17eb622e2e50f8a482ae0ec26b964c1",
    );
}

#[test]
fn test_vector_batched_ad_and_message() {
    let ad: String = (0..256usize)
        .map(|i| alloc::format!("{:02x}", 255 - i))
        .collect();
    run_test_vector(
        9,
        BATCH_KEY,
        BATCH_NONCE,
        &ad,
        &counting_msg(256),
        "17af24f24dab00b811757e6338f7551f2ca35ea59007b72f5e560a11746804aa\
         ff6f99743b8cde17cd4e8d7b835a069a1ec2ac396793dfe3c328ed0ea99d952b\
         f0d04e41cb474a3955c9447d7a6ee4fdec063bba49333d169e7dd488ab083108\
         41ba7c7c168b77f617bf0b486cca1308d50a189753282e0fb7bfb75547f81e09\
         d0683cdf0d2616696f5a08d1cae1a3a876094f8577a81fe2b9e08d2d312a6fe6\
         9a3fc5e3b9d06aa1981aed12123290691ea2bcc0aec32a2f580baea603c36efd\
         e14d800b2ee9833461da73a4a6a9043b24c6a84a2548334ba08ba75ef1a1e491\
         dcde1d53afd531a304af6a01ae1e6dffcc03868ac9dd9fa358b47e5ced9e4a81",
        "3cd05ef0582bb184153e546827d31caf",
    );
}

#[test]
fn test_vector_unaligned_offset_scalar_256() {
    run_test_vector(
        10,
        BATCH_KEY,
        BATCH_NONCE,
        "ffeeddccbbaa99887766554433221100",
        &counting_msg(256),
        "b315ada8d38cf2c892310a3d8e4164ce506b995e3e566f217b7971c2b159b01e\
         281a6abf8147e3a899c61b4521cdb7573e6884c5974dead4150b8392bade4e2b\
         025b50e66ec599c4664da731786671d26c2fae84be507138943bafa284bab7db\
         acafa405ddd5afde10188c994a568e3aaac8ab6613ec1bbbdf4c3a3d6b1d3d39\
         c2283fe66cde1fcca0a2698966b39f5c59237bd4832643f050a9af4dfef7ceb0\
         0e209391553a52565cedbbf24e344c4e6d77d2ab0ec377d1f336178a4fef7d76\
         852049823a3f940c07a067b6d4b7d80e5c1cf2554ab2f486013dcf69bf70f4fc\
         8bbe387e10459abf692158b4c9e4a445e09c0352decaaecc4c289b4ddd420f26",
        "ad01c1b6363211aa36d7579296d11efb",
    );
}

#[cfg(test)]
mod aesl_tests {
    use crate::intrinsics;

    #[test]
    fn test_aesl_known_answer() {
        let input = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let expected = [
            0x63, 0x79, 0xe6, 0xd9, 0xf4, 0x67, 0xfb, 0x76, 0xad, 0x06, 0x3c, 0xf4, 0xd2, 0xeb,
            0x8a, 0xa3,
        ];

        assert_eq!(intrinsics::aesl(&input), expected);
    }
}
