//! Basic usage example for HiAE authenticated encryption.

use hiae::{decrypt, decrypt_to, encrypt, encrypt_to, Error};

fn main() -> Result<(), Error> {
    println!("HiAE Basic Usage Example");
    println!("========================");

    basic_example()?;
    size_examples()?;
    buffer_example()?;
    error_handling_example()?;

    Ok(())
}

fn basic_example() -> Result<(), Error> {
    println!("\n1. Basic Encryption/Decryption:");

    let key = [0x01; 32]; // 256-bit key
    let nonce = [0x02; 16]; // 128-bit nonce
    let plaintext = b"Hello, HiAE! This is a secret message.";
    let aad = b"public header";

    let (ciphertext, tag) = encrypt(plaintext, aad, &key, &nonce)?;
    println!("  Plaintext: {:?}", String::from_utf8_lossy(plaintext));
    println!("  Ciphertext: {} bytes", ciphertext.len());
    println!("  Tag: {:02x?}", &tag[..8]);

    let decrypted = decrypt(&ciphertext, &tag, aad, &key, &nonce)?;
    println!("  Decrypted: {:?}", String::from_utf8_lossy(&decrypted));

    assert_eq!(decrypted, plaintext);
    println!("  Encryption/decryption successful");

    Ok(())
}

fn size_examples() -> Result<(), Error> {
    println!("\n2. Different Input Sizes:");

    let key = [0x03; 32];
    let nonce = [0x04; 16];

    // Empty message
    let (ct, tag) = encrypt(b"", b"just aad", &key, &nonce)?;
    let pt = decrypt(&ct, &tag, b"just aad", &key, &nonce)?;
    assert!(pt.is_empty());
    println!("  Empty message: ok");

    // Single byte
    let (ct, tag) = encrypt(b"A", b"", &key, &nonce)?;
    let pt = decrypt(&ct, &tag, b"", &key, &nonce)?;
    assert_eq!(pt, b"A");
    println!("  Single byte: ok");

    // Large message (batched path)
    let large_msg = vec![0x42u8; 1 << 20];
    let (ct, tag) = encrypt(&large_msg, b"large message", &key, &nonce)?;
    let pt = decrypt(&ct, &tag, b"large message", &key, &nonce)?;
    assert_eq!(pt, large_msg);
    println!("  1 MiB message: ok");

    Ok(())
}

fn buffer_example() -> Result<(), Error> {
    println!("\n3. Caller-Provided Buffers:");

    let key = [0x05; 32];
    let nonce = [0x06; 16];
    let plaintext = b"no allocations here";

    let mut ciphertext = [0u8; 19];
    let mut tag = [0u8; 16];
    encrypt_to(plaintext, b"", &key, &nonce, &mut ciphertext, &mut tag)?;

    let mut recovered = [0u8; 19];
    decrypt_to(&ciphertext, &tag, b"", &key, &nonce, &mut recovered)?;

    assert_eq!(&recovered, plaintext);
    println!("  In-place round trip: ok");

    Ok(())
}

fn error_handling_example() -> Result<(), Error> {
    println!("\n4. Error Handling:");

    let key = [0x07; 32];
    let nonce = [0x08; 16];
    let plaintext = b"secret data";
    let aad = b"header";

    let (ciphertext, mut tag) = encrypt(plaintext, aad, &key, &nonce)?;

    // Corrupted tag
    tag[0] ^= 1;
    match decrypt(&ciphertext, &tag, aad, &key, &nonce) {
        Err(Error::AuthenticationFailed) => println!("  Corrupted tag rejected"),
        other => println!("  Unexpected result: {other:?}"),
    }
    tag[0] ^= 1;

    // Wrong AAD
    match decrypt(&ciphertext, &tag, b"wrong header", &key, &nonce) {
        Err(Error::AuthenticationFailed) => println!("  Wrong AAD rejected"),
        other => println!("  Unexpected result: {other:?}"),
    }

    // Wrong key
    let wrong_key = [0x99; 32];
    match decrypt(&ciphertext, &tag, aad, &wrong_key, &nonce) {
        Err(Error::AuthenticationFailed) => println!("  Wrong key rejected"),
        other => println!("  Unexpected result: {other:?}"),
    }

    // Invalid parameter lengths are reported before any work happens.
    match encrypt(plaintext, aad, &key[..31], &nonce) {
        Err(Error::InvalidKeyLength) => println!("  Short key rejected"),
        other => println!("  Unexpected result: {other:?}"),
    }

    Ok(())
}
