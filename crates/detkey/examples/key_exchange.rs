//! Key Exchange — derive two key pairs from passphrases and agree on a secret.
//!
//! Run with:
//!   cargo run --example key_exchange -p detkey

use detkey::{agree, derive_key_pair, PublicKeyContainer};

fn main() {
    // ── 1. Each side derives its key pair ───────────────────────────────────
    //
    // The same passphrase and salt always give the same key pair, so
    // nothing has to be stored between runs.
    let keys_a = derive_key_pair("a passphrase for A side", "some salt for A")
        .expect("derivation should succeed");
    let keys_b = derive_key_pair("a passphrase for B side", "some salt for B")
        .expect("derivation should succeed");

    println!("PKCS#8, A: {}", keys_a.private_container().to_hex());
    println!("SPKI, A:   {}", keys_a.public_container().to_hex());
    println!("PKCS#8, B: {}", keys_b.private_container().to_hex());
    println!("SPKI, B:   {}", keys_b.public_container().to_hex());
    println!();

    // ── 2. Exchange public keys as hex ──────────────────────────────────────
    let pub_a = PublicKeyContainer::from_hex(&keys_a.public_container().to_hex())
        .expect("valid hex");
    let pub_b = PublicKeyContainer::from_hex(&keys_b.public_container().to_hex())
        .expect("valid hex");

    // ── 3. Each side computes the shared secret ─────────────────────────────
    let secret_a = agree(keys_a.private_container(), &pub_b).expect("agreement should succeed");
    let secret_b = agree(keys_b.private_container(), &pub_a).expect("agreement should succeed");

    println!("Shared secret, A: {}", secret_a.to_hex());
    println!("Shared secret, B: {}", secret_b.to_hex());
    assert_eq!(secret_a, secret_b);
}
