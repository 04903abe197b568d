//! Stress test: varying the passphrase or the salt never produces a
//! colliding private container or shared secret.

use std::collections::HashSet;

use detkey::{agree, DerivationInput, KdfConfig, KeyDeriver, SoftwareProvider};

fn fast_deriver() -> KeyDeriver {
    KeyDeriver::new(SoftwareProvider, KdfConfig::default().with_iterations(16))
}

#[test]
fn stress_no_collisions_across_passphrases_and_salts() {
    let deriver = fast_deriver();
    let mut seen = HashSet::new();

    for p in 0..20 {
        for s in 0..20 {
            let input = DerivationInput::new(&format!("passphrase {p}"), &format!("salt {s}"));
            let pair = deriver.derive(&input).unwrap();
            assert!(
                seen.insert(pair.private_container().to_hex()),
                "collision at passphrase {p}, salt {s}"
            );
        }
    }

    assert_eq!(seen.len(), 400);
}

#[test]
fn stress_swapped_passphrase_and_salt_differ() {
    let deriver = fast_deriver();
    let a = deriver.derive(&DerivationInput::new("alpha", "beta")).unwrap();
    let b = deriver.derive(&DerivationInput::new("beta", "alpha")).unwrap();
    assert_ne!(a.private_container(), b.private_container());
}

#[test]
fn stress_single_bit_changes_in_salt() {
    let deriver = fast_deriver();
    let base = deriver.derive(&DerivationInput::new("pw", "salt")).unwrap();
    for variant in ["Salt", "salu", "salt ", "sal", "salt\0"] {
        let other = deriver.derive(&DerivationInput::new("pw", variant)).unwrap();
        assert_ne!(
            base.private_container(),
            other.private_container(),
            "salt {variant:?} collided"
        );
    }
}

#[test]
fn stress_secrets_unique_per_peer() {
    let deriver = fast_deriver();
    let ours = deriver.derive(&DerivationInput::new("ours", "ours")).unwrap();
    let mut secrets = HashSet::new();

    for i in 0..50 {
        let peer = deriver
            .derive(&DerivationInput::new("peer", &format!("peer-{i}")))
            .unwrap();
        let secret = agree(ours.private_container(), peer.public_container()).unwrap();
        assert!(secrets.insert(secret.to_hex()), "secret collision with peer {i}");
    }
}
