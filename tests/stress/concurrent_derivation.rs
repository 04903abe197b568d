//! Concurrency test: independent derivations and agreements on many threads
//! must match the sequential results exactly.

use std::sync::Arc;
use std::thread;

use detkey::{DerivationInput, KdfConfig, KeyAgreement, KeyDeriver, SoftwareProvider};

fn deriver() -> KeyDeriver<Arc<SoftwareProvider>> {
    KeyDeriver::new(
        Arc::new(SoftwareProvider::new()),
        KdfConfig::default().with_iterations(200),
    )
}

#[test]
fn stress_16_threads_match_sequential() {
    let deriver = Arc::new(deriver());

    let expected: Vec<String> = (0..16)
        .map(|i| {
            let input = DerivationInput::new(&format!("passphrase-{i}"), &format!("salt-{i}"));
            deriver.derive(&input).unwrap().private_container().to_hex()
        })
        .collect();

    let mut handles = Vec::new();
    for i in 0..16 {
        let deriver = Arc::clone(&deriver);
        handles.push(thread::spawn(move || {
            let input = DerivationInput::new(&format!("passphrase-{i}"), &format!("salt-{i}"));
            deriver.derive(&input).unwrap().private_container().to_hex()
        }));
    }

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), expected[i], "thread {i} diverged");
    }
}

#[test]
fn stress_concurrent_pairwise_agreement() {
    let deriver = deriver();
    let pairs: Arc<Vec<_>> = Arc::new(
        (0..6)
            .map(|i| {
                deriver
                    .derive(&DerivationInput::new("shared passphrase", &format!("party-{i}")))
                    .unwrap()
            })
            .collect(),
    );

    let mut handles = Vec::new();
    for i in 0..pairs.len() {
        for j in 0..pairs.len() {
            if i == j {
                continue;
            }
            let pairs = Arc::clone(&pairs);
            handles.push(thread::spawn(move || {
                let agreement = KeyAgreement::new(SoftwareProvider);
                let ij = agreement
                    .agree(pairs[i].private_container(), pairs[j].public_container())
                    .unwrap();
                let ji = agreement
                    .agree(pairs[j].private_container(), pairs[i].public_container())
                    .unwrap();
                assert_eq!(ij, ji, "parties {i} and {j} disagree");
            }));
        }
    }

    for h in handles {
        h.join().unwrap();
    }
}
