//! Two-party exchange: derive both sides, swap public containers, and
//! check that both compute the same shared secret.

use serde::Serialize;

use crate::agreement::KeyAgreement;
use crate::derivation::{DerivationInput, KeyDeriver};
use crate::error::{DetKeyError, Result};
use crate::provider::CryptoProvider;

/// Passphrase and salt used by the demonstration's first party.
pub const DEMO_A: (&str, &str) = ("a passphrase for A side", "some salt for A");

/// Passphrase and salt used by the demonstration's second party.
pub const DEMO_B: (&str, &str) = ("a passphrase for B side", "some salt for B");

/// One side of an exchange.
#[derive(Debug, Clone)]
pub struct Party {
    pub name: String,
    pub input: DerivationInput,
}

impl Party {
    pub fn new(name: impl Into<String>, passphrase: &str, salt: &str) -> Self {
        Self {
            name: name.into(),
            input: DerivationInput::new(passphrase, salt),
        }
    }
}

/// Hex renderings of one party's key pair and computed secret.
#[derive(Clone, Serialize)]
pub struct PartyReport {
    pub name: String,
    pub pkcs8: String,
    pub spki: String,
    pub shared_secret: String,
}

impl std::fmt::Debug for PartyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartyReport")
            .field("name", &self.name)
            .field("spki", &self.spki)
            .finish_non_exhaustive()
    }
}

/// Outcome of a successful exchange. Contains private key material.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeReport {
    pub a: PartyReport,
    pub b: PartyReport,
}

impl ExchangeReport {
    /// The secret both parties agreed on.
    pub fn shared_secret(&self) -> &str {
        &self.a.shared_secret
    }
}

/// Run a full exchange between `a` and `b`.
///
/// Fails with [`DetKeyError::Derivation`] if the two sides ever compute
/// different secrets.
pub fn run_exchange<P>(deriver: &KeyDeriver<P>, a: &Party, b: &Party) -> Result<ExchangeReport>
where
    P: CryptoProvider + Clone,
{
    let keys_a = deriver.derive(&a.input)?;
    let keys_b = deriver.derive(&b.input)?;
    log::debug!("derived key pairs for '{}' and '{}'", a.name, b.name);

    let agreement = KeyAgreement::new(deriver.provider().clone());
    let secret_a = agreement.agree(keys_a.private_container(), keys_b.public_container())?;
    let secret_b = agreement.agree(keys_b.private_container(), keys_a.public_container())?;

    if secret_a != secret_b {
        return Err(DetKeyError::Derivation(format!(
            "'{}' and '{}' computed different shared secrets",
            a.name, b.name
        )));
    }

    Ok(ExchangeReport {
        a: PartyReport {
            name: a.name.clone(),
            pkcs8: keys_a.private_container().to_hex(),
            spki: keys_a.public_container().to_hex(),
            shared_secret: secret_a.to_hex(),
        },
        b: PartyReport {
            name: b.name.clone(),
            pkcs8: keys_b.private_container().to_hex(),
            spki: keys_b.public_container().to_hex(),
            shared_secret: secret_b.to_hex(),
        },
    })
}

/// The demonstration parties "A" and "B" with their fixed inputs.
pub fn demo_parties() -> (Party, Party) {
    (
        Party::new("A", DEMO_A.0, DEMO_A.1),
        Party::new("B", DEMO_B.0, DEMO_B.1),
    )
}
