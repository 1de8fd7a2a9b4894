use std::collections::BTreeMap;

use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

use crate::storage::keccak256_concat;
use crate::utils::{SimError, SimResult};

/// Labels with a fixed role in every scenario
pub const TOKEN: &str = "token";
pub const PAIR: &str = "pair";
pub const ROUTER: &str = "router";
pub const OWNER: &str = "owner";
pub const OPERATIONS: &str = "operations";
pub const TREASURY: &str = "treasury";
pub const IMPLEMENTATION: &str = "implementation";
pub const ZERO: &str = "zero";

/// Maps scenario labels to deterministic keys and addresses
///
/// Every label owns a wallet whose private key is `keccak256("actor:" ‖ label)`,
/// so scenarios can sign permits for any actor. `pair` is only known after
/// launch and `zero` is the zero address.
#[derive(Debug, Clone, Default)]
pub struct ActorBook {
    seen: BTreeMap<String, Address>,
    pair: Option<Address>,
}

impl ActorBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet(label: &str) -> SimResult<LocalWallet> {
        let key = keccak256_concat(&[b"actor:", label.as_bytes()]);
        LocalWallet::from_bytes(&key).map_err(|e| SimError::Wallet(format!("{}: {}", label, e)))
    }

    pub fn set_pair(&mut self, pair: Address) {
        self.pair = Some(pair);
        self.seen.insert(PAIR.to_string(), pair);
    }

    /// Address of `label`, recording it for the final report.
    pub fn resolve(&mut self, label: &str) -> SimResult<Address> {
        if let Some(address) = self.seen.get(label) {
            return Ok(*address);
        }
        let address = match label {
            ZERO => return Ok(Address::zero()),
            PAIR => self.pair.ok_or_else(|| SimError::UnknownActor(label.to_string()))?,
            _ if label.starts_with("0x") => label
                .parse()
                .map_err(|_| SimError::UnknownActor(label.to_string()))?,
            _ => Self::wallet(label)?.address(),
        };
        self.seen.insert(label.to_string(), address);
        Ok(address)
    }

    pub fn resolve_all(&mut self, labels: &[String]) -> SimResult<Vec<Address>> {
        labels.iter().map(|l| self.resolve(l)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Address)> {
        self.seen.iter()
    }
}
