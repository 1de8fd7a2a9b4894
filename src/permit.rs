//! EIP-2612 permit: approvals authorised by an EIP-712 signature

use ethers::types::{Address, Signature, H256, U256};
use once_cell::sync::Lazy;

use crate::storage::{address_word, keccak256_concat, u256_word};
use crate::utils::{Result, TokenError};

pub static DOMAIN_TYPEHASH: Lazy<H256> = Lazy::new(|| {
    H256::from(keccak256_concat(&[
        b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
    ]))
});

pub static PERMIT_TYPEHASH: Lazy<H256> = Lazy::new(|| {
    H256::from(keccak256_concat(&[
        b"Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)",
    ]))
});

/// secp256k1n / 2; signatures with a larger `s` are malleable
static MAX_S: Lazy<U256> = Lazy::new(|| {
    U256::from_str_radix("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0", 16)
        .unwrap_or_else(|_| U256::MAX)
});

/// The signed fields of a permit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub nonce: U256,
    pub deadline: U256,
}

pub fn domain_separator(name: &str, version: &str, chain_id: u64, verifying_contract: Address) -> H256 {
    let name_hash = keccak256_concat(&[name.as_bytes()]);
    let version_hash = keccak256_concat(&[version.as_bytes()]);
    H256::from(keccak256_concat(&[
        DOMAIN_TYPEHASH.as_bytes(),
        &name_hash,
        &version_hash,
        &u256_word(U256::from(chain_id)),
        &address_word(verifying_contract),
    ]))
}

impl PermitMessage {
    pub fn struct_hash(&self) -> H256 {
        H256::from(keccak256_concat(&[
            PERMIT_TYPEHASH.as_bytes(),
            &address_word(self.owner),
            &address_word(self.spender),
            &u256_word(self.value),
            &u256_word(self.nonce),
            &u256_word(self.deadline),
        ]))
    }

    /// `keccak256("\x19\x01" ‖ domainSeparator ‖ structHash)`
    pub fn digest(&self, domain_separator: H256) -> H256 {
        H256::from(keccak256_concat(&[
            b"\x19\x01",
            domain_separator.as_bytes(),
            self.struct_hash().as_bytes(),
        ]))
    }
}

/// Recover the signer of an EIP-712 digest, rejecting high-s signatures.
pub fn recover_signer(digest: H256, signature: &Signature) -> Result<Address> {
    if signature.s > *MAX_S {
        return Err(TokenError::InvalidSignature("s value in upper half order".to_string()));
    }
    signature
        .recover(digest)
        .map_err(|e| TokenError::InvalidSignature(e.to_string()))
}
