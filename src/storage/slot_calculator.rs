//! Solidity storage slot derivation
//!
//! A mapping entry lives at `keccak256(abi.encode(key, base_slot))`; nested
//! mappings hash again with the outer slot as the base.

use ethers::types::{Address, U256};
use sha3::{Digest, Keccak256};

/// Hash the concatenation of all chunks without copying them into one
/// buffer; slots, role ids, the permit digest and actor keys all go through it.
pub fn keccak256_concat(data: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for chunk in data {
        hasher.update(chunk);
    }
    hasher.finalize().into()
}

/// ABI word of an address: 12 zero bytes then the 20 address bytes.
pub fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// ABI word of an unsigned integer, big-endian.
pub fn u256_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Slot of `mapping(address => _)[key]` declared at `base_slot`.
pub fn mapping_slot(key: Address, base_slot: U256) -> U256 {
    let hash = keccak256_concat(&[&address_word(key), &u256_word(base_slot)]);
    U256::from_big_endian(&hash)
}

/// Slot of `mapping(address => mapping(address => _))[outer][inner]`.
pub fn nested_mapping_slot(outer: Address, inner: Address, base_slot: U256) -> U256 {
    let outer_slot = mapping_slot(outer, base_slot);
    let hash = keccak256_concat(&[&address_word(inner), &u256_word(outer_slot)]);
    U256::from_big_endian(&hash)
}
