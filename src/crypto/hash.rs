use sha3::{Digest, Keccak256};

/// Keccak256 digest of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest of `key || counter` (counter big-endian), used to derive keystream blocks.
pub fn keccak256_with_counter(key: &[u8], counter: u64) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(key);
    hasher.update(counter.to_be_bytes());
    hasher.finalize().into()
}

/// Digest of `key || data`.
pub fn keyed_keccak256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(key);
    hasher.update(data);
    hasher.finalize().into()
}

/// Short hex fingerprint of key material, safe to log.
pub fn fingerprint(key: &[u8]) -> String {
    hex::encode(&keccak256(key)[..4])
}
