//! Merkle membership checks for allowlisted mint phases.
//!
//! The full allowlist is never stored on chain; a contract commits to a
//! single 32 byte root and callers present an ordered proof path. Pair
//! hashing is commutative (inputs are sorted before hashing), so a proof
//! carries no left/right position bits.

use sha2::{Digest, Sha256};

const DIGEST_LEN: usize = 32;

/// Verifies that `address` is a member of the set committed to by `root`.
///
/// `root` and every proof node are hex encoded SHA-256 digests. Returns
/// `false` on any mismatch, including malformed hex, wrong digest length
/// and an empty or all-zero root. An unset root therefore rejects every
/// proof. Pure: same inputs always produce the same answer.
pub fn verify_proof(proof: &[String], address: &str, root: &str) -> bool {
    let root_bytes = match decode_digest(root) {
        Some(bytes) => bytes,
        None => return false,
    };
    if root_bytes == [0u8; DIGEST_LEN] {
        return false;
    }

    let mut accumulator = hash_leaf(address);
    for node in proof {
        let node_bytes = match decode_digest(node) {
            Some(bytes) => bytes,
            None => return false,
        };
        accumulator = hash_pair(&accumulator, &node_bytes);
    }
    accumulator == root_bytes
}

/// Leaf digest of a candidate address.
pub fn hash_leaf(address: &str) -> [u8; DIGEST_LEN] {
    Sha256::digest(address.as_bytes()).into()
}

/// Parent digest of two nodes, ordering the pair before hashing.
pub fn hash_pair(left: &[u8; DIGEST_LEN], right: &[u8; DIGEST_LEN]) -> [u8; DIGEST_LEN] {
    let (low, high) = if left <= right {
        (left, right)
    } else {
        (right, left)
    };
    let mut hasher = Sha256::new();
    hasher.update(low);
    hasher.update(high);
    hasher.finalize().into()
}

fn decode_digest(encoded: &str) -> Option<[u8; DIGEST_LEN]> {
    let bytes = hex::decode(encoded).ok()?;
    bytes.try_into().ok()
}
