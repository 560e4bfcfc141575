use allowlist::{hash_leaf, hash_pair};

/// Builds an allowlist commitment off chain, the way a deployer would
/// before instantiating a minter. Returns the hex encoded root and one
/// proof per member, index aligned with the input.
pub fn build_allowlist(members: &[&str]) -> (String, Vec<Vec<String>>) {
    let mut layers: Vec<Vec<[u8; 32]>> = vec![members.iter().map(|m| hash_leaf(m)).collect()];
    while layers.last().unwrap().len() > 1 {
        let next = layers
            .last()
            .unwrap()
            .chunks(2)
            .map(|pair| {
                if pair.len() == 2 {
                    hash_pair(&pair[0], &pair[1])
                } else {
                    // odd node is promoted as-is
                    pair[0]
                }
            })
            .collect();
        layers.push(next);
    }
    let root = hex::encode(layers.last().unwrap()[0]);

    let proofs = (0..members.len())
        .map(|member_index| {
            let mut proof = Vec::new();
            let mut index = member_index;
            for layer in &layers[..layers.len() - 1] {
                let sibling = if index % 2 == 0 { index + 1 } else { index - 1 };
                if sibling < layer.len() {
                    proof.push(hex::encode(layer[sibling]));
                }
                index /= 2;
            }
            proof
        })
        .collect();

    (root, proofs)
}
