//! Tree property tests
//!
//! End-to-end checks of the public API: known root digests, proof
//! round-trips, tamper sensitivity and history independence.

use canopy::{digest_entry, digest_pair, Digest, Entry, MerkleTree, TreeConfig};

fn entry(i: usize) -> Entry {
    Entry::labeled(format!("key{i}"), format!("Node{i}"))
}

fn d(i: usize) -> Digest {
    digest_entry(&entry(i)).unwrap()
}

fn build(entries: impl IntoIterator<Item = Entry>) -> MerkleTree {
    MerkleTree::from_entries(TreeConfig::default(), entries).unwrap()
}

// ============================================================================
// Known Roots
// ============================================================================

#[test]
fn test_five_entry_scenario() {
    let mut tree = MerkleTree::new();
    let roots: Vec<Digest> = (1..=5).map(|i| tree.insert(entry(i)).unwrap()).collect();
    let root = roots[4];

    let expected = digest_pair(
        &digest_pair(&digest_pair(&d(1), &d(2)), &digest_pair(&d(3), &d(4))),
        &d(5),
    );
    assert_eq!(root, expected);
    assert_eq!(tree.root_hash(), expected);
}

#[test]
fn test_eight_entries_is_perfect_tree() {
    let tree = build((1..=8).map(entry));
    let level1: Vec<Digest> = (0..4).map(|i| digest_pair(&d(2 * i + 1), &d(2 * i + 2))).collect();
    let level2 = [
        digest_pair(&level1[0], &level1[1]),
        digest_pair(&level1[2], &level1[3]),
    ];
    assert_eq!(tree.root_hash(), digest_pair(&level2[0], &level2[1]));
    assert_eq!(tree.depth(), 4);
}

#[test]
fn test_canonical_encoding_vector() {
    // key = SHA-256("key1"), value = "Node1"
    let mut encoded = Digest::of(b"key1").as_bytes().to_vec();
    encoded.extend_from_slice(&5u64.to_be_bytes());
    encoded.extend_from_slice(b"Node1");
    assert_eq!(d(1), Digest::of(&encoded));
}

// ============================================================================
// Proofs
// ============================================================================

#[test]
fn test_every_leaf_verifies() {
    for n in [1, 2, 3, 4, 5, 8, 13, 16, 33] {
        let tree = build((1..=n).map(entry));
        for i in 1..=n {
            let path = tree.generate_merkle_path(&entry(i)).unwrap();
            assert!(tree.verify_merkle_path(&entry(i), path.position, &path.siblings));
        }
    }
}

#[test]
fn test_every_leaf_verifies_after_deletes() {
    let mut tree = build((1..=20).map(entry));
    for victim in [1, 7, 20, 10, 2] {
        tree.delete(&entry(victim)).unwrap();
        for e in tree.entries().cloned().collect::<Vec<_>>() {
            let path = tree.generate_merkle_path(&e).unwrap();
            assert!(tree.verify_merkle_path(&e, path.position, &path.siblings));
        }
    }
}

#[test]
fn test_last_sibling_is_root_child() {
    let tree = build((1..=6).map(entry));
    let path = tree.generate_merkle_path(&entry(2)).unwrap();

    let left = digest_pair(&digest_pair(&d(1), &d(2)), &digest_pair(&d(3), &d(4)));
    let right = digest_pair(&d(5), &d(6));
    assert_eq!(path.siblings.first(), Some(&d(1)));
    assert_eq!(path.siblings.last(), Some(&right));
    assert_eq!(tree.root_hash(), digest_pair(&left, &right));
}

// ============================================================================
// Tamper Sensitivity
// ============================================================================

#[test]
fn test_single_byte_flip_changes_root() {
    let entries: Vec<Entry> = (1..=7).map(entry).collect();
    let original = build(entries.clone()).root_hash();

    for target in 0..entries.len() {
        for byte in 0..entries[target].value.len() {
            let mut tampered = entries.clone();
            tampered[target].value[byte] ^= 0x01;
            assert_ne!(
                build(tampered).root_hash(),
                original,
                "entry {target} byte {byte}"
            );
        }
    }
}

#[test]
fn test_order_matters() {
    let forward = build((1..=4).map(entry));
    let reversed = build((1..=4).rev().map(entry));
    assert_ne!(forward.root_hash(), reversed.root_hash());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_sequence_same_tree() {
    let a = build((1..=11).map(entry));
    let b = build((1..=11).map(entry));
    assert_eq!(a.root_hash(), b.root_hash());
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_history_independence() {
    let mut churned = build((1..=9).map(entry));
    for i in [4, 9, 1] {
        churned.delete(&entry(i)).unwrap();
    }
    for i in [4, 9, 1] {
        churned.insert(entry(i)).unwrap();
    }

    let direct = build([2, 3, 5, 6, 7, 8, 4, 9, 1].into_iter().map(entry));
    assert_eq!(churned.root_hash(), direct.root_hash());
    assert_eq!(churned.to_string(), direct.to_string());
}

#[test]
fn test_delete_leaves_survivor_root() {
    let mut tree = build((1..=2).map(entry));
    let root = tree.delete(&entry(2)).unwrap();
    assert_eq!(root, d(1));
    assert_eq!(tree.depth(), 1);

    let root = tree.delete(&entry(1)).unwrap();
    assert_eq!(root, Digest::ZERO);
    assert_eq!(tree.depth(), 0);
    assert!(tree.is_empty());
}
