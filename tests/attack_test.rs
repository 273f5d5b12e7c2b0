//! End-to-end attacks through the public API.

use std::io::Write;
use std::sync::Arc;

use tempfile::{tempdir, NamedTempFile};

use hash_cracker::{
    AttackResult, CharSet, Coordinator, HashAlgorithm, Keyspace, TargetHash, Verifier,
};

const MD5_HELLO: &str = "5d41402abc4b2a76b9719d911017c592";

/// Writes a wordlist to a temp file that is removed when dropped.
fn write_wordlist(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = HashAlgorithm::Sha256.hasher().unwrap();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

#[test]
fn test_dictionary_attack_finds_md5() {
    let wordlist = write_wordlist("password\n123456\nqwerty\nhello\nletmein\n");
    let target = TargetHash::new(HashAlgorithm::Md5, MD5_HELLO).unwrap();
    let coordinator = Coordinator::new(target, 4).with_batch_size(2);

    let result = coordinator.dictionary_attack(wordlist.path(), false).unwrap();

    assert_eq!(result, AttackResult::Found("hello".into()));
}

#[test]
fn test_mutations_do_not_compose() {
    let wordlist = write_wordlist("admin\nsummer\n");
    let target = TargetHash::new(HashAlgorithm::Sha256, sha256_hex("Summer07")).unwrap();
    let coordinator = Coordinator::new(target, 2);

    let plain = coordinator.dictionary_attack(wordlist.path(), false).unwrap();
    // suffixes are only appended to the word as written, never to its case variants
    let mutated = coordinator.dictionary_attack(wordlist.path(), true).unwrap();

    assert_eq!(plain, AttackResult::NotFound);
    assert_eq!(mutated, AttackResult::NotFound);
}

#[test]
fn test_dictionary_attack_finds_mutated_word() {
    let wordlist = write_wordlist("admin\nsummer\n");
    let target = TargetHash::new(HashAlgorithm::Sha256, sha256_hex("summer07")).unwrap();
    let coordinator = Coordinator::new(target, 2);

    let plain = coordinator.dictionary_attack(wordlist.path(), false).unwrap();
    let mutated = coordinator.dictionary_attack(wordlist.path(), true).unwrap();

    assert_eq!(plain, AttackResult::NotFound);
    assert_eq!(mutated, AttackResult::Found("summer07".into()));
}

#[test]
fn test_dictionary_attack_bcrypt() {
    let hash = bcrypt::hash("letmein", 4).unwrap();
    let wordlist = write_wordlist("password\nletmein\nhello\n");
    let target = TargetHash::new(HashAlgorithm::Bcrypt, hash).unwrap();
    let coordinator = Coordinator::new(target, 2).with_batch_size(1);

    let result = coordinator.dictionary_attack(wordlist.path(), false).unwrap();

    assert_eq!(result, AttackResult::Found("letmein".into()));
}

#[test]
fn test_brute_force_attack_finds_sha256() {
    let target = TargetHash::new(HashAlgorithm::Sha256, sha256_hex("abc123")).unwrap();
    let keyspace = Arc::new(Keyspace::new(CharSet::new("abc123").unwrap()));
    let coordinator = Coordinator::new(target, 4);

    let result = coordinator.brute_force_attack(keyspace, 6).unwrap();
    assert_eq!(result, AttackResult::Found("abc123".into()));
}

#[test]
fn test_exhausted_search_is_not_found() {
    let wordlist = write_wordlist("alpha\nbeta\ngamma\n");
    let target = TargetHash::new(HashAlgorithm::Md5, MD5_HELLO).unwrap();
    let coordinator = Coordinator::new(target.clone(), 3);

    let dict = coordinator.dictionary_attack(wordlist.path(), true).unwrap();

    let keyspace = Arc::new(Keyspace::new(CharSet::new("xyz").unwrap()));
    let brute = Coordinator::new(target, 3)
        .brute_force_attack(keyspace, 4)
        .unwrap();

    assert_eq!(dict, AttackResult::NotFound);
    assert_eq!(brute, AttackResult::NotFound);
}

#[test]
fn test_missing_wordlist_file_is_error() {
    let target = TargetHash::new(HashAlgorithm::Md5, MD5_HELLO).unwrap();
    let coordinator = Coordinator::new(target, 1);
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    assert!(coordinator.dictionary_attack(&missing, false).is_err());
}

#[test]
fn test_repeated_searches_agree() {
    let target = TargetHash::new(HashAlgorithm::Sha256, sha256_hex("c2b")).unwrap();
    let keyspace = Arc::new(Keyspace::new(CharSet::new("abc123").unwrap()));

    let first = Coordinator::new(target.clone(), 3)
        .brute_force_attack(keyspace.clone(), 4)
        .unwrap();
    let second = Coordinator::new(target, 3)
        .brute_force_attack(keyspace, 4)
        .unwrap();

    assert_eq!(first, AttackResult::Found("c2b".into()));
    assert_eq!(first, second);
}

#[test]
fn test_verifier_is_pluggable() {
    struct Prefix;

    impl Verifier for Prefix {
        fn verify(&self, candidate: &str) -> bool {
            candidate.starts_with("zz")
        }
    }

    let keyspace = Arc::new(Keyspace::new(CharSet::new("az").unwrap()));
    let result = Coordinator::new(Prefix, 2)
        .brute_force_attack(keyspace, 3)
        .unwrap();

    // only "zz" at length 2 matches before length 3 starts
    assert_eq!(result, AttackResult::Found("zz".into()));
}
