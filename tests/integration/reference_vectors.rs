//! Reference root vectors
//!
//! Roots published for the reference tree builder, checked against trees
//! built in one shot and trees grown one leaf at a time.

use merkle::{HashAlgorithm, LeafValue, MerkleTree};
use serde_json::json;

fn mixed_values() -> Vec<LeafValue> {
    vec![
        "Test string".into(),
        "More".into(),
        "Stuff".into(),
        44.into(),
        55.into(),
        66.into(),
        77.into(),
    ]
}

fn mixed_values_with_record() -> Vec<LeafValue> {
    let mut values = mixed_values();
    values.push(true.into());
    values.push(false.into());
    values.push(json!({"test": "this"}).into());
    values
}

fn assert_root(values: Vec<LeafValue>, algorithm: HashAlgorithm, expected: &str) {
    let tree = MerkleTree::with_algorithm(values.clone(), algorithm).unwrap();
    assert_eq!(tree.root(), expected, "one-shot root for {:?}", values);

    let mut grown = MerkleTree::with_algorithm(values[..1].to_vec(), algorithm).unwrap();
    grown.add_nodes(values[1..].to_vec());
    assert_eq!(grown.root(), expected, "incremental root for {:?}", values);
}

#[test]
fn test_sha256_integer_prefixes() {
    let expected = [
        "6b86b273ff34fce19d6b804eff5a3f5747ada4eaa22f1d49c01e52ddb7875b4b",
        "33b675636da5dcc86ec847b38c08fa49ff1cace9749931e0a5d4dfdbdedd808a",
        "f3f1917304e3af565b827d1baa9fac18d5b287ae97adda22dc51a0aef900b787",
        "85df8945419d2b5038f7ac83ec1ec6b8267c40fdb3b1e56ff62f6676eb855e70",
        "c19ce1b23fc9057eb072011d793ce33a47bb6fc3fe4cf9bf5d8f737abd3be0cb",
        "058bd72c469db066d7b28c9e63e1b7b05c48df9ca23dd521afd0b6154ea47be6",
        "99b80facafca5b81e018de3ea24c2bc6eec81ff21fbf358b512f3df8b862199b",
        "c27450cd3fd4df029145f3437ae9c381e0ae55e8400de06cb973005b36d7b222",
        "e6f639f0b32f5602f36bdeb8540b5bdc4e922f55d079cdc6d81b20601f5a7d87",
    ];
    for (n, root) in expected.iter().enumerate() {
        let values: Vec<LeafValue> = (1..=n as i64 + 1).map(LeafValue::from).collect();
        assert_root(values, HashAlgorithm::Sha256, root);
    }
}

#[test]
fn test_sha256_text_and_mixed_values() {
    assert_root(
        vec!["Test string".into()],
        HashAlgorithm::Sha256,
        "a3e49d843df13c2e2a7786f6ecd7e0d184f45d718d1ac1a8a63e570466e489dd",
    );
    assert_root(
        vec!["Test string".into(), "More".into()],
        HashAlgorithm::Sha256,
        "a84e8547891590b0b7a2ec14f27f584859f96054255b1ecc134143ab8dec7c2f",
    );
    assert_root(
        vec!["Test string".into(), "More".into(), "Stuff".into()],
        HashAlgorithm::Sha256,
        "dc4aab0853b6ad15862daf14e3f95708dc06e22d39dc341be2a5b65c856e0aa4",
    );
    assert_root(
        mixed_values(),
        HashAlgorithm::Sha256,
        "d8fac01434262e90bcd620818e14574dc558e5073655bb722e41ccc88f4c1b88",
    );
    assert_root(
        mixed_values_with_record(),
        HashAlgorithm::Sha256,
        "6dbd40775d68d665019668a59072c5a283847797778cc518ef97b18bbad09919",
    );
}

#[test]
fn test_sha256_single_letters() {
    let a = MerkleTree::new(["A"]).unwrap();
    let b = MerkleTree::new(["B"]).unwrap();
    let ab = MerkleTree::new(["A", "B"]).unwrap();

    assert_eq!(a.root(), "559aead08264d5795d3909718cdd05abd49572e84fe55590eef31a88a08fdffd");
    assert_eq!(b.root(), "df7e70e5021544f4834bbee64a9e3789febc4be81470df629cad6ddb03320a5c");
    assert_eq!(ab.root(), "b30ab174f7459cdd40a3acdf15d0c9444fec2adcfb9d579aa154c084885edd0a");
    assert_eq!(ab.create_hash(&format!("{}{}", a.root(), b.root()).into()), ab.root());
}

#[test]
fn test_sha256_large_range() {
    let tree = MerkleTree::new(0..9999i64).unwrap();
    assert_eq!(tree.root(), "8e5de0cb76eb9b7b420574765e9174d4fc209af474448edb733bb6cc8fc1096e");
}

#[test]
fn test_sha256_append_after_mixed_build() {
    let mut tree = MerkleTree::new(vec![
        LeafValue::from("Test string"),
        0.into(),
        1.into(),
        2.into(),
        3.into(),
        4.into(),
        5.into(),
        true.into(),
        false.into(),
        json!({"t": "t"}).into(),
    ])
    .unwrap();
    assert_eq!(tree.root(), "0543d7c3eb93d174907216eda38ca06c71f4435f2533e3384fb2078b991bc27a");

    let root = tree.add_nodes(vec![
        LeafValue::from("More"),
        "Stuff".into(),
        0.into(),
        10.into(),
        20.into(),
        30.into(),
        40.into(),
        50.into(),
        true.into(),
        false.into(),
        json!({"ta": "ta", "tb": "tb"}).into(),
    ]);
    assert_eq!(root, "0aee812417d66476a329b2f92da831672b2cbed63bc3c7a761c081a6ddd71990");
}

#[test]
fn test_md5_vectors() {
    let ints = |n: i64| (1..=n).map(LeafValue::from).collect::<Vec<_>>();

    assert_root(ints(1), HashAlgorithm::Md5, "c4ca4238a0b923820dcc509a6f75849b");
    assert_root(ints(2), HashAlgorithm::Md5, "302cbafc0dfbc97f30d576a6f394dad3");
    assert_root(ints(3), HashAlgorithm::Md5, "d37a60fb7556c542502509dfe4d93928");
    assert_root(ints(7), HashAlgorithm::Md5, "662d7787d650efad62a6eac2d9ce6dba");
    assert_root(
        vec!["Test string".into()],
        HashAlgorithm::Md5,
        "0fd3dbec9730101bff92acc820befc34",
    );
    assert_root(
        vec!["Test string".into(), "More".into()],
        HashAlgorithm::Md5,
        "e1bfa1951ca12b49e60324127951373a",
    );
    assert_root(
        vec!["Test string".into(), "More".into(), "stuff".into()],
        HashAlgorithm::Md5,
        "8b8a56cc2e0c741c07712a76c7ccc553",
    );
    assert_root(
        vec![
            "Test string".into(),
            "More".into(),
            "stuff".into(),
            44.into(),
            55.into(),
            66.into(),
            77.into(),
        ],
        HashAlgorithm::Md5,
        "12a8ba3a5818a326661865d327edbb10",
    );
    assert_root(
        mixed_values_with_record(),
        HashAlgorithm::Md5,
        "a2cb7e58da10549ba35bbcecd7fe75f5",
    );

    let tree = MerkleTree::with_algorithm(0..9999i64, HashAlgorithm::Md5).unwrap();
    assert_eq!(tree.root(), "744556995f960fddfe4303ab4175c601");
}

#[test]
fn test_odd_tail_matches_repeated_tail() {
    let five = MerkleTree::new([1, 2, 3, 4, 5]).unwrap();
    let padded = MerkleTree::new([1, 2, 3, 4, 5, 5, 5, 5]).unwrap();
    assert_eq!(five.root(), padded.root());
}
