//! Supported digest algorithms and the incremental digester behind them

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::str::FromStr;

/// One-way hash algorithm used to produce tree digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha1,
    Sha224,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Md5,
    Blake3,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 13] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Md5,
        HashAlgorithm::Blake3,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha512_224 => "sha512-224",
            HashAlgorithm::Sha512_256 => "sha512-256",
            HashAlgorithm::Sha3_224 => "sha3-224",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Length of the hex digest in characters
    pub fn digest_len(self) -> usize {
        let bytes = match self {
            HashAlgorithm::Md5 => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha512_224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256
            | HashAlgorithm::Sha512_256
            | HashAlgorithm::Sha3_256
            | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 64,
        };
        bytes * 2
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    /// Accepts the canonical names plus the OpenSSL-style aliases
    /// (`RSA-SHA256`, `sha256WithRSAEncryption`, `RSA-SHA512/256`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("rsa-").unwrap_or(&lowered);
        let name = name.strip_suffix("withrsaencryption").unwrap_or(name);
        let name = name.replace('/', "-");

        HashAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| HashError::UnsupportedAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HashAlgorithm> for String {
    fn from(value: HashAlgorithm) -> Self {
        value.name().to_string()
    }
}

/// Incremental digest state for one algorithm
pub(crate) enum Digester {
    Sha1(sha1::Sha1),
    Sha224(sha2::Sha224),
    Sha256(sha2::Sha256),
    Sha384(sha2::Sha384),
    Sha512(sha2::Sha512),
    Sha512_224(sha2::Sha512_224),
    Sha512_256(sha2::Sha512_256),
    Sha3_224(sha3::Sha3_224),
    Sha3_256(sha3::Sha3_256),
    Sha3_384(sha3::Sha3_384),
    Sha3_512(sha3::Sha3_512),
    Md5(md5::Md5),
    Blake3(Box<blake3::Hasher>),
}

impl Digester {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha1 => Digester::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha224 => Digester::Sha224(sha2::Sha224::new()),
            HashAlgorithm::Sha256 => Digester::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Sha384 => Digester::Sha384(sha2::Sha384::new()),
            HashAlgorithm::Sha512 => Digester::Sha512(sha2::Sha512::new()),
            HashAlgorithm::Sha512_224 => Digester::Sha512_224(sha2::Sha512_224::new()),
            HashAlgorithm::Sha512_256 => Digester::Sha512_256(sha2::Sha512_256::new()),
            HashAlgorithm::Sha3_224 => Digester::Sha3_224(sha3::Sha3_224::new()),
            HashAlgorithm::Sha3_256 => Digester::Sha3_256(sha3::Sha3_256::new()),
            HashAlgorithm::Sha3_384 => Digester::Sha3_384(sha3::Sha3_384::new()),
            HashAlgorithm::Sha3_512 => Digester::Sha3_512(sha3::Sha3_512::new()),
            HashAlgorithm::Md5 => Digester::Md5(md5::Md5::new()),
            HashAlgorithm::Blake3 => Digester::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    pub(crate) fn update(&mut self, bytes: &[u8]) {
        match self {
            Digester::Sha1(h) => h.update(bytes),
            Digester::Sha224(h) => h.update(bytes),
            Digester::Sha256(h) => h.update(bytes),
            Digester::Sha384(h) => h.update(bytes),
            Digester::Sha512(h) => h.update(bytes),
            Digester::Sha512_224(h) => h.update(bytes),
            Digester::Sha512_256(h) => h.update(bytes),
            Digester::Sha3_224(h) => h.update(bytes),
            Digester::Sha3_256(h) => h.update(bytes),
            Digester::Sha3_384(h) => h.update(bytes),
            Digester::Sha3_512(h) => h.update(bytes),
            Digester::Md5(h) => h.update(bytes),
            Digester::Blake3(h) => {
                h.update(bytes);
            }
        }
    }

    pub(crate) fn finalize_hex(self) -> String {
        match self {
            Digester::Sha1(h) => hex::encode(h.finalize()),
            Digester::Sha224(h) => hex::encode(h.finalize()),
            Digester::Sha256(h) => hex::encode(h.finalize()),
            Digester::Sha384(h) => hex::encode(h.finalize()),
            Digester::Sha512(h) => hex::encode(h.finalize()),
            Digester::Sha512_224(h) => hex::encode(h.finalize()),
            Digester::Sha512_256(h) => hex::encode(h.finalize()),
            Digester::Sha3_224(h) => hex::encode(h.finalize()),
            Digester::Sha3_256(h) => hex::encode(h.finalize()),
            Digester::Sha3_384(h) => hex::encode(h.finalize()),
            Digester::Sha3_512(h) => hex::encode(h.finalize()),
            Digester::Md5(h) => hex::encode(h.finalize()),
            Digester::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}
