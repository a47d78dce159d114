//! Hash computation for leaf values, digest pairs and file content
//!
//! Every value is canonicalized to a string before hashing; the digest is the
//! lowercase hex encoding of the selected algorithm's output.

pub mod algorithm;
pub mod cache;

pub use algorithm::HashAlgorithm;
pub use cache::HashCache;

use crate::error::StorageError;
use crate::types::{Digest, LeafValue};
use algorithm::Digester;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{instrument, trace};

/// Read buffer size used when streaming file content into a digest
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Canonical string form of a leaf value
///
/// Text is used verbatim, numbers and booleans use their literal form and
/// records are serialized as compact JSON with sorted keys. Floats print in
/// shortest round-trip form, switching to exponent notation below `1e-6` and
/// from `1e21` upward (`1e+21`, `1.5e-7`).
pub fn canonicalize(value: &LeafValue) -> String {
    match value {
        LeafValue::Text(text) => text.clone(),
        LeafValue::Integer(number) => number.to_string(),
        LeafValue::Float(number) => canonical_float(*number),
        LeafValue::Bool(flag) => flag.to_string(),
        LeafValue::Record(record) => {
            let mut out = String::new();
            write_record(record, &mut out);
            out
        }
    }
}

fn canonical_float(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_string();
    }
    if number.is_infinite() {
        let sign = if number > 0.0 { "" } else { "-" };
        return format!("{}Infinity", sign);
    }
    // -0 prints as 0
    if number == 0.0 {
        return "0".to_string();
    }

    let sign = if number < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3"
    let scientific = format!("{:e}", number.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return number.to_string(),
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return number.to_string(),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let count = digits.len() as i32;
    // decimal point sits after `point` digits
    let point = exponent + 1;

    let body = if count <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - count) as usize))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        let exponent_sign = if point - 1 < 0 { "-" } else { "+" };
        format!("{}{}e{}{}", lead, fraction, exponent_sign, (point - 1).abs())
    };
    format!("{}{}", sign, body)
}

/// Compact JSON with numbers printed like scalar floats, so `{"a":1.0}`
/// canonicalizes to `{"a":1}`
fn write_record(value: &serde_json::Value, out: &mut String) {
    use serde_json::Value;
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float) if !number.is_i64() && !number.is_u64() => {
                out.push_str(&canonical_float(float))
            }
            _ => out.push_str(&number.to_string()),
        },
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_record(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();
            out.push('{');
            for (index, key) in keys.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_record(&fields[key.as_str()], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Digest of an already-canonical string
pub fn digest_str(input: &str, algorithm: HashAlgorithm) -> Digest {
    let mut digester = Digester::new(algorithm);
    digester.update(input.as_bytes());
    digester.finalize_hex()
}

/// Digest of a leaf value under `algorithm`
pub fn create_hash(value: &LeafValue, algorithm: HashAlgorithm) -> Digest {
    digest_str(&canonicalize(value), algorithm)
}

/// Stream any async reader through the digest without buffering it whole
pub async fn hash_reader<R>(mut reader: R, algorithm: HashAlgorithm) -> std::io::Result<Digest>
where
    R: AsyncRead + Unpin,
{
    let mut digester = Digester::new(algorithm);
    let mut buffer = vec![0u8; STREAM_CHUNK_SIZE];
    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        digester.update(&buffer[..read]);
    }
    Ok(digester.finalize_hex())
}

/// Digest of a file's raw bytes, read incrementally
#[instrument(skip_all, fields(path = %path.display(), %algorithm))]
pub async fn create_hash_from_file(
    path: &Path,
    algorithm: HashAlgorithm,
) -> Result<Digest, StorageError> {
    let file_read_error = |source| StorageError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let file = tokio::fs::File::open(path).await.map_err(file_read_error)?;
    let digest = hash_reader(file, algorithm).await.map_err(file_read_error)?;
    trace!(%digest, "Hashed file content");
    Ok(digest)
}

/// Algorithm plus optional cache, shared by trees, chains and the directory hasher
#[derive(Debug, Clone, Default)]
pub struct HashEngine {
    algorithm: HashAlgorithm,
    cache: Option<Arc<HashCache>>,
}

impl HashEngine {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            cache: None,
        }
    }

    /// Serve repeated inputs from `cache`
    pub fn with_cache(mut self, cache: Arc<HashCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn cache(&self) -> Option<&Arc<HashCache>> {
        self.cache.as_ref()
    }

    pub fn hash_value(&self, value: &LeafValue) -> Digest {
        self.hash_str(&canonicalize(value))
    }

    pub fn hash_str(&self, input: &str) -> Digest {
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(self.algorithm, input, || {
                digest_str(input, self.algorithm)
            }),
            None => digest_str(input, self.algorithm),
        }
    }

    /// Parent digest of two children: `hash(left + right)`
    pub fn hash_pair(&self, left: &str, right: &str) -> Digest {
        let mut combined = String::with_capacity(left.len() + right.len());
        combined.push_str(left);
        combined.push_str(right);
        self.hash_str(&combined)
    }
}
