//! Deterministic number generator.
//!
//! Numbers are derived from the digest of a seed string, so the same material
//! yields the same value on every platform for a given digest algorithm.

use crate::config::DigestKind;
use crate::error::{Error, Result};
use sha1::{Digest, Sha1};
use sha2::Sha256;

#[derive(Clone, Copy, Debug, Default)]
pub struct Dng {
    kind: DigestKind,
}

impl Dng {
    pub fn new(kind: DigestKind) -> Self {
        Self { kind }
    }

    /// Integer in `[min, max)`: `min + (H mod (max - min))`, where `H` is the
    /// digest of `material` read as a big-endian unsigned integer.
    ///
    /// The reduction is exact, so no rounding step is applied.
    pub fn derive(&self, min: u64, max: u64, material: &str) -> Result<u64> {
        if min >= max {
            return Err(Error::EmptyRange { min, max });
        }
        let digest = match self.kind {
            DigestKind::Sha1 => digest_of::<Sha1>(material),
            DigestKind::Sha256 => digest_of::<Sha256>(material),
        };
        Ok(min + reduce(&digest, max - min))
    }
}

fn digest_of<D: Digest>(material: &str) -> Vec<u8> {
    D::digest(material.as_bytes()).to_vec()
}

/// Big-endian byte string modulo `modulus`, one byte at a time
fn reduce(bytes: &[u8], modulus: u64) -> u64 {
    let m = modulus as u128;
    bytes
        .iter()
        .fold(0u128, |acc, &b| ((acc << 8) | b as u128) % m) as u64
}
