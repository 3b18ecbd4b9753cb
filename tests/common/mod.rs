//! Common test helpers.
#![allow(dead_code)]

use jose_jwe::JsonWebKey;
use rand_core::{impls, CryptoRng, OsRng, RngCore};
use serde::Deserialize;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn read_vector_file(path: &str) -> TestResult<String> {
    Ok(std::fs::read_to_string(format!(
        "{}/tests/vectors/{path}",
        env!("CARGO_MANIFEST_DIR"),
    ))?)
}

/// Reads a key file from the `tests/vectors/jwk` directory.
pub fn read_jwk(name: &str) -> TestResult<JsonWebKey> {
    let json = read_vector_file(&format!("jwk/{name}.json"))?;
    Ok(json.parse()?)
}

/// A token produced by another JOSE implementation.
#[derive(Debug, Deserialize)]
pub struct InteropVector {
    pub alg: String,
    pub enc: String,
    pub key: String,
    pub plaintext: String,
    pub token: String,
}

/// Reads `tests/vectors/jwe/interop.json`.
pub fn read_vectors() -> TestResult<Vec<InteropVector>> {
    let json = read_vector_file("jwe/interop.json")?;
    Ok(serde_json::from_str(&json)?)
}

/// Hands out a fixed byte sequence, then zeros.
pub struct ReplayRng {
    bytes: Vec<u8>,
    pos: usize,
}

impl ReplayRng {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RngCore for ReplayRng {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest {
            *byte = self.bytes.get(self.pos).copied().unwrap_or(0);
            self.pos += 1;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ReplayRng {}

/// [`OsRng`] that counts the bytes drawn from it.
#[derive(Default)]
pub struct CountingRng {
    drawn: usize,
}

impl CountingRng {
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        self.drawn += 4;
        OsRng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.drawn += 8;
        OsRng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.drawn += dest.len();
        OsRng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.drawn += dest.len();
        OsRng.try_fill_bytes(dest)
    }
}

impl CryptoRng for CountingRng {}
