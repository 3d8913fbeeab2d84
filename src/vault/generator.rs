use anyhow::{anyhow, Result};
use ring::rand::{SecureRandom, SystemRandom};

use crate::vault::ports::Rng;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 12;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+";

pub struct SystemRng;

impl Rng for SystemRng {
    fn fill(&self, bytes: &mut [u8]) -> Result<()> {
        let rng = SystemRandom::new();
        rng.fill(bytes)
            .map_err(|_| anyhow!("failed to obtain system randomness"))
    }
}

/// Generator controls as they appear next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_uppercase: false,
            include_numbers: false,
            include_symbols: false,
        }
    }
}

impl GenOptions {
    pub fn clamped_length(&self) -> usize {
        self.length.clamp(MIN_LENGTH, MAX_LENGTH)
    }
}

/// Lowercase letters plus every enabled class. A pool that is still only the
/// 26 base letters gets digits appended.
pub fn build_pool(options: &GenOptions) -> Vec<u8> {
    let mut pool = LOWER.to_vec();
    if options.include_uppercase {
        pool.extend_from_slice(UPPER);
    }
    if options.include_numbers {
        pool.extend_from_slice(DIGITS);
    }
    if options.include_symbols {
        pool.extend_from_slice(SYMBOLS);
    }
    if pool.len() == LOWER.len() {
        pool.extend_from_slice(DIGITS);
    }
    pool
}

pub(crate) fn uniform_index(rng: &dyn Rng, len: usize) -> Result<usize> {
    if len == 0 {
        return Err(anyhow!("empty pool"));
    }
    // Rejection sampling on u32 space
    let n = len as u32;
    let zone = (u32::MAX / n) * n;
    loop {
        let mut b = [0u8; 4];
        rng.fill(&mut b)?;
        let x = u32::from_le_bytes(b);
        if x < zone {
            return Ok((x % n) as usize);
        }
    }
}

/// Draw `options.length` (clamped to 4..=64) characters independently from
/// the pool.
pub fn generate(rng: &dyn Rng, options: &GenOptions) -> Result<String> {
    let pool = build_pool(options);
    let need = options.clamped_length();
    let mut out = String::with_capacity(need);
    for _ in 0..need {
        let idx = uniform_index(rng, pool.len())?;
        out.push(pool[idx] as char);
    }
    Ok(out)
}
