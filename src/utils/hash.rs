//! Content hashing using FxHash.
//!
//! Used for cache-busting fingerprints on static asset URLs.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let h = hash::compute_reader(File::open(path)?)?; // -> u64
//! let fp = hash::to_fingerprint(h); // -> "a1b2c3d4"
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::io::{self, Read};

/// Compute hash from a reader (streaming, for large files).
pub fn compute_reader(mut reader: impl Read) -> io::Result<u64> {
    let mut hasher = FxHasher::default();
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.write(&buffer[..n]);
    }
    Ok(hasher.finish())
}

/// Format a hash as an 8-char hex fingerprint.
#[inline]
pub fn to_fingerprint(hash: u64) -> String {
    format!("{hash:016x}")[..8].to_string()
}
