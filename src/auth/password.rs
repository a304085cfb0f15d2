//! PBKDF2-HMAC-SHA256 password hashes, stored as
//! `pbkdf2-sha256$<iterations>$<salt>$<hex derived key>`.

use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "pbkdf2-sha256";
pub const ITERATIONS: u32 = 100_000;
/// Stored hashes claiming more rounds than this are treated as corrupt.
const MAX_ITERATIONS: u32 = 10_000_000;

/// Hash checked when the username is unknown, so both login failures cost the same.
static UNKNOWN_USER_HASH: Lazy<String> = Lazy::new(|| hash_password("unknown-user"));

/// One PBKDF2 block, which is the whole 32-byte key for SHA-256.
fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let prf = HmacSha256::new_from_slice(password.as_bytes())
        .expect("HMAC accepts keys of any length");

    let mut mac = prf.clone();
    mac.update(salt.as_bytes());
    mac.update(&1u32.to_be_bytes());
    let mut block = mac.finalize().into_bytes();
    let mut key = block;

    for _ in 1..iterations {
        let mut mac = prf.clone();
        mac.update(&block);
        block = mac.finalize().into_bytes();
        for (k, b) in key.iter_mut().zip(block.iter()) {
            *k ^= b;
        }
    }

    hex::encode(key)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!(
        "{}${}${}${}",
        SCHEME,
        ITERATIONS,
        salt,
        derive(password, &salt, ITERATIONS)
    )
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(scheme), Some(iterations), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 || iterations > MAX_ITERATIONS {
        return false;
    }

    constant_time_eq(&derive(password, salt, iterations), expected)
}

/// Spends the same work as a real check and always fails.
pub fn verify_unknown_user(password: &str) -> bool {
    std::hint::black_box(verify_password(password, &UNKNOWN_USER_HASH));
    false
}
