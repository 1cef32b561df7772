//! Coolapk app token generation.
//!
//! The API rejects requests without an `X-App-Token` derived from the
//! device code and the current Unix time.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Package name the token is bound to.
pub const APP_ID: &str = "com.coolapk.market";

const TOKEN_SALT: &str = "c67ef5943784d09750dcfbb31020f0ab";

const DEVICE_CODE_LEN: usize = 32;

fn md5_hex(input: impl AsRef<[u8]>) -> String {
    format!("{:x}", md5::compute(input))
}

/// Build the token for `device_code` at Unix time `timestamp`.
pub fn app_token_at(device_code: &str, timestamp: u64) -> String {
    let hashed_time = md5_hex(timestamp.to_string());
    let seed = format!("token://{APP_ID}/{TOKEN_SALT}?{hashed_time}${device_code}&{APP_ID}");
    let signature = md5_hex(STANDARD.encode(seed));

    format!("{signature}{device_code}0x{timestamp:x}")
}

/// Build the token for `device_code` at the current time.
pub fn app_token(device_code: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    app_token_at(device_code, now)
}

/// A random device code, generated once per client.
pub fn random_device_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEVICE_CODE_LEN)
        .map(char::from)
        .collect()
}
