use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/**
    Timestamp and nonce of one request.

    Both travel as cookies and are also part of the signed parameters, so a
    stamp must never be reused for a second request.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStamp {
    /// Unix seconds.
    pub timestamp: u64,
    /// 21-character nonce, see [`RequestStamp::now`].
    pub nonce: String,
}

impl RequestStamp {
    /**
        Create a stamp from fixed values.
    */
    pub fn new(timestamp: u64, nonce: impl Into<String>) -> Self {
        Self {
            timestamp,
            nonce: nonce.into(),
        }
    }

    /**
        Fresh stamp from the system clock.

        The nonce is 13 hex digits of clock time followed by eight random
        decimal digits:

        ```text
        ssssssss  uuuuu  rrrrrrrr
        │         │      └ random, 0-padded decimal (8)
        │         └ microseconds within the second, hex (5)
        └ unix seconds, hex (8)
        ```
    */
    pub fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let timestamp = now.as_secs();
        let micros = now.subsec_micros();
        let random: u32 = rand::rng().random_range(0..100_000_000);

        Self {
            timestamp,
            nonce: format!("{timestamp:08x}{micros:05x}{random:08}"),
        }
    }
}
