//! Clock の標準実装

use crate::ports::outbound::Clock;
use std::time::{SystemTime, UNIX_EPOCH};

/// システム時計（Unix epoch ミリ秒）。epoch より前を指している場合は 0
#[derive(Debug, Clone, Default)]
pub struct StdClock;

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
