//! Patient identifier generation.
//!
//! Identifiers are `PATIENT_<base36 millis>_<6 hex>`. The time part never
//! goes backwards within a process and the random suffix separates processes.
//! Collision-resistant, not collision-proof.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use super::consts::PATIENT_ID_PREFIX;

static LAST_TICK: AtomicU64 = AtomicU64::new(0);

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).to_uppercase()
}

/// Milliseconds since the epoch, bumped so no two calls get the same tick.
fn next_tick() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let previous = LAST_TICK
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

/// A fresh patient identifier.
pub fn generate_patient_id() -> String {
    let suffix: u32 = rand::rng().random_range(0..0x100_0000);
    format!(
        "{}_{}_{:06X}",
        PATIENT_ID_PREFIX,
        to_base36(next_tick()),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::collections::HashSet;

    #[rstest]
    #[case(0, "0")]
    #[case(35, "Z")]
    #[case(36, "10")]
    #[case(1_771_495_872_000, "MLTAWIYO")]
    fn test_to_base36(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(to_base36(value), expected);
    }

    #[rstest]
    fn test_ids_are_unique_and_shaped() {
        let ids: Vec<String> = (0..500).map(|_| generate_patient_id()).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());

        for id in &ids {
            let parts: Vec<&str> = id.split('_').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "PATIENT");
            assert_eq!(parts[2].len(), 6);
        }
    }

    #[rstest]
    fn test_ticks_increase() {
        let first = next_tick();
        let second = next_tick();
        assert!(second > first);
    }
}
