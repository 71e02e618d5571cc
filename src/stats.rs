//! Randomized engagement counters shown under a quote.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Pre-formatted engagement counters for one rendered card.
///
/// Values are stored already abbreviated so a record carries exactly what
/// gets painted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngagementStats {
    pub comments: String,
    pub retweets: String,
    pub likes: String,
    pub views: String,
}

impl EngagementStats {
    /// Draw a fresh set of counters, each from its own bounded range.
    pub fn sample() -> Result<Self> {
        Ok(Self {
            comments: format_count(sample_range(10, 510)?),
            retweets: format_count(sample_range(20, 820)?),
            likes: format_count(sample_range(100, 5_100)?),
            views: format_count(sample_range(1_000, 51_000)?),
        })
    }
}

/// Abbreviate a counter the way feeds do: one decimal with an `M` suffix
/// from a million up, `K` from a thousand up, plain digits below that.
pub fn format_count(value: u32) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", f64::from(value) / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", f64::from(value) / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Uniform draw from `lo..hi` using the OS entropy source.
fn sample_range(lo: u32, hi: u32) -> Result<u32> {
    debug_assert!(lo < hi);
    let raw = getrandom::u32().map_err(|err| anyhow!("entropy source unavailable: {err}"))?;
    Ok(lo + raw % (hi - lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_below_a_thousand_stay_plain() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn thousands_use_k_with_one_decimal() {
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_500), "1.5K");
        assert_eq!(format_count(49_900), "49.9K");
        assert_eq!(format_count(999_999), "1000.0K");
    }

    #[test]
    fn millions_use_m_with_one_decimal() {
        assert_eq!(format_count(1_000_000), "1.0M");
        assert_eq!(format_count(2_550_000), "2.5M");
    }

    #[test]
    fn sampled_values_stay_in_range() {
        for _ in 0..64 {
            let v = sample_range(10, 510).unwrap();
            assert!((10..510).contains(&v));
        }
    }

    #[test]
    fn sampled_stats_are_formatted() {
        let stats = EngagementStats::sample().unwrap();
        // Views draw from 1_000..51_000, so they always carry a K suffix.
        assert!(stats.views.ends_with('K'), "views = {}", stats.views);
        assert!(!stats.comments.is_empty());
    }
}
