//! Flat comma-separated persistence of recorded windows.
//!
//! Only values are stored, oldest first, with no header and no timestamps.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::Measurement;

pub const VALUE_SEPARATOR: char = ',';

/// Joins the sample values with commas. Returns `None` for an empty slice.
#[must_use]
pub fn encode_values(samples: &[Measurement]) -> Option<String> {
    let (first, rest) = samples.split_first()?;
    let mut encoded = first.value().to_string();
    for sample in rest {
        encoded.push(VALUE_SEPARATOR);
        encoded.push_str(&sample.value().to_string());
    }
    Some(encoded)
}

/// Parses comma-separated values, dropping empty tokens and tokens that are
/// not unsigned 16-bit integers.
#[must_use]
pub fn parse_values(text: &str) -> Vec<u16> {
    text.split(VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<u16>() {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(token, error = %err, "skipping malformed value token");
                None
            }
        })
        .collect()
}

/// Parses values and stamps every sample with `loaded_at`.
#[must_use]
pub fn parse_measurements(text: &str, loaded_at: DateTime<Utc>) -> Vec<Measurement> {
    parse_values(text)
        .into_iter()
        .map(|value| Measurement::new(value, loaded_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{encode_values, parse_values};
    use crate::core::Measurement;

    #[test]
    fn encodes_in_arrival_order() {
        let samples: Vec<Measurement> =
            [72u16, 75, 80, 78].into_iter().map(Measurement::now).collect();
        assert_eq!(encode_values(&samples).as_deref(), Some("72,75,80,78"));
        assert_eq!(encode_values(&[]), None);
    }

    #[test]
    fn malformed_and_empty_tokens_are_skipped() {
        assert_eq!(parse_values("72,,x, 80 ,-1,70000,65"), vec![72, 80, 65]);
        assert!(parse_values("").is_empty());
    }
}
