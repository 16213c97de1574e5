//! Key-based field extraction from a raw quote payload.
//!
//! The upstream payload is a nested object rendered as text, so positional
//! indexing into a comma split is fragile against format drift. Instead the
//! extractor scans comma-delimited tokens: the value is the substring after
//! the last colon (stripped of quotes, closing braces, and the `$ ` currency
//! marker), and it is associated with the nearest preceding recognized key —
//! in the same token or, when a key arrives with no value attached, the token
//! immediately before. Unrecognized tokens are ignored and malformed input
//! degrades to a partial map; extraction never fails.

use std::collections::HashMap;

use crate::models::{AssetRecord, AssetSymbol, Field};

/// Extracts every recognized field from one raw quote.
///
/// The first occurrence of a key wins, so readings from the payload's `RAW`
/// section are not overwritten by the formatted `DISPLAY` section that
/// repeats the same keys later.
pub fn extract_fields(raw: &str) -> HashMap<Field, f64> {
    let mut fields = HashMap::new();
    let mut carried: Option<Field> = None;

    for token in raw.split(',') {
        let key = recognize_key(token);
        let value = clean_value(token);

        let target = key.or(carried.take());
        let Some(field) = target else {
            continue;
        };

        match value.parse::<f64>() {
            Ok(number) => {
                fields.entry(field).or_insert(number);
            }
            // Key with no usable value in its own token: the value is
            // expected in the next token.
            Err(_) if key.is_some() => carried = key,
            Err(_) => {}
        }
    }

    fields
}

/// Convenience wrapper building a full [`AssetRecord`] from one raw quote.
pub fn extract_record(symbol: AssetSymbol, raw: &str) -> AssetRecord {
    AssetRecord::from_fields(symbol, &extract_fields(raw))
}

/// Finds the recognized key closest to the end of `token`, if any.
///
/// Keys are matched as quoted `"KEY"` occurrences so that prefix pairs such
/// as `VOLUME24HOUR` / `VOLUME24HOURTO` cannot shadow each other.
fn recognize_key(token: &str) -> Option<Field> {
    let mut best: Option<(usize, Field)> = None;
    for field in Field::ALL {
        let quoted = format!("\"{}\"", field.key());
        if let Some(pos) = token.rfind(&quoted) {
            match best {
                Some((best_pos, _)) if best_pos >= pos => {}
                _ => best = Some((pos, field)),
            }
        }
    }
    best.map(|(_, field)| field)
}

/// Isolates the value portion of a token: the substring after the last colon,
/// with quotes and closing braces removed and the currency marker stripped.
fn clean_value(token: &str) -> String {
    let tail = match token.rfind(':') {
        Some(idx) => &token[idx + 1..],
        None => token,
    };
    let stripped: String = tail.chars().filter(|c| *c != '"' && *c != '}').collect();
    let stripped = stripped.trim();
    stripped.strip_prefix("$ ").unwrap_or(stripped).to_string()
}
