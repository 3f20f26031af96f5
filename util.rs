/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Small shared helpers with no dependencies on the rest of the crate.

/// Truncate `text` to at most `max_chars` characters, replacing the tail
/// with a single ellipsis when it does not fit. Operates on `char`
/// boundaries, so multi-byte input never panics.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// Round to two decimal places, the precision used for user-facing
/// probe figures.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
