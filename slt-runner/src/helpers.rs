// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for slt-runner.

/// Returns the prefix of `s` containing at most `max_chars` characters.
///
/// Counts `char`s rather than bytes, so multi-byte characters are never split.
pub(crate) fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
