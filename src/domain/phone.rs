//! Phone number normalization for the chat network's addressing scheme.

use serde::{Deserialize, Serialize};

/// Canonical chat-network address: country code followed by the subscriber
/// number, digits only, no `+` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Wrap an already-canonical address (e.g. a sender id handed to us by
    /// the network itself).
    pub fn from_canonical(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digits in a nationally-formatted number including the trunk `0`.
const NATIONAL_LEN: usize = 10;
/// Digits in a subscriber number without the trunk prefix.
const SUBSCRIBER_LEN: usize = 9;

/// Normalize a human-entered phone string into an [`Address`].
///
/// Strips every non-digit character, then maps the national format onto the
/// given country code: `0712345678` becomes `254712345678` (trunk zero
/// replaced), `712345678` becomes `254712345678` (code prepended). Anything
/// else passes through digits-only. Best-effort by contract: malformed input
/// yields a malformed address and the send path reports the failure.
pub fn normalize(raw: &str, country_code: &str) -> Address {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == NATIONAL_LEN && digits.starts_with('0') {
        return Address(format!("{country_code}{}", &digits[1..]));
    }
    if digits.len() == SUBSCRIBER_LEN && !digits.starts_with('0') {
        return Address(format!("{country_code}{digits}"));
    }

    Address(digits)
}

/// Mask a phone number for logging (e.g. `254****5678`).
pub fn mask(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 7 {
        format!("{}****{}", &digits[0..3], &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}
