//! Address handling for outbound email.
//!
//! Tracking rows store address lists newline-joined; configuration supplies
//! them comma-separated.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Validate that every address is a syntactically valid email address and
/// that at least one recipient is present.
pub fn validate_recipients(addresses: &[String]) -> Result<(), CoreError> {
    if addresses.is_empty() {
        return Err(CoreError::Validation(
            "at least one recipient is required".into(),
        ));
    }
    for address in addresses {
        if !address.validate_email() {
            return Err(CoreError::Validation(format!(
                "Invalid email address '{address}'"
            )));
        }
    }
    Ok(())
}

/// Join addresses the way tracking rows store them.
pub fn join_addresses(addresses: &[String]) -> String {
    addresses.join("\n")
}

/// Parse a comma-separated address list, dropping blanks.
pub fn parse_address_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// BCC list for a message: caller-supplied addresses followed by the
/// configured extras.
pub fn merge_bcc(bcc: Option<&[String]>, extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = bcc.map(<[String]>::to_vec).unwrap_or_default();
    merged.extend(extra.iter().cloned());
    merged
}
