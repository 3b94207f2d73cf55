//! WhatsApp number normalization.
//!
//! Customers type their number in whatever shape they like; the chat
//! notification needs one canonical international form (`58XXXXXXXXXX` for
//! Venezuelan mobiles) to build a `wa.me` link.

/// Venezuelan mobile area codes accepted without country or trunk prefix.
const MOBILE_AREA_CODES: &[&str] = &["412", "414", "416", "424", "426"];

/// Venezuela country calling code.
const COUNTRY_CODE: &str = "58";

/// Normalize a user-entered WhatsApp number.
///
/// Returns `None` when the input is empty or too short to be a phone number.
pub fn normalize_whatsapp_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let normalized = match digits.len() {
        // Local format with trunk zero: 0414XXXXXXX
        11 if digits.starts_with('0') => format!("{COUNTRY_CODE}{}", &digits[1..]),
        // International format that kept the trunk zero: 580414XXXXXXX
        13 if digits.starts_with("580") => format!("{COUNTRY_CODE}{}", &digits[3..]),
        // Already canonical
        12 if digits.starts_with(COUNTRY_CODE) => digits,
        // Bare area code + subscriber number
        10 if MOBILE_AREA_CODES.iter().any(|code| digits.starts_with(code)) => {
            format!("{COUNTRY_CODE}{digits}")
        }
        // Some other country; keep the digits as typed
        n if n >= 10 => digits,
        _ => return None,
    };

    tracing::debug!(input = %raw, normalized = %normalized, "Normalized WhatsApp number");
    Some(normalized)
}
