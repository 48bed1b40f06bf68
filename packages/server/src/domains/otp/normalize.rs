//! Phone number normalization.
//!
//! Issuance and verification both canonicalize user-entered phone strings
//! through this one function, so the two lookups agree on key identity.

/// Canonicalize a user-entered phone string into a lookup key.
///
/// Keeps ASCII digits and a single leading `+`; whitespace, parentheses,
/// hyphens, and every other character are dropped. The country code is
/// never inferred or stripped: `+919876543210` and `9876543210` are
/// different keys.
///
/// Total function: malformed input yields a key that simply will not match
/// any stored entry. Plausibility validation belongs to the API boundary.
pub fn normalize_phone_number(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '0'..='9' => normalized.push(c),
            '+' if normalized.is_empty() => normalized.push(c),
            _ => {}
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize_phone_number("555-0100"), "5550100");
        assert_eq!(normalize_phone_number("(555) 0100"), "5550100");
        assert_eq!(normalize_phone_number("555.01.00"), "5550100");
    }

    #[test]
    fn test_equivalent_spellings_share_a_key() {
        let spellings = ["+91 98765-43210", "+91(98765)43210", "+919876543210"];
        for spelling in spellings {
            assert_eq!(
                normalize_phone_number(spelling),
                "+919876543210",
                "{spelling:?} should normalize to the canonical key"
            );
        }
    }

    #[test]
    fn test_leading_plus_is_preserved_and_significant() {
        assert_eq!(normalize_phone_number("+919876543210"), "+919876543210");
        assert_eq!(normalize_phone_number("9876543210"), "9876543210");
        assert_ne!(
            normalize_phone_number("+919876543210"),
            normalize_phone_number("9876543210"),
            "Country-code prefix is part of the key, not stripped"
        );
    }

    #[test]
    fn test_plus_after_punctuation_still_counts_as_leading() {
        assert_eq!(normalize_phone_number(" (+1) 555-0100"), "+15550100");
    }

    #[test]
    fn test_interior_plus_is_dropped() {
        assert_eq!(normalize_phone_number("555+0100"), "5550100");
        assert_eq!(normalize_phone_number("+55+50100"), "+5550100");
    }

    #[test]
    fn test_garbage_input_yields_harmless_key() {
        assert_eq!(normalize_phone_number(""), "");
        assert_eq!(normalize_phone_number("not a phone"), "");
        assert_eq!(normalize_phone_number("ext. 12"), "12");
    }
}
