/// Whether upper-casing leaves the text unchanged.
///
/// True for text without any cased letters too ("2019", "", "-").
pub fn is_all_upper(text: &str) -> bool {
    text.to_uppercase() == text
}

/// Running footer such as "ACME CORP | Q4 2019 EARNINGS CALL | FEB 27, 2020".
/// Marks the end of the participant block.
pub fn is_footer_line(text: &str, separator: &str) -> bool {
    text.contains(separator) && is_all_upper(text)
}

/// Header, footer or page furniture that must not enter the conversation.
///
/// Any span carrying the separator or written entirely in capitals is dropped.
pub fn is_boilerplate(text: &str, separator: &str) -> bool {
    text.contains(separator) || is_all_upper(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_all_upper() {
        assert!(is_all_upper("EXECUTIVES"));
        assert!(is_all_upper("2019"));
        assert!(is_all_upper(""));
        assert!(!is_all_upper("Operator"));
    }

    #[test]
    fn test_footer_requires_both_rules() {
        assert!(is_footer_line("ACME CORP | FQ4 2019 EARNINGS CALL", " | "));
        assert!(!is_footer_line("Acme Corp | Earnings Call", " | "));
        assert!(!is_footer_line("ACME CORP", " | "));
    }

    #[test]
    fn test_boilerplate_either_rule() {
        assert!(is_boilerplate("Acme Corp | Earnings Call", " | "));
        assert!(is_boilerplate("COPYRIGHT 2020", " | "));
        assert!(is_boilerplate("", " | "));
        assert!(!is_boilerplate("Thank you, operator.", " | "));
    }
}
