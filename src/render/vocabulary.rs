/// Replaces known terms in free text, in one left-to-right pass.
///
/// At each position the first rule (in list order) whose term matches is
/// applied and the scan continues after the matched term, so replacement text
/// is never matched again. Matching is case-sensitive. When terms overlap, the
/// one that starts first wins, then list order; that outcome is kept as-is.
#[must_use]
pub fn normalize(text: &str, rules: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while !rest.is_empty() {
        for (term, replacement) in rules {
            if term.is_empty() {
                continue;
            }

            if let Some(after) = rest.strip_prefix(term) {
                out.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

/// Left-pads a number with zeros to `width` digits.
#[must_use]
pub fn zero_pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_in_order() {
        let rules = [("cat", "[[Cat]]"), ("dog", "[[Dog]]")];
        assert_eq!(normalize("cat and dog", &rules), "[[Cat]] and [[Dog]]");
    }

    #[test]
    fn test_normalize_every_occurrence() {
        let rules = [("miner", "[[Miner]]")];
        assert_eq!(normalize("miner, miner, miner", &rules), "[[Miner]], [[Miner]], [[Miner]]");
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        let rules = [("bard", "[[Bard]]")];
        assert_eq!(normalize("Bard and bard", &rules), "Bard and [[Bard]]");
    }

    #[test]
    fn test_normalize_does_not_rescan_replacements() {
        let rules = [("cat", "cat dog"), ("dog", "[[Dog]]")];
        assert_eq!(normalize("cat", &rules), "cat dog");
    }

    #[test]
    fn test_normalize_earlier_rule_wins_at_same_position() {
        let rules = [("black", "[[Black]]"), ("black mage", "[[Black Mage]]")];
        assert_eq!(normalize("black mage", &rules), "[[Black]] mage");
    }

    #[test]
    fn test_normalize_duplicate_rule_never_fires() {
        let rules = [("monk", "[[Monk]]"), ("monk", "[[Warrior]]")];
        assert_eq!(normalize("monk", &rules), "[[Monk]]");
    }

    #[test]
    fn test_normalize_multibyte_text() {
        let rules = [("lancer", "[[Lancer]]")];
        assert_eq!(normalize("Ålancer · lancer", &rules), "Å[[Lancer]] · [[Lancer]]");
    }

    #[test]
    fn test_normalize_ignores_empty_terms() {
        let rules = [("", "x"), ("a", "b")];
        assert_eq!(normalize("aa", &rules), "bb");
        assert_eq!(normalize("", &rules), "");
    }

    #[test]
    fn test_zero_pad() {
        assert_eq!(zero_pad(6_001, 6), "006001");
        assert_eq!(zero_pad(0, 6), "000000");
        assert_eq!(zero_pad(1_234_567, 6), "1234567");
    }
}
