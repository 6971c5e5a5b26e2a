//! Heuristic password-strength scoring
//!
//! This is a UX signal feeding strength meters, not a cryptographic strength
//! proof. It must not be the sole gate for accepting a password.
//!
//! Score: length contribution `min(length * 2.5, 40)` plus 10 per character
//! class present, minus 10 each for a repeated-character or sequential-run
//! pattern, clamped to 0–100. The formula is shared verbatim by every client
//! surface so meters agree across them.

use serde::Serialize;

/// Coarse strength bands for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StrengthCategory {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthCategory {
    fn from_score(score: f64) -> Self {
        if score < 20.0 {
            Self::VeryWeak
        } else if score < 40.0 {
            Self::Weak
        } else if score < 60.0 {
            Self::Moderate
        } else if score < 80.0 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }
}

impl std::fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

/// Stateless analysis of a single password. Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthReport {
    pub score: f64,
    pub category: StrengthCategory,
    pub length: usize,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digits: bool,
    pub has_symbols: bool,
    /// Coarse estimate: log2 of the combined size of the character classes
    /// present, times the length.
    pub entropy_bits: f64,
    pub has_repeated_chars: bool,
    pub has_sequential_chars: bool,
}

/// Analyze a password against the shared heuristic model.
pub fn analyze_password(password: &str) -> StrengthReport {
    let length = password.chars().count();
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digits = password.chars().any(|c| c.is_ascii_digit());
    let has_symbols = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let classes = [has_uppercase, has_lowercase, has_digits, has_symbols]
        .iter()
        .filter(|present| **present)
        .count();

    let mut alphabet = 0u32;
    if has_uppercase {
        alphabet += 26;
    }
    if has_lowercase {
        alphabet += 26;
    }
    if has_digits {
        alphabet += 10;
    }
    if has_symbols {
        alphabet += 33;
    }
    let entropy_bits = if alphabet == 0 {
        0.0
    } else {
        f64::from(alphabet).log2() * length as f64
    };

    let has_repeated_chars = has_repeated_run(password);
    let has_sequential_chars = has_sequential_run(password);

    let mut score = (length as f64 * 2.5).min(40.0);
    score += classes as f64 * 10.0;
    if has_repeated_chars {
        score -= 10.0;
    }
    if has_sequential_chars {
        score -= 10.0;
    }
    let score = score.clamp(0.0, 100.0);

    StrengthReport {
        score,
        category: StrengthCategory::from_score(score),
        length,
        has_uppercase,
        has_lowercase,
        has_digits,
        has_symbols,
        entropy_bits,
        has_repeated_chars,
        has_sequential_chars,
    }
}

/// Three or more identical characters in a row.
fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// A three-character ascending alphabetic or numeric run ("abc", "123"),
/// case-insensitive.
fn has_sequential_run(password: &str) -> bool {
    let lowered: Vec<char> = password.to_lowercase().chars().collect();
    lowered.windows(3).any(|w| {
        let ascending =
            w[1] as u32 == w[0] as u32 + 1 && w[2] as u32 == w[1] as u32 + 1;
        ascending
            && ((w[0].is_ascii_lowercase() && w[2].is_ascii_lowercase())
                || (w[0].is_ascii_digit() && w[2].is_ascii_digit()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_run_scores_very_weak() {
        let report = analyze_password("aaaa");

        assert!(report.has_repeated_chars);
        assert!(!report.has_sequential_chars);
        assert_eq!(report.score, 10.0);
        assert_eq!(report.category, StrengthCategory::VeryWeak);
    }

    #[test]
    fn test_all_classes_no_patterns_scores_strong() {
        // 13 chars, all four classes, no repeated or sequential runs:
        // min(13 * 2.5, 40) + 4 * 10 = 72.5
        let report = analyze_password("Tr0ub4dor&9XQ");

        assert_eq!(report.length, 13);
        assert!(report.has_uppercase);
        assert!(report.has_lowercase);
        assert!(report.has_digits);
        assert!(report.has_symbols);
        assert!(!report.has_repeated_chars);
        assert!(!report.has_sequential_chars);
        assert_eq!(report.score, 72.5);
        assert_eq!(report.category, StrengthCategory::Strong);
    }

    #[test]
    fn test_sequential_runs_detected() {
        let report = analyze_password("abc123");

        assert!(report.has_sequential_chars);
        assert!(!report.has_repeated_chars);
        // min(6 * 2.5, 40) + 2 * 10 - 10 = 25
        assert_eq!(report.score, 25.0);
        assert_eq!(report.category, StrengthCategory::Weak);
    }

    #[test]
    fn test_sequential_detection_case_insensitive() {
        assert!(analyze_password("xAbCx").has_sequential_chars);
    }

    #[test]
    fn test_sequence_does_not_cross_alphabet_boundary() {
        // 'y','z','0' is not a run; neither is '9',':',';'
        assert!(!analyze_password("yz0").has_sequential_chars);
        assert!(!analyze_password("xyz").has_repeated_chars);
        assert!(analyze_password("xyz").has_sequential_chars);
        assert!(analyze_password("789").has_sequential_chars);
    }

    #[test]
    fn test_empty_password() {
        let report = analyze_password("");

        assert_eq!(report.length, 0);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.entropy_bits, 0.0);
        assert_eq!(report.category, StrengthCategory::VeryWeak);
    }

    #[test]
    fn test_score_clamped_at_100() {
        let report = analyze_password("K9#mQ2$vX7!pL4@wZ8%nR5^dT1&b");

        assert!(report.score <= 100.0);
        assert_eq!(report.category, StrengthCategory::VeryStrong);
    }

    #[test]
    fn test_entropy_grows_with_classes() {
        let lower_only = analyze_password("abcdefgh");
        let mixed = analyze_password("aBcDeF7!");

        assert!(mixed.entropy_bits > lower_only.entropy_bits);
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(StrengthCategory::from_score(0.0), StrengthCategory::VeryWeak);
        assert_eq!(StrengthCategory::from_score(19.9), StrengthCategory::VeryWeak);
        assert_eq!(StrengthCategory::from_score(20.0), StrengthCategory::Weak);
        assert_eq!(StrengthCategory::from_score(40.0), StrengthCategory::Moderate);
        assert_eq!(StrengthCategory::from_score(60.0), StrengthCategory::Strong);
        assert_eq!(StrengthCategory::from_score(80.0), StrengthCategory::VeryStrong);
        assert_eq!(StrengthCategory::from_score(100.0), StrengthCategory::VeryStrong);
    }

    #[test]
    fn test_unicode_counts_as_symbol() {
        let report = analyze_password("héllo");

        assert!(report.has_symbols);
        assert_eq!(report.length, 5);
    }
}
