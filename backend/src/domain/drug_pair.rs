//! Order- and case-insensitive identity for two drug names.

use std::fmt;

/// Canonical form of an unordered pair of drug names.
///
/// Both names are trimmed and lower-cased, then sorted so that
/// `DrugPair::new(a, b) == DrugPair::new(b, a)`.
///
/// # Examples
/// ```
/// use medcheck::domain::DrugPair;
///
/// let pair = DrugPair::new(" Warfarin", "aspirin ");
/// assert_eq!(pair.low(), "aspirin");
/// assert_eq!(pair.high(), "warfarin");
/// assert_eq!(pair, DrugPair::new("ASPIRIN", "warfarin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrugPair {
    low: String,
    high: String,
}

impl DrugPair {
    /// Normalise two names into a pair.
    pub fn new(a: &str, b: &str) -> Self {
        let a = normalise(a);
        let b = normalise(b);
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Lexicographically smaller normalised name.
    pub fn low(&self) -> &str {
        self.low.as_str()
    }

    /// Lexicographically larger normalised name.
    pub fn high(&self) -> &str {
        self.high.as_str()
    }

    /// Consume the pair, returning `(low, high)`.
    pub fn into_parts(self) -> (String, String) {
        (self.low, self.high)
    }
}

impl fmt::Display for DrugPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.low, self.high)
    }
}

fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}
