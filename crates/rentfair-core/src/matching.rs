//! Matching rules for narrowing a district sample to a building or neighborhood.
//!
//! Building and neighborhood names arrive from the transaction source with
//! inconsistent spacing and casing ("Raemian  Hill", "raemian hill "), so names
//! are compared in a normalised form. Exclusive areas are compared with a
//! relative tolerance band around the tenant's unit size.

/// Normalise a building or neighborhood name for comparison.
///
/// 1. Trim surrounding whitespace
/// 2. Collapse internal whitespace runs to nothing (Korean names are often
///    written with and without spaces: "래미안 힐" vs "래미안힐")
/// 3. Lowercase ASCII letters
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace()
        .flat_map(|part| part.chars())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True when both names normalise to the same non-empty string.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    !a.is_empty() && a == normalize_name(b)
}

/// Relative band of exclusive areas considered comparable to a target unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaBand {
    lower: f64,
    upper: f64,
}

impl AreaBand {
    /// Band of `target ± tolerance·target`. A non-positive target yields an
    /// unbounded band (no area restriction).
    pub fn around(target: f64, tolerance: f64) -> Self {
        if target <= 0.0 || !target.is_finite() {
            return Self {
                lower: f64::NEG_INFINITY,
                upper: f64::INFINITY,
            };
        }
        let half_width = target * tolerance.max(0.0);
        Self {
            lower: target - half_width,
            upper: target + half_width,
        }
    }

    pub fn contains(&self, area: f64) -> bool {
        area >= self.lower && area <= self.upper
    }
}
