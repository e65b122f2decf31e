//! Eligibility Engine — institution recognition plus graduation-window
//! arithmetic.
//!
//! `check` is pure: the same (graduation year, institution, as-of date)
//! always produces the same result, so eligibility is recomputed on demand
//! and never persisted.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A recognized institution and the short forms it commonly appears under.
#[derive(Debug, Clone)]
pub struct Institution {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

/// Allow-list and window configuration, passed in at construction so batch
/// runs can be parameterized without touching global state.
#[derive(Debug, Clone)]
pub struct EligibilityConfig {
    pub institutions: Vec<Institution>,
    /// Months after the assumed graduation date a graduate stays eligible.
    /// Exactly this many months is still eligible.
    pub window_months: i64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            institutions: vec![
                Institution {
                    name: "University of Auckland",
                    aliases: &["UoA", "Auckland Uni"],
                },
                Institution {
                    name: "Auckland University of Technology",
                    aliases: &["AUT"],
                },
                Institution {
                    name: "Victoria University of Wellington",
                    aliases: &["VUW", "Te Herenga Waka"],
                },
                Institution {
                    name: "University of Canterbury",
                    aliases: &["Canterbury"],
                },
                Institution {
                    name: "University of Otago",
                    aliases: &["Otago"],
                },
                Institution {
                    name: "Massey University",
                    aliases: &["Massey"],
                },
                Institution {
                    name: "University of Waikato",
                    aliases: &["Waikato"],
                },
                Institution {
                    name: "Lincoln University",
                    aliases: &["Lincoln"],
                },
                Institution {
                    name: "Unitec Institute of Technology",
                    aliases: &["Unitec"],
                },
            ],
            window_months: 12,
        }
    }
}

/// Derived per-check result. Never cached — see module docs.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub reason: String,
    pub institution_recognized: bool,
    /// Whole months since the assumed graduation date; 0 for current students.
    pub months_since_graduation: i64,
    /// Advisory only — never blocks eligibility.
    pub warnings: Vec<String>,
}

impl EligibilityResult {
    fn ineligible(reason: &str, recognized: bool, months: i64) -> Self {
        Self {
            eligible: false,
            reason: reason.to_string(),
            institution_recognized: recognized,
            months_since_graduation: months,
            warnings: Vec::new(),
        }
    }
}

pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    /// Decides program eligibility from the declared graduation year and
    /// institution, evaluated as of `as_of`.
    ///
    /// Graduation is assumed to fall on Dec 31 of the declared year; only
    /// current students and graduates within `window_months` qualify.
    pub fn check(
        &self,
        graduation_year: i32,
        institution: &str,
        as_of: NaiveDate,
    ) -> EligibilityResult {
        if !self.recognizes(institution) {
            return EligibilityResult::ineligible("institution not recognized", false, 0);
        }

        let current_year = as_of.year();

        if graduation_year >= current_year {
            return EligibilityResult {
                eligible: true,
                reason: "currently studying".to_string(),
                institution_recognized: true,
                months_since_graduation: 0,
                warnings: Vec::new(),
            };
        }

        if graduation_year < current_year - 1 {
            return EligibilityResult::ineligible(
                "graduated too long ago",
                true,
                months_since_assumed_graduation(graduation_year, as_of).unwrap_or(0),
            );
        }

        let Some(months) = months_since_assumed_graduation(graduation_year, as_of) else {
            return EligibilityResult::ineligible("invalid graduation date", true, 0);
        };

        if months < 0 {
            // Graduation computed in the future despite an earlier declared
            // year — inconsistent input, not a current student.
            return EligibilityResult::ineligible("invalid graduation date", true, months);
        }

        if months > self.config.window_months {
            return EligibilityResult::ineligible("graduated too long ago", true, months);
        }

        let mut warnings = Vec::new();
        if (self.config.window_months - 2..=self.config.window_months).contains(&months) {
            warnings.push(format!(
                "graduation is {months} months ago — near the eligibility limit"
            ));
        }
        if months <= 1 {
            warnings.push("graduation is very recent — verify recency with the candidate".to_string());
        }

        EligibilityResult {
            eligible: true,
            reason: format!("graduated {months} months ago, within the eligibility window"),
            institution_recognized: true,
            months_since_graduation: months,
            warnings,
        }
    }

    /// Case-insensitive substring match, either direction, against every
    /// canonical name and alias in the allow-list.
    fn recognizes(&self, institution: &str) -> bool {
        let declared = institution.trim().to_lowercase();
        if declared.is_empty() {
            return false;
        }
        self.config.institutions.iter().any(|inst| {
            std::iter::once(inst.name)
                .chain(inst.aliases.iter().copied())
                .any(|known| {
                    let known = known.to_lowercase();
                    declared.contains(&known) || known.contains(&declared)
                })
        })
    }
}

/// Whole months between the assumed Dec 31 graduation of `graduation_year`
/// and `as_of`. Negative when `as_of` precedes the graduation date.
fn months_since_assumed_graduation(graduation_year: i32, as_of: NaiveDate) -> Option<i64> {
    let graduated = NaiveDate::from_ymd_opt(graduation_year, 12, 31)?;
    let mut months = i64::from(as_of.year() - graduated.year()) * 12
        + i64::from(as_of.month() as i32 - graduated.month() as i32);
    if as_of.day() < graduated.day() {
        months -= 1;
    }
    Some(months)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> EligibilityEngine {
        EligibilityEngine::new(EligibilityConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unrecognized_institution_short_circuits() {
        let result = engine().check(2026, "Hogwarts School", date(2026, 3, 1));
        assert!(!result.eligible);
        assert!(!result.institution_recognized);
        assert_eq!(result.reason, "institution not recognized");
    }

    #[test]
    fn test_alias_and_full_name_resolve_identically() {
        let e = engine();
        let by_alias = e.check(2026, "AUT", date(2026, 3, 1));
        let by_name = e.check(2026, "Auckland University of Technology", date(2026, 3, 1));
        assert_eq!(by_alias.institution_recognized, by_name.institution_recognized);
        assert_eq!(by_alias.eligible, by_name.eligible);
    }

    #[test]
    fn test_recognition_is_substring_both_directions() {
        let e = engine();
        // Declared name contains the known name
        assert!(e.check(2026, "The University of Otago, Dunedin", date(2026, 1, 1)).eligible);
        // Known name contains the declared fragment
        assert!(e.check(2026, "Massey", date(2026, 1, 1)).eligible);
    }

    #[test]
    fn test_current_year_graduation_is_studying() {
        let result = engine().check(2026, "UoA", date(2026, 6, 15));
        assert!(result.eligible);
        assert_eq!(result.reason, "currently studying");
        assert_eq!(result.months_since_graduation, 0);
    }

    #[test]
    fn test_future_graduation_is_studying() {
        let result = engine().check(2028, "UoA", date(2026, 6, 15));
        assert!(result.eligible);
        assert_eq!(result.months_since_graduation, 0);
    }

    #[test]
    fn test_exactly_twelve_months_is_eligible() {
        // Graduated (assumed) 2024-12-31, checked 2025-12-31 — exactly 12 months.
        let result = engine().check(2024, "UoA", date(2025, 12, 31));
        assert!(result.eligible, "12 months must still be eligible: {}", result.reason);
        assert_eq!(result.months_since_graduation, 12);
    }

    #[test]
    fn test_one_day_past_twelve_months_is_ineligible() {
        // 2026-01-01 rolls the current year forward, putting 2024 out of reach.
        let result = engine().check(2024, "UoA", date(2026, 1, 1));
        assert!(!result.eligible);
        assert_eq!(result.reason, "graduated too long ago");
    }

    #[test]
    fn test_two_years_back_is_too_long_ago() {
        let result = engine().check(2023, "UoA", date(2026, 3, 1));
        assert!(!result.eligible);
        assert_eq!(result.reason, "graduated too long ago");
    }

    #[test]
    fn test_near_limit_warning_attached() {
        // Graduated 2025-12-31, checked 2026-11-15 → 10 whole months.
        let result = engine().check(2025, "UoA", date(2026, 11, 15));
        assert!(result.eligible);
        assert_eq!(result.months_since_graduation, 10);
        assert!(result.warnings.iter().any(|w| w.contains("near the eligibility limit")));
    }

    #[test]
    fn test_recent_graduation_warning_attached() {
        // Graduated 2025-12-31, checked 2026-01-15 → 0 whole months.
        let result = engine().check(2025, "UoA", date(2026, 1, 15));
        assert!(result.eligible);
        assert_eq!(result.months_since_graduation, 0);
        assert!(result.warnings.iter().any(|w| w.contains("verify recency")));
    }

    #[test]
    fn test_check_is_deterministic() {
        let e = engine();
        let a = e.check(2025, "AUT", date(2026, 5, 20));
        let b = e.check(2025, "AUT", date(2026, 5, 20));
        assert_eq!(a.eligible, b.eligible);
        assert_eq!(a.reason, b.reason);
        assert_eq!(a.months_since_graduation, b.months_since_graduation);
    }

    #[test]
    fn test_whole_month_arithmetic_rounds_down() {
        // 2025-12-31 → 2026-03-30: the third month has not fully elapsed.
        assert_eq!(
            months_since_assumed_graduation(2025, date(2026, 3, 30)),
            Some(2)
        );
        assert_eq!(
            months_since_assumed_graduation(2025, date(2026, 3, 31)),
            Some(3)
        );
    }

    #[test]
    fn test_months_negative_before_graduation_date() {
        assert_eq!(
            months_since_assumed_graduation(2026, date(2026, 6, 1)),
            Some(-7)
        );
    }
}
