//! Rule-based match scorer — the deterministic fallback tier.
//!
//! Weighted sum over six components, each pre-normalized to [0, 1]. The
//! weights and lookup tables are contractual business rules carried as
//! immutable config, constructed once and passed in.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, EmploymentMode};
use crate::scoring::{MatchInputs, MatchScorer};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Component weights. Must sum to 1.0 so the weighted sum maps cleanly onto
/// the 0–100 scale.
#[derive(Debug, Clone)]
pub struct MatchWeights {
    pub skills: f64,
    pub location: f64,
    pub availability: f64,
    pub interests: f64,
    pub timeline: f64,
    pub completeness: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            location: 0.20,
            availability: 0.15,
            interests: 0.10,
            timeline: 0.10,
            completeness: 0.05,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills
            + self.location
            + self.availability
            + self.interests
            + self.timeline
            + self.completeness
    }
}

/// Language → frameworks that imply working knowledge of it. Credit flows
/// one way: a candidate listing a framework partially satisfies the parent
/// language requirement, but listing the language alone does not satisfy a
/// specific framework requirement.
#[derive(Debug, Clone)]
pub struct SkillFamilies {
    families: HashMap<String, Vec<String>>,
}

const DEFAULT_SKILL_FAMILIES: &[(&str, &[&str])] = &[
    ("python", &["django", "flask", "fastapi", "pandas", "numpy"]),
    ("javascript", &["react", "vue", "angular", "node.js", "express"]),
    ("typescript", &["react", "angular", "nest.js"]),
    ("java", &["spring", "spring boot", "hibernate"]),
    ("ruby", &["rails"]),
    ("c#", &[".net", "asp.net"]),
    ("sql", &["postgresql", "mysql", "sqlite"]),
];

impl Default for SkillFamilies {
    fn default() -> Self {
        Self {
            families: DEFAULT_SKILL_FAMILIES
                .iter()
                .map(|(lang, frameworks)| {
                    (
                        (*lang).to_string(),
                        frameworks.iter().map(|f| (*f).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl SkillFamilies {
    /// True when `candidate` (lowercase) is a known framework of the
    /// `required` (lowercase) skill.
    fn implies(&self, required: &str, candidate: &str) -> bool {
        self.families
            .get(required)
            .is_some_and(|fs| fs.iter().any(|f| f == candidate))
    }
}

/// Partial credit for unequal (candidate availability, posting mode) pairs.
/// Pairs not listed score zero.
#[derive(Debug, Clone)]
pub struct AvailabilityMatrix {
    entries: HashMap<(EmploymentMode, EmploymentMode), f64>,
}

impl Default for AvailabilityMatrix {
    fn default() -> Self {
        use EmploymentMode::*;
        Self {
            entries: HashMap::from([
                ((Internship, PartTime), 0.5),
                ((PartTime, Internship), 0.5),
                ((PartTime, FullTime), 0.4),
                ((FullTime, PartTime), 0.4),
                ((Contract, PartTime), 0.4),
                ((PartTime, Contract), 0.4),
                ((Contract, FullTime), 0.3),
                ((FullTime, Contract), 0.3),
                ((Internship, FullTime), 0.2),
            ]),
        }
    }
}

impl AvailabilityMatrix {
    fn compatibility(&self, candidate: EmploymentMode, posting: EmploymentMode) -> f64 {
        if candidate == posting {
            return 1.0;
        }
        self.entries.get(&(candidate, posting)).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub families: SkillFamilies,
    pub availability: AvailabilityMatrix,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

/// Per-component normalized values, exposed for rationale text and tests.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub location: f64,
    pub availability: f64,
    pub interests: f64,
    pub timeline: f64,
    pub completeness: f64,
}

/// Deterministic, side-effect-free scorer. Identical inputs always produce
/// identical output.
pub struct RuleBasedMatchScorer {
    config: MatchConfig,
}

impl RuleBasedMatchScorer {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn breakdown(&self, inputs: &MatchInputs<'_>) -> ScoreBreakdown {
        let candidate = inputs.candidate;
        let posting = inputs.posting;
        ScoreBreakdown {
            skills: skill_component(&self.config.families, &candidate.skills, &posting.required_skills),
            location: location_component(&candidate.location, &posting.location),
            availability: self
                .config
                .availability
                .compatibility(candidate.availability, posting.employment_mode),
            interests: interest_component(&candidate.interests, &inputs.organization.industry),
            timeline: timeline_component(candidate.graduation_year, inputs.as_of),
            completeness: completeness_component(candidate),
        }
    }

    pub fn compute(&self, inputs: &MatchInputs<'_>) -> u8 {
        let b = self.breakdown(inputs);
        let w = &self.config.weights;
        let total = w.skills * b.skills
            + w.location * b.location
            + w.availability * b.availability
            + w.interests * b.interests
            + w.timeline * b.timeline
            + w.completeness * b.completeness;
        (total * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn explain(&self, inputs: &MatchInputs<'_>, score: u8) -> String {
        let b = self.breakdown(inputs);
        let required = inputs.posting.required_skills.len();
        format!(
            "{score}/100 for {candidate} against \"{title}\" at {org}: \
             skills cover {skills:.0}% of {required} required; \
             location compatibility {location:.0}%; \
             availability fit {availability:.0}%; \
             interest/industry alignment {interests:.0}%; \
             graduation timeline {timeline:.0}%; \
             profile completeness {completeness:.0}%.",
            candidate = inputs.candidate.full_name,
            title = inputs.posting.title,
            org = inputs.organization.name,
            skills = b.skills * 100.0,
            location = b.location * 100.0,
            availability = b.availability * 100.0,
            interests = b.interests * 100.0,
            timeline = b.timeline * 100.0,
            completeness = b.completeness * 100.0,
        )
    }
}

#[async_trait]
impl MatchScorer for RuleBasedMatchScorer {
    async fn score(&self, inputs: &MatchInputs<'_>) -> Result<u8, AppError> {
        Ok(self.compute(inputs))
    }

    async fn rationale(&self, inputs: &MatchInputs<'_>, score: u8) -> Result<String, AppError> {
        Ok(self.explain(inputs, score))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

/// Similarity of one candidate skill to one required skill:
/// 1.0 exact (case-insensitive), 0.8 containment either direction,
/// 0.6 family implication, else 0.0.
fn skill_similarity(families: &SkillFamilies, candidate: &str, required: &str) -> f64 {
    let c = candidate.trim().to_lowercase();
    let r = required.trim().to_lowercase();
    if c.is_empty() || r.is_empty() {
        return 0.0;
    }
    if c == r {
        1.0
    } else if c.contains(&r) || r.contains(&c) {
        0.8
    } else if families.implies(&r, &c) {
        0.6
    } else {
        0.0
    }
}

/// Mean best-similarity over the required skills. No requirements → 1.0.
fn skill_component(families: &SkillFamilies, candidate_skills: &[String], required: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    let total: f64 = required
        .iter()
        .map(|r| {
            candidate_skills
                .iter()
                .map(|c| skill_similarity(families, c, r))
                .fold(0.0, f64::max)
        })
        .sum();
    total / required.len() as f64
}

/// Location never zeroes a match: physical distance alone floors at 0.3.
fn location_component(candidate: &str, posting: &str) -> f64 {
    let c = candidate.trim().to_lowercase();
    let p = posting.trim().to_lowercase();
    let remote = p.contains("remote") || p.contains("hybrid");
    if c.is_empty() || p.is_empty() {
        return if remote { 0.7 } else { 0.3 };
    }
    if c == p {
        1.0
    } else if c.contains(&p) || p.contains(&c) {
        0.8
    } else if remote {
        0.7
    } else {
        0.3
    }
}

/// Fraction of declared interests that textually relate to the industry tag.
/// No declared interests is absence of signal, not a penalty: neutral 0.5.
fn interest_component(interests: &[String], industry: &str) -> f64 {
    if interests.is_empty() {
        return 0.5;
    }
    let industry = industry.trim().to_lowercase();
    let related = interests
        .iter()
        .filter(|interest| {
            let i = interest.trim().to_lowercase();
            !i.is_empty() && !industry.is_empty() && (i.contains(&industry) || industry.contains(&i))
        })
        .count();
    related as f64 / interests.len() as f64
}

/// Rewards near-term availability: graduating this year scores highest,
/// earlier graduates lowest.
fn timeline_component(graduation_year: i32, as_of: NaiveDate) -> f64 {
    match graduation_year - as_of.year() {
        0 => 1.0,
        1 => 0.9,
        2 => 0.7,
        d if d > 2 => 0.5,
        _ => 0.3,
    }
}

/// Populated fraction of the optional-profile checklist.
fn completeness_component(candidate: &CandidateRow) -> f64 {
    let checklist = [
        candidate.bio.as_deref().is_some_and(|b| !b.trim().is_empty()),
        !candidate.skills.is_empty(),
        !candidate.interests.is_empty(),
        !candidate.document_keys.is_empty(),
        candidate.email.as_deref().is_some_and(|e| !e.trim().is_empty()),
    ];
    let populated = checklist.iter().filter(|&&present| present).count();
    populated as f64 / checklist.len() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
