//! Rule-based posting quality — fixed point values over a six-item
//! checklist, capped at 10, plus templated description enhancement keyed
//! off exactly the items that failed.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::posting::PostingRow;
use crate::quality::{QualityReport, QualityScorer};

const MIN_DESCRIPTION_CHARS: usize = 200;
const MIN_REQUIRED_SKILLS: usize = 3;

/// Phrases that signal inclusive, welcoming language.
const INCLUSIVE_MARKERS: &[&str] = &[
    "all backgrounds",
    "diverse",
    "inclusive",
    "equal opportunity",
    "encourage you to apply",
    "accessibility",
];

/// Phrases flagged as biased or exclusionary.
const BIASED_MARKERS: &[&str] = &[
    "rockstar",
    "ninja",
    "guru",
    "young and energetic",
    "work hard play hard",
    "aggressive",
];

const INCLUSIVITY_STATEMENT: &str = "\
We welcome applicants of all backgrounds and experiences. If you need any \
adjustments during the application process, let us know and we will make \
them happen.";

const CULTURE_BENEFITS_STATEMENT: &str = "\
About the team: you will join a supportive group that invests in graduate \
development, with regular mentoring, a learning budget, and flexible \
working arrangements.";

const APPLICATION_INSTRUCTIONS: &str = "\
To apply, submit your CV and a short note about what interests you in the \
role through the platform. Applications are reviewed as they arrive.";

/// Which checklist items a posting satisfied. Point values are fixed
/// business rules; the sum of all six is exactly 10.
#[derive(Debug, Clone, Copy)]
pub struct QualityChecklist {
    pub long_description: bool,
    pub enough_skills: bool,
    pub salary_band: bool,
    pub deadline: bool,
    pub inclusive_language: bool,
    pub no_biased_language: bool,
}

impl QualityChecklist {
    pub fn evaluate(posting: &PostingRow) -> Self {
        let description = posting.description.to_lowercase();
        Self {
            long_description: posting.description.chars().count() >= MIN_DESCRIPTION_CHARS,
            enough_skills: posting.required_skills.len() >= MIN_REQUIRED_SKILLS,
            salary_band: posting.has_valid_salary_band(),
            deadline: posting.deadline.is_some(),
            inclusive_language: INCLUSIVE_MARKERS.iter().any(|m| description.contains(m)),
            no_biased_language: !BIASED_MARKERS.iter().any(|m| description.contains(m)),
        }
    }

    pub fn score(&self) -> i16 {
        let mut score = 0;
        if self.long_description {
            score += 2;
        }
        if self.enough_skills {
            score += 2;
        }
        if self.salary_band {
            score += 2;
        }
        if self.deadline {
            score += 1;
        }
        if self.inclusive_language {
            score += 2;
        }
        if self.no_biased_language {
            score += 1;
        }
        score.min(10)
    }
}

#[derive(Default)]
pub struct RuleBasedQualityScorer;

impl RuleBasedQualityScorer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QualityScorer for RuleBasedQualityScorer {
    async fn assess(&self, posting: &PostingRow) -> Result<QualityReport, AppError> {
        let checklist = QualityChecklist::evaluate(posting);

        let mut notes = Vec::new();
        let mut suggestions = Vec::new();

        if !checklist.long_description {
            notes.push(format!(
                "description is under {MIN_DESCRIPTION_CHARS} characters"
            ));
            suggestions.push(
                "Expand the description with day-to-day responsibilities and team context"
                    .to_string(),
            );
        }
        if !checklist.enough_skills {
            notes.push(format!(
                "fewer than {MIN_REQUIRED_SKILLS} required skills are specified"
            ));
            suggestions.push("List the concrete skills a successful applicant needs".to_string());
        }
        if !checklist.salary_band {
            notes.push("no valid salary range is provided".to_string());
            suggestions.push("Add a salary range with minimum and maximum".to_string());
        }
        if !checklist.deadline {
            notes.push("no application deadline is set".to_string());
            suggestions.push("Set an application deadline".to_string());
        }
        if !checklist.inclusive_language {
            notes.push("no inclusive-language markers found".to_string());
            suggestions.push("Add an inclusivity statement".to_string());
        }
        if !checklist.no_biased_language {
            notes.push("description contains flagged biased language".to_string());
            suggestions
                .push("Remove buzzwords like \"rockstar\" or \"ninja\" from the description".to_string());
        }

        Ok(QualityReport {
            score: checklist.score(),
            notes,
            suggestions,
        })
    }

    async fn enhance_description(
        &self,
        posting: &PostingRow,
        _report: &QualityReport,
    ) -> Result<String, AppError> {
        let checklist = QualityChecklist::evaluate(posting);
        let mut enhanced = posting.description.trim_end().to_string();

        if !checklist.long_description {
            enhanced.push_str("\n\n");
            enhanced.push_str(CULTURE_BENEFITS_STATEMENT);
        }
        if !checklist.inclusive_language {
            enhanced.push_str("\n\n");
            enhanced.push_str(INCLUSIVITY_STATEMENT);
        }
        if !checklist.deadline {
            enhanced.push_str("\n\n");
            enhanced.push_str(APPLICATION_INSTRUCTIONS);
        }

        Ok(enhanced)
    }
}
