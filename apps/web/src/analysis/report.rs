use serde::Serialize;

use crate::analysis::sections::{extract, ParsedSections};
use crate::models::profile::{ExtractedData, ProfileResponse};

pub const NO_WORK_HISTORY: &str = "No work history found";
pub const NO_SKILLS: &str = "No skills identified";

/// Everything the results view needs for one analysed résumé.
/// Built once per upstream response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub extracted_data: ExtractedData,
    pub sections: ParsedSections,
    /// The unparsed AI text, always shown as the detailed view.
    pub raw_analysis: String,
}

impl AnalysisReport {
    pub fn build(profile: ProfileResponse) -> Self {
        let sections = extract(&profile.ai_analysis);
        Self {
            extracted_data: profile.extracted_data,
            sections,
            raw_analysis: profile.ai_analysis,
        }
    }

    pub fn has_score(&self) -> bool {
        !self.sections.score.is_empty()
    }

    /// The breakdown is only shown alongside a score.
    pub fn has_breakdown(&self) -> bool {
        self.has_score() && !self.sections.breakdown.is_empty()
    }

    pub fn has_consistency(&self) -> bool {
        !self.sections.consistency.is_empty()
    }

    pub fn has_work_history(&self) -> bool {
        !self.extracted_data.work_history.is_empty()
    }

    pub fn has_skills(&self) -> bool {
        !self.extracted_data.skills.is_empty()
    }

    pub fn work_history_placeholder(&self) -> &'static str {
        NO_WORK_HISTORY
    }

    pub fn skills_placeholder(&self) -> &'static str {
        NO_SKILLS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(ai_analysis: &str) -> ProfileResponse {
        ProfileResponse {
            extracted_data: ExtractedData {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-123-4567".to_string(),
                work_history: vec!["Data Analyst 2018-2021".to_string()],
                skills: vec![],
            },
            ai_analysis: ai_analysis.to_string(),
        }
    }

    #[test]
    fn test_build_parses_sections_and_keeps_raw_text() {
        let text = "OVERALL_SCORE: 72/100\nSCORE_BREAKDOWN: Experience: 18/25\nSTRENGTHS:\n1. SQL depth";
        let report = AnalysisReport::build(profile(text));
        assert_eq!(report.sections.score, "72/100");
        assert_eq!(report.sections.strengths, vec!["SQL depth"]);
        assert_eq!(report.raw_analysis, text);
        assert_eq!(report.extracted_data.name, "Jane Doe");
        assert!(report.has_score());
        assert!(report.has_breakdown());
        assert!(!report.has_consistency());
    }

    #[test]
    fn test_breakdown_hidden_without_score() {
        let report = AnalysisReport::build(profile("SCORE_BREAKDOWN: Skills: 10/25"));
        assert!(!report.has_score());
        assert!(!report.has_breakdown());
        assert_eq!(report.sections.breakdown, "Skills: 10/25");
    }

    #[test]
    fn test_unstructured_analysis_still_builds() {
        let text = "AI analysis unavailable: quota exceeded. Please check your API key configuration.";
        let report = AnalysisReport::build(profile(text));
        assert!(report.sections.is_empty());
        assert_eq!(report.raw_analysis, text);
    }

    #[test]
    fn test_empty_lists_report_placeholders() {
        let report = AnalysisReport::build(profile(""));
        assert!(report.has_work_history());
        assert!(!report.has_skills());
        assert_eq!(report.skills_placeholder(), "No skills identified");
        assert_eq!(report.work_history_placeholder(), "No work history found");
    }
}
