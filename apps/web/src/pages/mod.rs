// Askama page templates and the view state they render.

use askama::Template;

use crate::analysis::report::AnalysisReport;
use crate::upload::PdfUpload;

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    /// Empty when there is nothing to report.
    pub error: String,
    pub max_upload_mb: usize,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub report: AnalysisReport,
    pub file_name: String,
    pub size_label: String,
}

/// What the single page currently shows. "Analyzing" never reaches a page:
/// it only exists as the in-flight gate while the request is open.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Upload { error: Option<String> },
    Results {
        report: AnalysisReport,
        file_name: String,
        size_label: String,
    },
}

impl PageView {
    pub fn idle() -> Self {
        PageView::Upload { error: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        PageView::Upload {
            error: Some(message.into()),
        }
    }

    pub fn results(report: AnalysisReport, upload: &PdfUpload) -> Self {
        PageView::Results {
            report,
            file_name: upload.file_name.clone(),
            size_label: upload.size_label(),
        }
    }

    pub fn render(self, max_upload_mb: usize) -> Result<String, askama::Error> {
        match self {
            PageView::Upload { error } => UploadTemplate {
                error: error.unwrap_or_default(),
                max_upload_mb,
            }
            .render(),
            PageView::Results {
                report,
                file_name,
                size_label,
            } => ResultsTemplate {
                report,
                file_name,
                size_label,
            }
            .render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{ExtractedData, ProfileResponse};
    use bytes::Bytes;

    fn upload() -> PdfUpload {
        PdfUpload {
            file_name: "jane.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    fn report(ai_analysis: &str, skills: Vec<String>) -> AnalysisReport {
        AnalysisReport::build(ProfileResponse {
            extracted_data: ExtractedData {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-123-4567".to_string(),
                work_history: vec![],
                skills,
            },
            ai_analysis: ai_analysis.to_string(),
        })
    }

    #[test]
    fn test_idle_page_has_upload_form_and_no_banner() {
        let html = PageView::idle().render(10).unwrap();
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("name=\"file\""));
        assert!(html.contains("up to 10 MB"));
        assert!(!html.contains("Analysis Failed"));
    }

    #[test]
    fn test_failed_page_shows_banner() {
        let html = PageView::failed("Failed to analyze CV").render(10).unwrap();
        assert!(html.contains("Analysis Failed"));
        assert!(html.contains("Failed to analyze CV"));
    }

    #[test]
    fn test_results_page_shows_only_present_sections() {
        let text = "OVERALL_SCORE: 81\nSTRENGTHS:\n1. Concise summary\nCONSISTENCY_CHECK: No issues found";
        let view = PageView::results(report(text, vec!["Python".to_string()]), &upload());
        let html = view.render(10).unwrap();

        assert!(html.contains("Overall Score"));
        assert!(html.contains("Concise summary"));
        assert!(html.contains("Consistency Check"));
        assert!(html.contains("Python"));
        assert!(html.contains("Detailed Analysis"));
        assert!(html.contains("No work history found"));
        assert!(!html.contains("Areas for Improvement"));
        assert!(!html.contains("Recommended Keywords"));
        assert!(html.contains("0.00 MB"));
    }

    #[test]
    fn test_results_page_without_sections_still_shows_raw_text() {
        let view = PageView::results(report("Plain evaluation text", vec![]), &upload());
        let html = view.render(10).unwrap();
        assert!(!html.contains("Overall Score"));
        assert!(html.contains("Plain evaluation text"));
        assert!(html.contains("No skills identified"));
    }

    #[test]
    fn test_results_page_escapes_upstream_text() {
        let view = PageView::results(report("<script>alert(1)</script>", vec![]), &upload());
        let html = view.render(10).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
