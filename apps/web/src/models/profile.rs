use serde::{Deserialize, Serialize};

/// Résumé fields pre-parsed by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub work_history: Vec<String>,
    pub skills: Vec<String>,
}

/// Body of a successful `POST /api/profile` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileResponse {
    pub extracted_data: ExtractedData,
    pub ai_analysis: String,
}

/// Body of a failed `POST /api/profile` response.
#[derive(Debug, Deserialize)]
pub struct ProfileErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_response_full_deserializes_correctly() {
        let json = r#"{
            "extracted_data": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "phone": "555-123-4567",
                "work_history": ["Senior Engineer, Acme 2019-2023"],
                "skills": ["Python", "Sql"]
            },
            "ai_analysis": "OVERALL_SCORE: 80/100"
        }"#;

        let parsed: ProfileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.extracted_data.name, "Jane Doe");
        assert_eq!(parsed.extracted_data.email, "jane@example.com");
        assert_eq!(parsed.extracted_data.work_history.len(), 1);
        assert_eq!(parsed.extracted_data.skills, vec!["Python", "Sql"]);
        assert_eq!(parsed.ai_analysis, "OVERALL_SCORE: 80/100");
    }

    #[test]
    fn test_profile_response_missing_fields_default() {
        let json = r#"{"extracted_data": {"name": "Only Name"}}"#;
        let parsed: ProfileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.extracted_data.name, "Only Name");
        assert!(parsed.extracted_data.email.is_empty());
        assert!(parsed.extracted_data.skills.is_empty());
        assert!(parsed.ai_analysis.is_empty());
    }

    #[test]
    fn test_profile_error_body_deserializes() {
        let body: ProfileErrorBody = serde_json::from_str(r#"{"error": "No file provided"}"#).unwrap();
        assert_eq!(body.error, "No file provided");
    }
}
