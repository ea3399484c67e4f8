// src/jobs/validators.rs

use regex::Regex;
use std::collections::HashSet;

use super::models::CreateJobRequest;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Job Validators
// ============================================================================

const LINKEDIN_URL_PATTERN: &str = r"^https?://(www\.)?linkedin\.com/(company|in|pub)/.+";

pub struct JobValidator;

impl Validator<CreateJobRequest> for JobValidator {
    fn validate(&self, data: &CreateJobRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let required_fields = [
            ("job_title", &data.job_title),
            ("company_name", &data.company_name),
            ("workplace_type", &data.workplace_type),
            ("job_location", &data.job_location),
            ("employment_type", &data.employment_type),
            ("job_description", &data.job_description),
            ("industry", &data.industry),
            ("job_function", &data.job_function),
        ];

        for (field, value) in required_fields {
            if value.trim().is_empty() {
                result.add_error(field, &format!("Missing required field: {}", field));
            }
        }

        if data.skills.is_empty() {
            result.add_error("skills", "Skills must be a non-empty array");
        }

        // Only validate the enum value once the field is present at all
        if !data.workplace_type.trim().is_empty() {
            let valid_types = HashSet::from(["On-site", "Hybrid", "Remote"]);
            if !valid_types.contains(data.workplace_type.as_str()) {
                result.add_error(
                    "workplace_type",
                    "Invalid workplace_type. Must be On-site, Hybrid, or Remote",
                );
            }
        }

        if let Some(url) = &data.company_linkedin_url {
            if !url.is_empty() && !is_valid_linkedin_url(url) {
                result.add_error("company_linkedin_url", "Invalid LinkedIn URL format");
            }
        }

        if let (Some(min), Some(max)) = (data.salary_min, data.salary_max) {
            if min > max {
                result.add_error(
                    "salary_range",
                    "Salary minimum cannot be greater than maximum",
                );
            }
        }

        result
    }
}

fn is_valid_linkedin_url(url: &str) -> bool {
    // Pattern is a compile-time constant
    Regex::new(LINKEDIN_URL_PATTERN)
        .expect("LinkedIn URL pattern is valid")
        .is_match(url)
}
