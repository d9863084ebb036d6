//! Plain-text import/export boundary for the company-research workflow.
//!
//! The import format is deliberately simple: one record per line, optional
//! header line, comma-split fields with surrounding quotes stripped. This is
//! not an RFC 4180 parser; commas or quotes embedded inside a field are not
//! handled.

use crate::models::prospectmodel::Prospect;

/// First-field words that mark a leading line as a header to be skipped.
const HEADER_WORDS: [&str; 6] = ["company", "name", "domain", "website", "url", "linkedin"];

/// How a raw company identifier should be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyIdentifier {
    Name(String),
    Domain(String),
    LinkedinUrl(String),
}

impl CompanyIdentifier {
    /// Route an identifier to a lookup path: LinkedIn URLs first, then
    /// anything with a dot is treated as a domain, the rest as a name.
    pub fn parse(raw: &str) -> CompanyIdentifier {
        let value = raw.trim().to_string();
        if value.contains("linkedin.com") {
            CompanyIdentifier::LinkedinUrl(value)
        } else if value.contains('.') {
            CompanyIdentifier::Domain(value)
        } else {
            CompanyIdentifier::Name(value)
        }
    }
}

/// Parse a pasted or uploaded company list into lookup identifiers.
pub fn parse_company_list(input: &str) -> Vec<CompanyIdentifier> {
    let mut identifiers = Vec::new();
    let mut first_line = true;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<String> = line.split(',').map(strip_quotes).collect();

        if first_line {
            first_line = false;
            if is_header_line(&fields) {
                continue;
            }
        }

        if let Some(value) = fields.iter().find(|f| !f.is_empty()) {
            identifiers.push(CompanyIdentifier::parse(value));
        }
    }

    identifiers
}

fn is_header_line(fields: &[String]) -> bool {
    fields
        .first()
        .map(|f| HEADER_WORDS.contains(&f.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn strip_quotes(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

/// Export prospects with a static column set, every field quote-wrapped.
pub fn export_prospects(prospects: &[Prospect]) -> String {
    let mut out = String::from("\"Company\",\"Domain\",\"LinkedIn URL\",\"Created At\"\n");

    for prospect in prospects {
        let row = [
            prospect.company_name.clone().unwrap_or_default(),
            prospect.domain.clone().unwrap_or_default(),
            prospect.linkedin_url.clone().unwrap_or_default(),
            prospect.created_at.to_rfc3339(),
        ];
        let line: Vec<String> = row.iter().map(|f| format!("\"{}\"", f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_routes_name_domain_and_linkedin() {
        let parsed = parse_company_list("Acme Corp\nacme.com\nlinkedin.com/company/acme");

        assert_eq!(
            parsed,
            vec![
                CompanyIdentifier::Name("Acme Corp".to_string()),
                CompanyIdentifier::Domain("acme.com".to_string()),
                CompanyIdentifier::LinkedinUrl("linkedin.com/company/acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_line_is_skipped() {
        let parsed = parse_company_list("Company,Website\nAcme Corp,acme.com");
        assert_eq!(parsed, vec![CompanyIdentifier::Name("Acme Corp".to_string())]);
    }

    #[test]
    fn test_non_header_first_line_is_kept() {
        let parsed = parse_company_list("Acme Corp,acme.com\nGlobex");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], CompanyIdentifier::Name("Acme Corp".to_string()));
    }

    #[test]
    fn test_quotes_are_stripped() {
        let parsed = parse_company_list("\"Acme Corp\"\n\"acme.com\"");
        assert_eq!(
            parsed,
            vec![
                CompanyIdentifier::Name("Acme Corp".to_string()),
                CompanyIdentifier::Domain("acme.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let parsed = parse_company_list("\n\nAcme Corp\n\n");
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_export_wraps_every_field_in_quotes() {
        let prospects = vec![Prospect {
            id: Uuid::new_v4(),
            company_name: Some("Acme Corp".to_string()),
            domain: Some("acme.com".to_string()),
            linkedin_url: None,
            created_by: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
        }];

        let csv = export_prospects(&prospects);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"Company\",\"Domain\",\"LinkedIn URL\",\"Created At\""
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Acme Corp\",\"acme.com\",\"\","));
    }
}
