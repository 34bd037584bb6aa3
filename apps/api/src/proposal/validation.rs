use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::proposal::models::ProposalDocument;

lazy_static! {
    static ref HAS_DIGIT: Regex = Regex::new(r"\d+").unwrap();
    static ref HAS_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();
    /// "City, ST"
    static ref CITY_STATE: Regex = Regex::new(r"[a-zA-Z]+\s*,\s*[A-Z]{2}").unwrap();
    static ref ZIP_CODE: Regex = Regex::new(r"\d{5}(-\d{4})?").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A usable street address: a number, a street name, "City, ST" and a ZIP code.
pub fn is_valid_address(address: &str) -> bool {
    !address.is_empty()
        && HAS_DIGIT.is_match(address)
        && HAS_LETTER.is_match(address)
        && CITY_STATE.is_match(address)
        && ZIP_CODE.is_match(address)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Header,
    ProposalType,
    Client,
    Project,
    Services,
    Reimbursables,
    Generate,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Header,
        Section::ProposalType,
        Section::Client,
        Section::Project,
        Section::Services,
        Section::Reimbursables,
        Section::Generate,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::ProposalType => "proposal-type",
            Section::Client => "client",
            Section::Project => "project",
            Section::Services => "services",
            Section::Reimbursables => "reimbursables",
            Section::Generate => "generate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionValidation {
    pub section: Section,
    pub is_valid: bool,
    pub is_complete: bool,
    pub required_fields: Vec<String>,
    pub completed_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub sections: Vec<SectionValidation>,
    /// Completed sections as a rounded percentage of all sections.
    pub progress: u32,
}

/// Required fields paired with whether each is satisfied.
fn fields(section: Section, checks: &[(&str, bool)], min_valid: usize) -> SectionValidation {
    let required_fields: Vec<String> = checks.iter().map(|(name, _)| name.to_string()).collect();
    let completed_fields: Vec<String> = checks
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(name, _)| name.to_string())
        .collect();
    SectionValidation {
        section,
        is_valid: completed_fields.len() >= min_valid,
        is_complete: completed_fields.len() == required_fields.len(),
        required_fields,
        completed_fields,
    }
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

pub fn validate_section(doc: &ProposalDocument, section: Section) -> SectionValidation {
    match section {
        Section::Header => fields(
            section,
            &[
                ("date", filled(&doc.header.date)),
                ("proposalTitle", filled(&doc.header.proposal_title)),
            ],
            1,
        ),
        Section::ProposalType => fields(
            section,
            &[
                ("proposalType", doc.proposal_type.is_some()),
                ("paymentType", doc.payment_type.is_some()),
            ],
            1,
        ),
        Section::Client => {
            let c = &doc.client;
            fields(
                section,
                &[
                    ("companyName", filled(&c.company_name)),
                    ("clientTitle", filled(&c.client_title)),
                    ("firstName", filled(&c.first_name)),
                    ("lastName", filled(&c.last_name)),
                    ("email", is_valid_email(&c.email)),
                    ("address", is_valid_address(&c.address)),
                ],
                3,
            )
        }
        Section::Project => fields(
            section,
            &[
                ("name", filled(&doc.project.name)),
                (
                    "location",
                    doc.project.use_company_address || is_valid_address(&doc.project.location),
                ),
            ],
            1,
        ),
        Section::Services => fields(
            section,
            &[("selectedServices", !doc.selected_services.is_empty())],
            1,
        ),
        Section::Reimbursables => {
            let r = &doc.reimbursables;
            if !r.needed {
                return SectionValidation {
                    section,
                    is_valid: true,
                    is_complete: true,
                    required_fields: Vec::new(),
                    completed_fields: Vec::new(),
                };
            }
            let has_travel =
                r.mileage.miles > 0.0 || (r.mileage.is_flying && r.mileage.flight_cost > 0.0);
            fields(section, &[("reimbursables", has_travel)], 1)
        }
        Section::Generate => {
            let others: Vec<SectionValidation> = Section::ALL
                .iter()
                .filter(|s| **s != Section::Generate)
                .map(|s| validate_section(doc, *s))
                .collect();
            let completed: Vec<String> = others
                .iter()
                .filter(|v| v.is_complete)
                .map(|v| v.section.id().to_string())
                .collect();
            SectionValidation {
                section,
                is_valid: completed.len() == others.len(),
                is_complete: false,
                required_fields: others.iter().map(|v| v.section.id().to_string()).collect(),
                completed_fields: completed,
            }
        }
    }
}

pub fn validate_document(doc: &ProposalDocument) -> ValidationReport {
    let sections: Vec<SectionValidation> = Section::ALL
        .iter()
        .map(|s| validate_section(doc, *s))
        .collect();
    let complete = sections.iter().filter(|s| s.is_complete).count();
    let progress = (complete as f64 / sections.len() as f64 * 100.0).round() as u32;
    ValidationReport { sections, progress }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::catalog::ServiceCatalog;
    use crate::proposal::models::{PaymentType, ProposalType};
    use crate::proposal::selection::apply_proposal_type;

    fn complete_doc() -> ProposalDocument {
        let mut doc = ProposalDocument::default();
        doc.header.date = "March 3, 2025".to_string();
        doc.header.proposal_title = "Water Testing Proposal".to_string();
        doc.payment_type = Some(PaymentType::Hourly);
        doc.client.company_name = "Acme Builders".to_string();
        doc.client.client_title = "Mr.".to_string();
        doc.client.first_name = "Sam".to_string();
        doc.client.last_name = "Reed".to_string();
        doc.client.email = "sam@acme.test".to_string();
        doc.client.address = "100 Main St, Birmingham, AL 35203".to_string();
        doc.project.name = "Oak Tower".to_string();
        doc.project.use_company_address = true;
        doc.reimbursables.mileage.miles = 25.0;
        apply_proposal_type(
            &mut doc,
            Some(ProposalType::WaterTesting),
            &ServiceCatalog::seeded(),
        );
        doc
    }

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("100 Main St, Birmingham, AL 35203"));
        assert!(is_valid_address("947 1st Avenue West, Alabaster, AL 35007-1234"));
        assert!(!is_valid_address("100 Main St, Birmingham, Alabama"));
        assert!(!is_valid_address("Main St, Birmingham, AL"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
    }

    #[test]
    fn test_client_valid_with_three_fields() {
        let mut doc = ProposalDocument::default();
        doc.client.company_name = "Acme".to_string();
        doc.client.first_name = "Sam".to_string();
        let v = validate_section(&doc, Section::Client);
        assert!(!v.is_valid);

        doc.client.email = "sam@acme.test".to_string();
        let v = validate_section(&doc, Section::Client);
        assert!(v.is_valid);
        assert!(!v.is_complete);
        assert_eq!(v.completed_fields, vec!["companyName", "firstName", "email"]);
        assert_eq!(v.required_fields.len(), 6);
    }

    #[test]
    fn test_project_location_satisfied_by_company_address() {
        let mut doc = ProposalDocument::default();
        doc.project.name = "Oak Tower".to_string();
        assert!(!validate_section(&doc, Section::Project).is_complete);
        doc.project.use_company_address = true;
        assert!(validate_section(&doc, Section::Project).is_complete);
    }

    #[test]
    fn test_reimbursables_rules() {
        let mut doc = ProposalDocument::default();
        assert!(!validate_section(&doc, Section::Reimbursables).is_complete);

        doc.reimbursables.mileage.is_flying = true;
        doc.reimbursables.mileage.flight_cost = 300.0;
        assert!(validate_section(&doc, Section::Reimbursables).is_complete);

        let mut skipped = ProposalDocument::default();
        skipped.reimbursables.needed = false;
        let v = validate_section(&skipped, Section::Reimbursables);
        assert!(v.is_complete && v.required_fields.is_empty());
    }

    #[test]
    fn test_generate_valid_only_when_others_complete() {
        let doc = complete_doc();
        let v = validate_section(&doc, Section::Generate);
        assert!(v.is_valid);
        assert!(!v.is_complete);
        assert_eq!(v.completed_fields.len(), 6);

        let mut partial = complete_doc();
        partial.header.date.clear();
        assert!(!validate_section(&partial, Section::Generate).is_valid);
    }

    #[test]
    fn test_progress() {
        assert_eq!(validate_document(&complete_doc()).progress, 86);

        let empty = validate_document(&ProposalDocument::default());
        assert_eq!(empty.progress, 0);
        assert_eq!(empty.sections.len(), 7);
    }
}
