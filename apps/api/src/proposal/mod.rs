//! Proposal drafts: data model, service catalog, line-item selection, section
//! validation and reimbursable arithmetic.
pub mod catalog;
pub mod expenses;
pub mod handlers;
pub mod models;
pub mod selection;
pub mod store;
pub mod text;
pub mod validation;

use catalog::ServiceCatalog;
use models::{ProposalDocument, ProposalPatch};

/// Applies a partial update. Setting the proposal type goes through
/// [`selection::apply_proposal_type`] so the service list follows it.
pub fn apply_patch(doc: &mut ProposalDocument, patch: ProposalPatch, catalog: &ServiceCatalog) {
    if let Some(header) = patch.header {
        doc.header = header;
    }
    if let Some(payment_type) = patch.payment_type {
        doc.payment_type = payment_type;
    }
    if let Some(mut client) = patch.client {
        client.phone = text::format_phone_number(&client.phone);
        doc.client = client;
    }
    if let Some(project) = patch.project {
        doc.project = project;
    }
    if let Some(reimbursables) = patch.reimbursables {
        doc.reimbursables = reimbursables;
    }
    if let Some(rates) = patch.hourly_rates {
        doc.hourly_rates = rates;
    }
    if let Some(risk) = patch.risk_allocation {
        doc.risk_allocation = risk;
    }
    if let Some(notes) = patch.additional_notes {
        doc.additional_notes = notes;
    }
    if let Some(proposal_type) = patch.proposal_type {
        selection::apply_proposal_type(doc, proposal_type, catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ClientInfo, PaymentType, ProposalType};

    #[test]
    fn test_patch_sets_only_given_sections() {
        let catalog = ServiceCatalog::seeded();
        let mut doc = ProposalDocument::default();
        doc.header.date = "March 3, 2025".to_string();

        let patch: ProposalPatch = serde_json::from_value(serde_json::json!({
            "payment_type": "lump-sum",
            "client": { "company_name": "Acme", "phone": "205-663-2220" }
        }))
        .unwrap();
        apply_patch(&mut doc, patch, &catalog);

        assert_eq!(doc.header.date, "March 3, 2025");
        assert_eq!(doc.payment_type, Some(PaymentType::LumpSum));
        assert_eq!(
            doc.client,
            ClientInfo {
                company_name: "Acme".to_string(),
                phone: "(205) 663-2220".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_patch_proposal_type_reselects_services() {
        let catalog = ServiceCatalog::seeded();
        let mut doc = ProposalDocument::default();

        let patch: ProposalPatch =
            serde_json::from_str(r#"{"proposal_type":"water-testing"}"#).unwrap();
        apply_patch(&mut doc, patch, &catalog);
        assert_eq!(doc.proposal_type, Some(ProposalType::WaterTesting));
        assert_eq!(doc.selected_services.len(), 4);

        // Unrelated patches leave the selection alone.
        let patch: ProposalPatch = serde_json::from_str(r#"{"additional_notes":"x"}"#).unwrap();
        apply_patch(&mut doc, patch, &catalog);
        assert_eq!(doc.selected_services.len(), 4);

        let patch: ProposalPatch = serde_json::from_str(r#"{"proposal_type":null}"#).unwrap();
        apply_patch(&mut doc, patch, &catalog);
        assert!(doc.selected_services.is_empty());
    }
}
