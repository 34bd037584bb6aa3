use serde::Deserialize;

use crate::errors::AppError;
use crate::proposal::catalog::{matches_search, ServiceCatalog};
use crate::proposal::models::{CatalogEntry, LineItem, ProposalDocument, ProposalType};

/// Sets the proposal type and replaces the selection with the type's basic services.
/// Clearing the type clears the selection.
pub fn apply_proposal_type(
    doc: &mut ProposalDocument,
    proposal_type: Option<ProposalType>,
    catalog: &ServiceCatalog,
) {
    doc.proposal_type = proposal_type;
    doc.selected_services = match proposal_type {
        Some(t) => catalog.basics_for(t).map(LineItem::from).collect(),
        None => Vec::new(),
    };
}

/// Snapshots a catalog entry onto the proposal at its suggested price.
pub fn add_line_item(
    doc: &mut ProposalDocument,
    catalog: &ServiceCatalog,
    service_id: &str,
) -> Result<LineItem, AppError> {
    let entry = catalog
        .get(service_id)
        .ok_or_else(|| AppError::NotFound(format!("Service {service_id} not found")))?;

    if doc.line_item(service_id).is_some() {
        return Err(AppError::UnprocessableEntity(format!(
            "Service {service_id} is already on this proposal"
        )));
    }

    let item = LineItem::from(entry);
    doc.selected_services.push(item.clone());
    Ok(item)
}

pub fn remove_line_item(doc: &mut ProposalDocument, service_id: &str) -> Result<(), AppError> {
    let before = doc.selected_services.len();
    doc.selected_services.retain(|s| s.id != service_id);
    if doc.selected_services.len() == before {
        return Err(AppError::NotFound(format!(
            "Service {service_id} is not on this proposal"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemEdit {
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Edits the proposal's copy only; the catalog entry is untouched.
pub fn update_line_item(
    doc: &mut ProposalDocument,
    service_id: &str,
    edit: LineItemEdit,
) -> Result<LineItem, AppError> {
    let item = doc
        .selected_services
        .iter_mut()
        .find(|s| s.id == service_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Service {service_id} is not on this proposal"))
        })?;

    if let Some(description) = edit.description {
        item.description = description;
    }
    if let Some(price) = edit.price {
        item.price = price;
    }
    Ok(item.clone())
}

/// Catalog entries not yet on the proposal, optionally narrowed by a search term.
pub fn available_services(
    doc: &ProposalDocument,
    catalog: &ServiceCatalog,
    search: Option<&str>,
) -> Vec<CatalogEntry> {
    catalog
        .entries()
        .iter()
        .filter(|e| doc.line_item(&e.id).is_none())
        .filter(|e| {
            search
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map_or(true, |q| matches_search(e, q))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::models::ServiceType;

    fn doc_with_type(t: ProposalType) -> (ProposalDocument, ServiceCatalog) {
        let catalog = ServiceCatalog::seeded();
        let mut doc = ProposalDocument::default();
        apply_proposal_type(&mut doc, Some(t), &catalog);
        (doc, catalog)
    }

    #[test]
    fn test_proposal_type_selects_basic_services() {
        let (doc, _) = doc_with_type(ProposalType::WaterTesting);
        let ids: Vec<&str> = doc.selected_services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(doc.total_service_cost(), 6100.0);
        assert!(doc
            .selected_services
            .iter()
            .all(|s| s.service_type == ServiceType::Basic && s.price == s.original_price));
    }

    #[test]
    fn test_switching_type_replaces_selection() {
        let (mut doc, catalog) = doc_with_type(ProposalType::WaterTesting);
        add_line_item(&mut doc, &catalog, "6").unwrap();
        apply_proposal_type(&mut doc, Some(ProposalType::VisualAssessment), &catalog);
        let ids: Vec<&str> = doc.selected_services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);

        apply_proposal_type(&mut doc, None, &catalog);
        assert!(doc.selected_services.is_empty());
        assert!(doc.proposal_type.is_none());
    }

    #[test]
    fn test_add_then_remove_restores_selection() {
        let (mut doc, catalog) = doc_with_type(ProposalType::VisualAssessment);
        let before = doc.selected_services.clone();

        add_line_item(&mut doc, &catalog, "7").unwrap();
        assert_eq!(doc.selected_services.len(), before.len() + 1);
        remove_line_item(&mut doc, "7").unwrap();

        assert_eq!(doc.selected_services, before);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let (mut doc, catalog) = doc_with_type(ProposalType::VisualAssessment);
        let err = add_line_item(&mut doc, &catalog, "5").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_unknown_ids() {
        let (mut doc, catalog) = doc_with_type(ProposalType::VisualAssessment);
        assert!(matches!(
            add_line_item(&mut doc, &catalog, "99"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            remove_line_item(&mut doc, "1"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_editing_line_item_leaves_catalog_alone() {
        let (mut doc, catalog) = doc_with_type(ProposalType::WaterTesting);
        let catalog_before = catalog.get("2").cloned().unwrap();

        let edited = update_line_item(
            &mut doc,
            "2",
            LineItemEdit {
                description: Some("Short report".to_string()),
                price: Some(950.0),
            },
        )
        .unwrap();

        assert_eq!(edited.price, 950.0);
        assert_eq!(edited.original_price, 1200.0);
        assert_eq!(edited.original_description, catalog_before.description);
        assert_eq!(catalog.get("2").unwrap(), &catalog_before);
    }

    #[test]
    fn test_catalog_edit_does_not_touch_line_item() {
        let (mut doc, mut catalog) = doc_with_type(ProposalType::VisualAssessment);
        add_line_item(&mut doc, &catalog, "6").unwrap();
        catalog.delete("6").unwrap();
        assert_eq!(doc.line_item("6").unwrap().name, "Additional Service 1");
    }

    #[test]
    fn test_available_services_excludes_selected() {
        let (doc, catalog) = doc_with_type(ProposalType::WaterTesting);
        let ids: Vec<String> = available_services(&doc, &catalog, None)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["5", "6", "7"]);

        let searched = available_services(&doc, &catalog, Some("placeholder"));
        assert_eq!(searched.len(), 2);
    }
}
