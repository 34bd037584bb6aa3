use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::proposal::models::{CatalogEntry, ProposalType, ServiceType};

/// Fields accepted when creating or replacing a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub suggested_price: f64,
    #[serde(default = "default_service_type")]
    pub service_type: ServiceType,
    #[serde(default)]
    pub proposal_types: Vec<ProposalType>,
}

fn default_service_type() -> ServiceType {
    ServiceType::Basic
}

impl CatalogEntryInput {
    fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("description", &self.description),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    fn into_entry(self, id: String) -> CatalogEntry {
        CatalogEntry {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            suggested_price: self.suggested_price,
            service_type: self.service_type,
            proposal_types: self.proposal_types,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    pub proposal_type: Option<ProposalType>,
    pub service_type: Option<ServiceType>,
    pub q: Option<String>,
}

/// Case-insensitive match on name or description.
pub fn matches_search(entry: &CatalogEntry, term: &str) -> bool {
    let term = term.to_lowercase();
    entry.name.to_lowercase().contains(&term) || entry.description.to_lowercase().contains(&term)
}

/// Editable list of sellable services. Order is insertion order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ServiceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn seeded() -> Self {
        Self::new(default_services())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn list(&self, filter: &CatalogFilter) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| filter.proposal_type.map_or(true, |t| e.applies_to(t)))
            .filter(|e| filter.service_type.map_or(true, |t| e.service_type == t))
            .filter(|e| {
                filter
                    .q
                    .as_deref()
                    .filter(|q| !q.trim().is_empty())
                    .map_or(true, |q| matches_search(e, q.trim()))
            })
            .cloned()
            .collect()
    }

    /// Basic services recommended for a proposal type, in catalog order.
    pub fn basics_for(&self, proposal_type: ProposalType) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(move |e| e.service_type == ServiceType::Basic && e.applies_to(proposal_type))
    }

    pub fn create(&mut self, input: CatalogEntryInput) -> Result<CatalogEntry, AppError> {
        input.validate()?;
        let entry = input.into_entry(Uuid::new_v4().to_string());
        info!(id = %entry.id, name = %entry.name, "Catalog entry created");
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn update(&mut self, id: &str, input: CatalogEntryInput) -> Result<CatalogEntry, AppError> {
        input.validate()?;
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Service {id} not found")))?;
        *slot = input.into_entry(id.to_string());
        Ok(slot.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(AppError::NotFound(format!("Service {id} not found")));
        }
        info!(id, "Catalog entry deleted");
        Ok(())
    }

    /// Adds the proposal type to the entry's applicability, or removes it if present.
    pub fn toggle_proposal_type(
        &mut self,
        id: &str,
        proposal_type: ProposalType,
    ) -> Result<CatalogEntry, AppError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Service {id} not found")))?;

        if entry.applies_to(proposal_type) {
            entry.proposal_types.retain(|t| *t != proposal_type);
        } else {
            entry.proposal_types.push(proposal_type);
        }
        Ok(entry.clone())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Seed data
// ────────────────────────────────────────────────────────────────────────────

fn entry(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    suggested_price: f64,
    service_type: ServiceType,
    proposal_types: &[ProposalType],
) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        suggested_price,
        service_type,
        proposal_types: proposal_types.to_vec(),
    }
}

pub fn default_services() -> Vec<CatalogEntry> {
    use ProposalType::{VisualAssessment, WaterTesting};
    use ServiceType::{Additional, Basic};

    vec![
        entry(
            "1",
            "Water Spray Testing and Condition Observation Site Visit",
            "Our applied technical building envelope services includes water spray testing of exterior walls and storefronts and curtain wall. The water spray testing will be performed by two (2) of HCI's consultants with a spray wand equipped with a Monarch B-25 spray nozzle. Other items possibly to be observed are as follows:\n\
             • Exterior Wall Cladding System\n\
             • Associated Flashing, Dampproofing, Caulking, Sealing and Waterproofing\n\
             • Interface Detailing for Building Envelope Systems and Components Including Foundations and adjacent Paved Surfaces and Grades\n\
             • Waterproofing\n\
             • Determine Compatibility of Configuration with Desired Architectural Detailing\n\
             • Address Miscellaneous Weathertightness Issues",
            "water-testing",
            3500.0,
            Basic,
            &[WaterTesting],
        ),
        entry(
            "2",
            "Site Visit Condition Observation Report",
            "Comprehensive written documentation of all site conditions observed during the inspection visit, including detailed findings, observations, and preliminary assessments of building envelope performance and potential issues.",
            "water-testing",
            1200.0,
            Basic,
            &[WaterTesting],
        ),
        entry(
            "3",
            "Captioned Photo Report",
            "Professional photographic documentation with detailed captions describing observed conditions, deficiencies, and areas of concern. Photos will be organized and labeled to correspond with written findings and recommendations.",
            "water-testing",
            800.0,
            Basic,
            &[WaterTesting],
        ),
        entry(
            "4",
            "Typical Phone, Video and E-mail Correspondence",
            "Ongoing communication and consultation services including phone calls, video conferences, and email correspondence to discuss findings, answer questions, and provide technical guidance throughout the project duration.",
            "water-testing",
            600.0,
            Basic,
            &[WaterTesting],
        ),
        entry(
            "5",
            "Visual Assessment",
            "A. Interview Individuals Knowledgeable of Roof Repairs and History. View the Underside of Decking Where Exposed and Current Roofing Conditions.\n\
             B. Captioned Condition Photo Report to Document Conditions Observed.\n\
             C. Concise Executive Summary Condition Observation Report to Offer Recommended Remedial Actions.\n\
             D. Discuss Condition Observations and Recommendations with Client and Answer Questions.\n\
             E. Typical Phone, Video, and Email Correspondence",
            "visual-assessment",
            2500.0,
            Basic,
            &[VisualAssessment],
        ),
        entry(
            "6",
            "Additional Service 1",
            "Placeholder service that can be customized for specific project requirements. Edit this service to match your project needs.",
            "additional",
            1000.0,
            Additional,
            &[],
        ),
        entry(
            "7",
            "Additional Service 2",
            "Another placeholder service for project-specific requirements. Customize the name, description, and pricing as needed.",
            "additional",
            1500.0,
            Additional,
            &[],
        ),
    ]
}
