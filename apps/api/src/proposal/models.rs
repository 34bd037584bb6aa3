use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Proposal / payment kinds
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalType {
    WaterTesting,
    VisualAssessment,
}

impl ProposalType {
    pub fn display_text(&self) -> &'static str {
        match self {
            ProposalType::WaterTesting => "Water Testing Services",
            ProposalType::VisualAssessment => "Visual Assessment Services",
        }
    }
}

pub const FALLBACK_PROPOSAL_TYPE_TEXT: &str = "Building Envelope Consulting Services";

pub fn proposal_type_text(proposal_type: Option<ProposalType>) -> &'static str {
    proposal_type.map_or(FALLBACK_PROPOSAL_TYPE_TEXT, |t| t.display_text())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    Hourly,
    HourlyNte,
    CostOfServices,
    LumpSum,
}

impl PaymentType {
    pub fn display_text(&self) -> &'static str {
        match self {
            PaymentType::Hourly => "Hourly Services Proposal",
            PaymentType::HourlyNte => "Hourly Not-to-Exceed Proposal",
            PaymentType::CostOfServices => "Cost of Services Proposal",
            PaymentType::LumpSum => "Lump Sum Fee Proposal",
        }
    }

    /// Lump-sum proposals fold expenses into the fee.
    pub fn includes_reimbursables(&self) -> bool {
        !matches!(self, PaymentType::LumpSum)
    }
}

pub fn payment_type_text(payment_type: Option<PaymentType>) -> &'static str {
    payment_type
        .unwrap_or(PaymentType::CostOfServices)
        .display_text()
}

pub fn includes_reimbursables(payment_type: Option<PaymentType>) -> bool {
    payment_type.is_some_and(|p| p.includes_reimbursables())
}

// ────────────────────────────────────────────────────────────────────────────
// Services
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Basic,
    Additional,
}

/// A sellable service in the catalog. Line items copy from it; it never changes
/// because a line item changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub suggested_price: f64,
    pub service_type: ServiceType,
    pub proposal_types: Vec<ProposalType>,
}

impl CatalogEntry {
    pub fn applies_to(&self, proposal_type: ProposalType) -> bool {
        self.proposal_types.contains(&proposal_type)
    }
}

/// A service on a specific proposal, snapshotted from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub is_selected: bool,
    pub original_description: String,
    pub original_price: f64,
    pub service_type: ServiceType,
    pub proposal_types: Vec<ProposalType>,
}

impl From<&CatalogEntry> for LineItem {
    fn from(entry: &CatalogEntry) -> Self {
        LineItem {
            id: entry.id.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            price: entry.suggested_price,
            category: entry.category.clone(),
            is_selected: true,
            original_description: entry.description.clone(),
            original_price: entry.suggested_price,
            service_type: entry.service_type,
            proposal_types: entry.proposal_types.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Reimbursables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MileageInputs {
    /// One-way driving miles from the office.
    pub miles: f64,
    pub is_flying: bool,
    pub flight_cost: f64,
    pub selected_airport: Option<String>,
    pub hotel_address: Option<String>,
    pub airport_to_hotel: f64,
    pub hotel_to_project: f64,
    /// Trips between airport and hotel; zero counts as one.
    pub airport_to_hotel_multiplier: f64,
    /// Trips between hotel and project; zero counts as one.
    pub hotel_to_project_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReimbursableInputs {
    /// When false the reimbursables section is skipped entirely.
    pub needed: bool,
    pub mileage: MileageInputs,
    pub meal_count: f64,
    pub hotel_cost: f64,
    pub equipment_cost: f64,
    pub shipping_cost: f64,
}

impl Default for ReimbursableInputs {
    fn default() -> Self {
        Self {
            needed: true,
            mileage: MileageInputs::default(),
            meal_count: 0.0,
            hotel_cost: 0.0,
            equipment_cost: 0.0,
            shipping_cost: 0.0,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyRates {
    pub principal: f64,
    pub sr_associate: f64,
    pub sr_project_consultant: f64,
    pub sr_consultant: f64,
    pub consultant: f64,
    pub sr_technician: f64,
    pub field_technician: f64,
    pub cad: f64,
    pub administrative: f64,
}

impl Default for HourlyRates {
    fn default() -> Self {
        Self {
            principal: 325.0,
            sr_associate: 300.0,
            sr_project_consultant: 275.0,
            sr_consultant: 250.0,
            consultant: 200.0,
            sr_technician: 150.0,
            field_technician: 135.0,
            cad: 135.0,
            administrative: 90.0,
        }
    }
}

impl HourlyRates {
    /// Rate table rows in print order.
    pub fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("Principal", self.principal),
            ("Sr. Associate", self.sr_associate),
            ("Sr. Project Consultant", self.sr_project_consultant),
            ("Sr. Consultant", self.sr_consultant),
            ("Consultant", self.consultant),
            ("Sr. Technician", self.sr_technician),
            ("Field Technician", self.field_technician),
            ("CAD", self.cad),
            ("Administrative", self.administrative),
        ]
    }
}

/// Errors-and-omissions coverage offered in the terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAllocation {
    #[default]
    #[serde(rename = "1000000")]
    OneMillion,
    #[serde(rename = "500000")]
    FiveHundredThousand,
    #[serde(rename = "100000")]
    OneHundredThousand,
}

impl RiskAllocation {
    pub fn display(&self) -> &'static str {
        match self {
            RiskAllocation::OneMillion => "$1,000,000",
            RiskAllocation::FiveHundredThousand => "$500,000",
            RiskAllocation::OneHundredThousand => "$100,000",
        }
    }

    /// Wording used inside the terms and conditions.
    pub fn terms_wording(&self) -> &'static str {
        match self {
            RiskAllocation::OneMillion => "$1 Million",
            other => other.display(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Proposal document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalHeader {
    pub date: String,
    pub proposal_title: String,
    pub proposal_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub company_name: String,
    pub client_title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: String,
    pub location: String,
    pub use_company_address: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalDocument {
    pub id: Uuid,
    pub header: ProposalHeader,
    pub proposal_type: Option<ProposalType>,
    pub payment_type: Option<PaymentType>,
    pub client: ClientInfo,
    pub project: ProjectInfo,
    pub selected_services: Vec<LineItem>,
    pub reimbursables: ReimbursableInputs,
    pub hourly_rates: HourlyRates,
    pub risk_allocation: RiskAllocation,
    pub additional_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for ProposalDocument {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            header: ProposalHeader::default(),
            proposal_type: None,
            payment_type: None,
            client: ClientInfo::default(),
            project: ProjectInfo::default(),
            selected_services: Vec::new(),
            reimbursables: ReimbursableInputs::default(),
            hourly_rates: HourlyRates::default(),
            risk_allocation: RiskAllocation::default(),
            additional_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl ProposalDocument {
    /// Where the work happens: the client's address when flagged, else the project
    /// location.
    pub fn project_location(&self) -> &str {
        if self.project.use_company_address {
            &self.client.address
        } else {
            &self.project.location
        }
    }

    pub fn total_service_cost(&self) -> f64 {
        self.selected_services.iter().map(|s| s.price).sum()
    }

    pub fn line_item(&self, id: &str) -> Option<&LineItem> {
        self.selected_services.iter().find(|s| s.id == id)
    }

    /// `<project name or "Proposal">_<date>.pdf`
    pub fn pdf_filename(&self) -> String {
        let name = if self.project.name.trim().is_empty() {
            "Proposal"
        } else {
            self.project.name.as_str()
        };
        format!("{name}_{}.pdf", self.header.date)
    }
}

/// Partial update for a draft. Absent fields are left alone; `proposal_type` is
/// handled by the selection logic because it rewrites the service list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProposalPatch {
    pub header: Option<ProposalHeader>,
    #[serde(deserialize_with = "double_option")]
    pub payment_type: Option<Option<PaymentType>>,
    pub client: Option<ClientInfo>,
    pub project: Option<ProjectInfo>,
    pub reimbursables: Option<ReimbursableInputs>,
    pub hourly_rates: Option<HourlyRates>,
    pub risk_allocation: Option<RiskAllocation>,
    pub additional_notes: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub proposal_type: Option<Option<ProposalType>>,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_text_fallback() {
        assert_eq!(payment_type_text(None), "Cost of Services Proposal");
        assert_eq!(
            payment_type_text(Some(PaymentType::HourlyNte)),
            "Hourly Not-to-Exceed Proposal"
        );
    }

    #[test]
    fn test_reimbursables_excluded_for_lump_sum() {
        assert!(includes_reimbursables(Some(PaymentType::Hourly)));
        assert!(includes_reimbursables(Some(PaymentType::CostOfServices)));
        assert!(!includes_reimbursables(Some(PaymentType::LumpSum)));
        assert!(!includes_reimbursables(None));
    }

    #[test]
    fn test_proposal_type_serde_is_kebab_case() {
        let json = serde_json::to_string(&ProposalType::WaterTesting).unwrap();
        assert_eq!(json, "\"water-testing\"");
        let parsed: PaymentType = serde_json::from_str("\"hourly-nte\"").unwrap();
        assert_eq!(parsed, PaymentType::HourlyNte);
    }

    #[test]
    fn test_project_location_uses_company_address() {
        let mut doc = ProposalDocument::default();
        doc.client.address = "1 Client Way, Hoover, AL 35244".to_string();
        doc.project.location = "2 Site Rd, Pelham, AL 35124".to_string();
        assert_eq!(doc.project_location(), "2 Site Rd, Pelham, AL 35124");
        doc.project.use_company_address = true;
        assert_eq!(doc.project_location(), "1 Client Way, Hoover, AL 35244");
    }

    #[test]
    fn test_pdf_filename_defaults_to_proposal() {
        let mut doc = ProposalDocument::default();
        doc.header.date = "March 3, 2025".to_string();
        assert_eq!(doc.pdf_filename(), "Proposal_March 3, 2025.pdf");
        doc.project.name = "Oak Tower".to_string();
        assert_eq!(doc.pdf_filename(), "Oak Tower_March 3, 2025.pdf");
    }

    #[test]
    fn test_risk_allocation_wording() {
        assert_eq!(RiskAllocation::default().terms_wording(), "$1 Million");
        assert_eq!(
            RiskAllocation::OneHundredThousand.terms_wording(),
            "$100,000"
        );
        let parsed: RiskAllocation = serde_json::from_str("\"500000\"").unwrap();
        assert_eq!(parsed, RiskAllocation::FiveHundredThousand);
    }

    #[test]
    fn test_patch_distinguishes_null_proposal_type() {
        let absent: ProposalPatch = serde_json::from_str("{}").unwrap();
        assert!(absent.proposal_type.is_none());

        let cleared: ProposalPatch = serde_json::from_str(r#"{"proposal_type":null}"#).unwrap();
        assert_eq!(cleared.proposal_type, Some(None));

        let set: ProposalPatch =
            serde_json::from_str(r#"{"proposal_type":"visual-assessment"}"#).unwrap();
        assert_eq!(set.proposal_type, Some(Some(ProposalType::VisualAssessment)));
    }
}
