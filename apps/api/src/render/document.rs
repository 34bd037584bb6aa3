//! Lays a proposal out as draw commands: cover letter, agreement page and
//! terms page.

use crate::layout::page::{CONTENT_WIDTH, MARGIN, PAGE_WIDTH};
use crate::layout::{Align, DrawCommand, PageBuilder, RunningHeader};
use crate::proposal::expenses::{calculate, ReimbursableTotals};
use crate::proposal::models::{
    includes_reimbursables, payment_type_text, proposal_type_text, LineItem, ProposalDocument,
    ServiceType,
};
use crate::proposal::text::{
    extract_city_state, format_amount, format_whole_dollars, selected_services_text,
};
use crate::render::terms::*;

/// Signature-field column width on the agreement page.
const FIELD_WIDTH: f32 = (CONTENT_WIDTH - 40.0) / 2.0;
const FIELD_GAP: f32 = 40.0;
const RATE_ROW_HEIGHT: f32 = 4.0;

/// Full command stream for one proposal.
pub fn compose(doc: &ProposalDocument) -> Vec<DrawCommand> {
    let location = doc.project_location().to_string();
    let mut page = PageBuilder::new(RunningHeader {
        title: RUNNING_TITLE.to_string(),
        subtitle: format!("{} – {}", doc.project.name, location),
        date: doc.header.date.clone(),
    });

    letterhead(&mut page, doc, &location);
    introduction(&mut page, doc);
    services(&mut page, &doc.selected_services);

    let total = doc.total_service_cost();
    if total > 0.0 {
        page.add_space(5.0);
        page.add_text(
            &format!("Total Service Cost: ${}", format_amount(total)),
            12.0,
            true,
            Align::Left,
        );
        page.add_space(10.0);
    }

    qualifications(&mut page, doc);
    hourly_rates(&mut page, doc);
    closing(&mut page, doc);

    page.new_page();
    agreement(&mut page, doc);

    page.new_page();
    terms(&mut page, doc);

    page.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Cover letter
// ────────────────────────────────────────────────────────────────────────────

fn letterhead(page: &mut PageBuilder, doc: &ProposalDocument, location: &str) {
    page.add_text(COMPANY_NAME, 18.0, true, Align::Center);
    page.add_text(COMPANY_TAGLINE, 12.0, false, Align::Center);
    page.add_space(3.0);
    page.add_text(
        &format!("Corporate: {CORPORATE_PHONE} | Tennessee: {TENNESSEE_PHONE}"),
        10.0,
        false,
        Align::Center,
    );
    page.add_text(COMPANY_ADDRESS, 10.0, false, Align::Center);
    page.add_space(10.0);
    page.rule();
    page.add_space(10.0);

    page.add_text(&doc.header.date, 10.0, false, Align::Right);
    page.add_space(5.0);
    page.add_text(&doc.header.proposal_title, 14.0, true, Align::Center);
    page.add_space(10.0);

    page.add_text(&doc.project.name, 12.0, true, Align::Left);
    page.add_text(location, 10.0, false, Align::Left);
    page.add_space(10.0);

    let client = &doc.client;
    page.add_text("Contact / Proposal Addressed To:", 12.0, true, Align::Left);
    page.add_space(3.0);
    page.add_text(&client.company_name, 10.0, true, Align::Left);
    page.add_text(
        &format!("{} {}", client.first_name, client.last_name),
        10.0,
        false,
        Align::Left,
    );
    page.add_text(&client.address, 10.0, false, Align::Left);
    page.add_text(&format!("Phone: {}", client.phone), 10.0, false, Align::Left);
    page.add_text(&format!("Email: {}", client.email), 10.0, false, Align::Left);
    page.add_space(10.0);
}

/// Opening paragraph naming the services, client, place and fee basis.
pub fn intro_sentence(doc: &ProposalDocument) -> String {
    format!(
        "We appreciate this opportunity to submit our Hixson Consultants, Inc., HCI, project-specific proposal for requested **{}**. HCI's services include **{}** for **{}** in **{}**. We are submitting our **{}** in keeping with your request to assist with applied technical building envelope services.",
        proposal_type_text(doc.proposal_type),
        selected_services_text(&doc.selected_services),
        doc.client.company_name,
        extract_city_state(&doc.client.address),
        payment_type_text(doc.payment_type),
    )
}

fn introduction(page: &mut PageBuilder, doc: &ProposalDocument) {
    page.add_text(
        &format!("{} {},", doc.client.client_title, doc.client.last_name),
        10.0,
        false,
        Align::Left,
    );
    page.add_space(3.0);
    page.add_mixed_text(&intro_sentence(doc), 10.0);
    page.add_space(10.0);
}

fn services(page: &mut PageBuilder, items: &[LineItem]) {
    page.add_text("Proposed Services", 12.0, true, Align::Left);
    page.add_space(5.0);

    let mut number = 1;
    for (heading, service_type) in [
        ("Basic Services", ServiceType::Basic),
        ("Additional Services", ServiceType::Additional),
    ] {
        let group: Vec<&LineItem> = items
            .iter()
            .filter(|i| i.service_type == service_type)
            .collect();
        if group.is_empty() {
            continue;
        }

        page.add_text(heading, 11.0, true, Align::Left);
        page.add_space(3.0);
        for item in group {
            page.add_text(&format!("{number}. {}", item.name), 11.0, true, Align::Left);
            if item.price > 0.0 {
                page.add_text(
                    &format!("${}", format_amount(item.price)),
                    10.0,
                    true,
                    Align::Left,
                );
            }
            let description = if item.description.is_empty() {
                &item.original_description
            } else {
                &item.description
            };
            page.add_text(description, 10.0, false, Align::Left);
            page.add_space(5.0);
            number += 1;
        }
    }
}

/// "A." paragraph listing each reimbursable category in whole dollars.
pub fn reimbursable_breakdown(totals: &ReimbursableTotals) -> String {
    let d = format_whole_dollars;
    format!(
        "**A.** The reimbursable **${}** expense cost breakdown is as follows:\n **1)** Travel-related expenses (portal to portal, mileage) - **${}**\n **2)** Hotel - **${}**\n **3)** Meals - **${}**\n **4)** Equipment - **${}**\n **5)** Shipping/Transport of Equipment - **${}**",
        d(totals.grand_total),
        d(totals.mileage_total),
        d(totals.hotel_total),
        d(totals.meals_total),
        d(totals.equipment_total),
        d(totals.shipping_total),
    )
}

fn qualifications(page: &mut PageBuilder, doc: &ProposalDocument) {
    page.add_text(
        "Qualifications and Limitations of Services",
        12.0,
        true,
        Align::Left,
    );
    page.add_space(5.0);

    let with_reimbursables = includes_reimbursables(doc.payment_type);
    let markup_clause = if with_reimbursables {
        " Estimated reimbursable expenses are not included and will be invoiced at cost plus **10% markup**."
    } else {
        ""
    };

    let mut paragraphs = vec![format!(
        "1. HCI is offering our Applied Technical Consulting Services on a {} based upon experience and historical costs of services. An estimated range for the cost of services may or may not be possible to create with limited information.{markup_clause} Costs of expenses are estimated to the best of our ability but, if actual expenses are more than the estimate, the overage will be invoiced.",
        payment_type_text(doc.payment_type),
    )];
    if with_reimbursables {
        paragraphs.push(reimbursable_breakdown(&calculate(&doc.reimbursables)));
    }
    paragraphs.push(FUEL_CLAUSE.to_string());
    paragraphs.push(ADDITIONAL_SERVICES_BILLING.to_string());

    for text in &paragraphs {
        page.add_mixed_text(text, 10.0);
        page.add_space(3.0);
    }
}

fn hourly_rates(page: &mut PageBuilder, doc: &ProposalDocument) {
    page.add_space(5.0);
    page.add_text("Hourly Rates for Additional Services:", 12.0, true, Align::Left);
    page.add_space(5.0);

    let entries = doc.hourly_rates.entries();
    let (left, right) = entries.split_at(5);
    let column_width = CONTENT_WIDTH / 2.0 - 10.0;
    let right_x = MARGIN + column_width + 20.0;

    page.check_new_page(left.len() as f32 * RATE_ROW_HEIGHT + 10.0);
    let top = page.y();
    let mut bottom = top;
    for (column, label_x) in [(left, MARGIN), (right, right_x)] {
        let mut y = top;
        for (title, rate) in column {
            page.text_at(label_x, y, 10.0, false, &format!("{title}:"));
            page.text_at(label_x + 55.0, y, 10.0, true, &format!("${rate}/hr"));
            y += RATE_ROW_HEIGHT;
        }
        bottom = bottom.max(y);
    }
    page.set_y(bottom + 5.0);

    page.add_mixed_text(RATE_CHANGE_CLAUSE, 10.0);
    page.add_space(3.0);
    page.add_mixed_text(ADDITIONAL_SERVICES_CAUSES, 10.0);
}

fn closing(page: &mut PageBuilder, doc: &ProposalDocument) {
    if !doc.additional_notes.trim().is_empty() {
        page.add_space(5.0);
        page.add_text("Additional Notes", 12.0, true, Align::Left);
        page.add_text(doc.additional_notes.trim(), 10.0, false, Align::Left);
    }

    page.add_space(10.0);
    page.add_text(CLOSING, 10.0, false, Align::Left);
    page.add_space(5.0);
    for (i, (line, bold)) in SIGNATURE_BLOCK.iter().enumerate() {
        if i == 2 {
            page.add_space(5.0);
        }
        page.add_text(line, 10.0, *bold, Align::Left);
    }
    page.add_space(5.0);
    for line in CC_LIST {
        page.add_text(line, 10.0, false, Align::Left);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Agreement page
// ────────────────────────────────────────────────────────────────────────────

/// Two labelled signature lines side by side. Leaves the cursor on the rule.
fn field_row(page: &mut PageBuilder, left: &str, right: &str) {
    let right_x = MARGIN + FIELD_WIDTH + FIELD_GAP;
    let y = page.y();
    page.text_at(MARGIN, y, 10.0, false, left);
    page.text_at(right_x, y, 10.0, false, right);
    page.add_space(5.0);
    let y = page.y();
    page.line(MARGIN, y, MARGIN + FIELD_WIDTH, y);
    page.line(right_x, y, PAGE_WIDTH - MARGIN, y);
}

fn agreement(page: &mut PageBuilder, doc: &ProposalDocument) {
    page.add_text("AGREEMENT", 14.0, true, Align::Center);
    page.add_space(15.0);

    page.add_mixed_text(
        &format!(
            "HCI is offering our Applied Technical Consulting Services on an **{}** basis based upon experience and historical cost of services. Reimbursable expenses are not included and will be invoiced at cost plus **10% markup**. Any work over the services quoted above will be billed at our regular Hourly Fee rates cited above. HCI will not commence work on this project without a Signed Agreement. I have read and agree to the Terms and Conditions attached.",
            payment_type_text(doc.payment_type),
        ),
        10.0,
    );
    page.add_space(15.0);

    page.add_text("Agreed to by:", 12.0, true, Align::Left);
    page.add_space(10.0);

    for (left, right) in [
        ("Printed Name", "E-mail Address"),
        ("Signature", "Telephone Number"),
        ("Title", "Fax Number"),
    ] {
        field_row(page, left, right);
        page.add_space(15.0);
    }

    let y = page.y();
    page.text_at(MARGIN, y, 10.0, false, "Date");
    page.add_space(5.0);
    let y = page.y();
    page.line(MARGIN, y, MARGIN + 100.0, y);
    page.add_space(25.0);

    page.add_text(ACCOUNTS_PAYABLE_NOTE, 10.0, false, Align::Left);
    page.add_space(10.0);
    field_row(
        page,
        "Printed Name of Person Authorized for Payment",
        "E-mail Address",
    );
    page.add_space(20.0);

    page.add_text("Billing Address:", 11.0, true, Align::Left);
    page.add_space(10.0);
    field_row(page, "Street or PO Box", "Direct Telephone Number");
    page.add_space(15.0);
    field_row(page, "City, State, Zip Code", "Fax Number");
}

// ────────────────────────────────────────────────────────────────────────────
// Terms page
// ────────────────────────────────────────────────────────────────────────────

fn terms(page: &mut PageBuilder, doc: &ProposalDocument) {
    page.add_text(TERMS_TITLE, 14.0, true, Align::Center);
    page.add_space(15.0);
    for paragraph in consulting_terms(doc.risk_allocation) {
        page.add_text(&paragraph, 10.0, false, Align::Left);
        page.add_space(3.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::split_pages;
    use crate::proposal::catalog::ServiceCatalog;
    use crate::proposal::models::{PaymentType, ProposalType, RiskAllocation};
    use crate::proposal::selection::{add_line_item, apply_proposal_type};

    fn sample() -> ProposalDocument {
        let mut doc = ProposalDocument::default();
        doc.header.date = "March 3, 2025".to_string();
        doc.header.proposal_title = "Water Testing Proposal".to_string();
        doc.payment_type = Some(PaymentType::Hourly);
        doc.client.company_name = "Acme Builders".to_string();
        doc.client.client_title = "Mr.".to_string();
        doc.client.first_name = "Sam".to_string();
        doc.client.last_name = "Reed".to_string();
        doc.client.address = "100 Main St, Hoover, AL 35244".to_string();
        doc.project.name = "Oak Tower".to_string();
        doc.project.use_company_address = true;
        doc.reimbursables.mileage.miles = 25.0;
        doc.reimbursables.meal_count = 2.0;
        apply_proposal_type(
            &mut doc,
            Some(ProposalType::WaterTesting),
            &ServiceCatalog::seeded(),
        );
        doc
    }

    fn all_text(commands: &[DrawCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// All drawn text with whitespace normalised, so phrases match across
    /// line breaks and weight changes.
    fn joined(commands: &[DrawCommand]) -> String {
        all_text(commands)
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_intro_sentence() {
        let doc = sample();
        let text = intro_sentence(&doc);
        assert!(text.contains("requested **Water Testing Services**."));
        assert!(text.contains("for **Acme Builders** in **Hoover, AL**."));
        assert!(text.contains("our **Hourly Services Proposal**"));
    }

    #[test]
    fn test_agreement_and_terms_start_new_pages() {
        let commands = compose(&sample());
        let pages = split_pages(&commands);
        assert!(pages.len() >= 3);

        let agreement_page = pages
            .iter()
            .position(|p| all_text(p).first().map(String::as_str) == Some("AGREEMENT"))
            .expect("agreement page");
        let terms_page = pages
            .iter()
            .position(|p| all_text(p).first().map(String::as_str) == Some(TERMS_TITLE))
            .expect("terms page");
        assert!(terms_page > agreement_page);
    }

    #[test]
    fn test_breakdown_follows_payment_type() {
        let doc = sample();
        let text = joined(&compose(&doc));
        assert!(text.contains("Travel-related expenses"));
        // 25 mi × 2 × 0.70 / 0.9 = 38.89; meals 50.
        assert!(text.contains("The reimbursable $89 expense cost breakdown"));

        let mut lump = sample();
        lump.payment_type = Some(PaymentType::LumpSum);
        let text = joined(&compose(&lump));
        assert!(!text.contains("Travel-related expenses"));
        assert!(!text.contains("Estimated reimbursable expenses are not included"));
        assert!(text.contains("Lump Sum Fee Proposal"));
    }

    #[test]
    fn test_services_numbered_across_groups() {
        let catalog = ServiceCatalog::seeded();
        let mut doc = sample();
        add_line_item(&mut doc, &catalog, "6").unwrap();
        let text = all_text(&compose(&doc));

        let basic = text.iter().position(|t| t == "Basic Services").unwrap();
        let additional = text.iter().position(|t| t == "Additional Services").unwrap();
        assert!(basic < additional);
        let extra = format!("5. {}", catalog.get("6").unwrap().name);
        let numbered = text.iter().position(|t| *t == extra).unwrap();
        assert!(numbered > additional);
    }

    #[test]
    fn test_total_cost_only_when_priced() {
        let mut unpriced = sample();
        for item in &mut unpriced.selected_services {
            item.price = 0.0;
        }
        let text = all_text(&compose(&unpriced));
        assert!(!text.iter().any(|t| t.starts_with("Total Service Cost")));

        let mut priced = unpriced.clone();
        priced.selected_services[0].price = 3500.0;
        priced.selected_services[1].price = 1250.5;
        let text = all_text(&compose(&priced));
        assert!(text.iter().any(|t| t == "Total Service Cost: $4,750.5"));
        assert!(text.iter().any(|t| t == "$3,500"));
        assert!(text.iter().any(|t| t == "$1,250.5"));
    }

    #[test]
    fn test_seeded_services_total() {
        let doc = sample();
        let expected = format!("Total Service Cost: ${}", format_amount(doc.total_service_cost()));
        assert!(doc.total_service_cost() > 0.0);
        assert!(all_text(&compose(&doc)).contains(&expected));
    }

    #[test]
    fn test_rates_and_risk_wording() {
        let mut doc = sample();
        doc.hourly_rates.principal = 350.0;
        doc.risk_allocation = RiskAllocation::FiveHundredThousand;
        let commands = compose(&doc);
        let text = all_text(&commands);
        assert!(text.iter().any(|t| t == "$350/hr"));
        assert!(text.iter().any(|t| t == "Administrative:"));
        assert!(joined(&commands).contains("$500,000 Errors and Omissions"));
    }

    #[test]
    fn test_everything_stays_on_the_page() {
        let commands = compose(&sample());
        for cmd in &commands {
            if let DrawCommand::Text { x, y, size, bold, text } = cmd {
                let right = x + crate::layout::text_width_mm(text, *size, *bold);
                assert!(*x >= MARGIN - 1e-3, "{text} starts at {x}");
                assert!(right <= PAGE_WIDTH - MARGIN + 1e-3, "{text} ends at {right}");
                assert!(*y <= 297.0, "{text} below the page");
            }
        }
    }
}
