//! Fixed proposal copy: letterhead, closing block and the consulting terms.

use crate::proposal::models::RiskAllocation;

pub const COMPANY_NAME: &str = "Hixson Consultants";
pub const COMPANY_TAGLINE: &str = "Building Envelope Services";
pub const CORPORATE_PHONE: &str = "205-663-2220";
pub const TENNESSEE_PHONE: &str = "615-540-9977";
pub const COMPANY_ADDRESS: &str = "947 1st Avenue West, Alabaster, Alabama 35007";
pub const RUNNING_TITLE: &str = "HCI Building Envelope Services Proposal";

pub const CLOSING: &str = "We welcome discussing our services in detail at your convenience. Should further information be required, please contact our office. May we have your valued business, and continue to build a strong, successful, and mutually beneficial relationship?";

pub const SIGNATURE_BLOCK: [(&str, bool); 5] = [
    ("Sincerely,", false),
    ("Hixson Consultants, Inc.", false),
    ("Ben Hixson", true),
    ("Ben Hixson, Principal / CIT, CCS, CCCA, QCxP, Professional IIBEC Member", false),
    ("Roofing Wall Systems Waterproofing Thermography Commissioning", false),
];

pub const CC_LIST: [&str; 6] = [
    "cc: Tony Wright, Sr. Associate, Professional IIBEC Member, Roofing, Wall Systems, Waterproofing and Thermography",
    "Greg Cunningham, Sr. Project Consultant, Glazing, Fenestration Systems, Wall Assemblies",
    "Mike Ray, Sr. Project Consultant, Professional IIBEC Member",
    "Tyler Mayhew, Consultant, CxA + BE, BECxP, CIT, CEI-TN, Professional IIBEC Member",
    "Tony Fields, Sr. Field Technician, Professional IIBEC Member",
    "Wesley Paul, Field Technician, Professional IIBEC Member",
];

pub const FUEL_CLAUSE: &str = "If fuel costs escalate more than **15%**, HCI reserves the right to pass on the increase. Any work over the services quoted above will be invoiced at our regular Hourly Fee rates below.";

pub const ADDITIONAL_SERVICES_BILLING: &str = "2. When listed services have been completed, Additional Services will be billed at an hourly rate (rates listed below) unless an Additional Services Proposal is requested and approved.";

pub const RATE_CHANGE_CLAUSE: &str = "Should this work be performed when HCI hourly fee rates have changed, HCI reserves the right to invoice at the higher rate. Reimbursable expenses are not included and will be invoiced at cost plus **10% markup**. Additional Services expenses are billed in addition to hourly rates.";

pub const ADDITIONAL_SERVICES_CAUSES: &str = "Additional Services may be required or requested because of discovery of concealed conditions, the non-performance of others or conditions of the work not previously considered, additional site visits and additional meetings, excessive correspondence or lengthy conference calls (exceeding a quarter of an hour duration).";

pub const ACCOUNTS_PAYABLE_NOTE: &str = "HCI Invoices will be distributed via e-mail. Please provide contact for Accounts Payable below.";

pub const TERMS_TITLE: &str = "CONSULTING SERVICES TERMS AND CONDITIONS";

/// Placeholder in term III.F replaced by the chosen coverage.
const RISK_PLACEHOLDER: &str = "{risk}";

const CONSULTING_TERMS: [&str; 39] = [
    "I.  COMPENSATION",
    "A. Fee compensation to Hixson Consultants, Inc. hereafter also HCI, for Basic Services shall be invoiced monthly based on actual hours expended by HCI at our prevailing rates.",
    "B. The budget amount represents the estimated cost to our Client limited to the Basic Services (excluding any / all reimbursable expenses) as outlined in the agreement and is conditional upon all of the terms and conditions stated herein.  HCI shall endeavor to provide the Basic Services within the estimated budget and shall also endeavor to notify the Client prior to exceeding this budget; however, in all circumstances, the Client agrees and accepts to compensate HCI for all hours expended in the interest of the project.",
    "C. Reimbursable Expenses are in addition to fee compensation for services and include actual expenditures made/incurred by HCI and/or its agents in the interest of the project and resulting directly from the performance of services under the Agreement.  Unless prepaid, reimbursable expenses are invoiced at cost plus 10% and include but are not limited to:",
    "1. Portal-to-portal travel plus subsistence.",
    "2. Long-distance telephone, cellular telephone use, telex, telecopy.",
    "3. Expense of courier service, shipping, postage, and delivery service.",
    "4. Expense of any / all reproduction of drawings, specifications, photographs, calculations, reports, correspondence, expense backup, etc.",
    "5. Fees and expenses of a Registered Professional Consulting Engineer, Registered Architect, or Construction Manager.",
    "6. Cost of staging, scaffolding, ladders, or other equipment.",
    "D. Compensation to HCI for the performance of authorized Additional Services where the scope is defined may be a lump sum amount if mutually agreed upon in advance and shall be in addition to the Basic Services fee amount or shall be otherwise billed at our prevailing hourly rates.",
    "E. Overtime requested by the Client of HCI in an effort to recover and/or to maintain the overall schedule due to slippage by others shall be compensated at 1 ½ times the above rates for time on weekdays and Saturdays and at 2 times the standard hourly rates for Sundays and holidays.",
    "F. Portal to Portal travel time is chargeable from the scheduled departure time to the scheduled return arrival time.  Time zone differences will be adjusted to actual hours.  Non-travel and after-hours time out of town on overnight and/or extended trips are not chargeable.",
    "II. PAYMENT",
    "A. Payment on account of authorized services and/or expenses shall be made monthly in the amount of HCI's monthly invoice for services performed and/or expenses incurred.  Payment of HCI's invoices is not contingent upon the Client's receipt of funds.  The invoice shall be considered past due if not paid within 30 days of the invoice date.  In lieu of a signed copy, authorization to proceed, or payment of Hixson Consultants, Inc., HCI, invoice(s) constitutes acceptance of this proposal.",
    "B. Client shall notify HCI in writing within twenty (20) days from the invoice of any incorrect or disputed item on the invoice or such invoice shall be deemed complete and correct and fully due and owing.",
    "C. If this assignment is suspended for more than one (1) month or abandoned in whole or in part, by the Client or Third Party, HCI shall be paid within 30 days its compensation for services performed and expenses incurred prior to receipt of written notice of such suspension or abandonment.",
    "D. Payments are due and payable upon receipt of the invoice.  The Client agrees to pay invoices in a timely manner.  On the thirty-fifth (35th) day following the invoice date and on each successive thirtieth (30th) day thereafter, a late charge in the amount of one and one-half percent (1.50 %) may be added to and become due on all unpaid principal amounts due.  Finance charges accrue from the original date of the invoice.  Payment received will first be applied to any accrued late fees and then to the balance of the original invoice(s).",
    "E. In the event that payment is not made, the Client agrees to pay all collection costs and expenses incurred by HCI to collect the amount due including a reasonable attorney's fee whether or not the suit is instituted.",
    "III. GENERAL PROVISIONS",
    "A. Record of expenses and hourly rate-based services performed will be kept on the basis of General Accepted Accounting Principles (GAAP) and will be available to the Client in HCI's office during normal business hours.",
    "B. Reports, photos, specifications, drawings, calculations, and related documents prepared by HCI are for the exclusive use of the Client for this project.  Client's and HCI's responsibility and liability with respect to these drawings and documents are limited solely to this project.",
    "C. This agreement may be terminated by either party upon seven (7) days' written notice should the other party substantially fail to perform in accordance with its provisions through no substantial fault of the other.  In the event of termination, HCI shall be paid within 30 days its compensation for services performed to the termination date, including reimbursable expenses, in full.  Upon receipt by HCI of said payment in full, HCI shall deliver to Client one reproducible copy of documents prepared by HCI to the termination date.  HCI shall have no responsibility whatsoever for subsequent changes or additions and/or for the use of these documents by Client and/or by others.",
    "D. Client agrees that HCI is entitled to rely on it exclusively for the accuracy and timeliness of the information it provides HCI with respect to the project unless HCI knows or has reason to believe such information is in error. The Client shall provide HCI with drawings, specifications, reports, field measurements, surveys, warranty coverage, leak history, and any other requested data that may be obtainable in order for HCI to perform its services. When advised by HCI, investigation of conditions concealed by existing finishes shall be authorized and paid for by the Client.  Where investigation is NOT authorized, HCI shall not be responsible for the condition of the existing structure (except where verification can be made by simple visual discovery), or envelope performance.",
    "E. HCI is providing only technical consulting services in an advisory capacity under this Agreement and is not providing (nor profiting from) any products, materials, shop fabrication, and/or field installation.  It is understood and agreed that the final responsibility for checking and verifying the accuracy of and for use of all documents/recommendations provided by HCI under this Agreement is and shall remain solely with the Client.",
    "F. The total extent of responsibility and liability for any and all errors and/or omissions by HCI in work provided under this Agreement shall be limited to insurance coverage. Client agrees and accepts that it is prohibited as a condition of this Agreement from making deductions or 'back charging' HCI's compensation for any reason whatsoever except for proven HCI errors and omissions.  HCI assumes no responsibility for material costs and/or labor costs by others due to services provided by HCI under this Agreement.  We can provide for a charge of {risk} Errors and Omissions (E&O) insurance for our work and more coverage than this is specifically excluded from the terms of our Agreement unless cited as a line-item additional cost.  In recognition of the relative risks, rewards, and benefits of the project to both the Client and HCI, except for HCI errors and omissions the Client assumes entire responsibility and liability for any and all damage or injury of any kind or nature whatsoever to all persons and to all property caused by, resulting from, arising out of, or occurring in connection with the work and/or HCI's services performed under the Agreement; and if any persons shall make a claim for any damage or injury as hereinabove described, the Client agrees to indemnify and hold HCI harmless from and against any and all loss, expense, damage or injury that may result of any such claim.",
    r#"HIXSON CONSULTANTS, INC. ASSUMES NO CONSEQUENTIAL DAMAGES AND LIMITS ANY OTHER DAMAGES WHATSOEVER TO THE PROVIDED INSURANCE COVERAGE.  HIXSON CONSULTANTS, INC. DISCLAIMS ANY WARRANTY OF FITNESS FOR A PARTICULAR PURPOSE AND ANY AND ALL OTHER CONSEQUENTIAL DAMAGES.  HCI OFFERS "BEST EFFORT-GOOD FAITH" SERVICES INTENDED TO STOP MOISTURE INTRUSION AND CONDENSATION FORMATION."#,
    "G. It is understood and agreed that the Agreement is conditional, based upon a comprehensive schedule mutually agreed upon prior to HCI beginning work, for services to be provided by HCI.  Any deviation from this schedule resulting from any action or inaction by other than HCI may result in Additional Service costs and/or HCI being unable to recover to maintain said overall schedule.  Such inability to recover shall not constitute just cause for termination of the Agreement by Client.",
    "H. HCI shall endeavor to maintain scheduled deliverables; however, it is understood and agreed that the only liability assumed by HCI for its nonperformance, resulting in failure to maintain schedule, shall be absolutely limited to providing/increasing over time and/or staff at no additional cost to Client, regardless of circumstances outside HCI control and/or Client's exposure.",
    "I. HCI reports are for the exclusive use of our Client and are not intended for any other purpose.  Reports are based on the information available to us at the time of the report.  Should additional information become available at a later date, we reserve the right to determine the impact, if any, the new information may have on our discovery and recommendations and to revise our opinions and conclusions if necessary and warranted.",
    "J. HCI maintains statutory Employee's Insurance, including Worker's Compensation, Employer's Liability, and Comprehensive General Liability, and will provide a current Certificate of Insurance to our client upon request.",
    "K. HCI is an independent contractor in the performance of its duties under the Agreement.  The detailed methods and manner of conducting the services shall be under the complete control and direction of HCI.",
    "L. All persons performing any part of the services will be employees or agents of HCI and not employees or agents of the Client.  HCI will be fully responsible for all applicable federal, state, and local taxes arising out of HCI's activities under this Agreement, including by way of illustration but not by way of limitation, federal income tax, social security tax, unemployment compensation contribution, and all other taxes, contributions, or business license fees as required (excluding any international fees, duties, or taxes).",
    "M. HCI will not have control over, or charge of, and will not be responsible for construction means, methods, techniques, sequences, or procedures, or for safety precautions and programs in connection with the work; these are solely a Client / Contractor responsibility.  HCI will not be responsible for the Client/Contractor's failure to carry out the work in accordance with the project Contract Documents.",
    "N. HCI will not have control over, or charge of, and will not be responsible for acts or omissions of Client or Contractor, Subcontractors or their agents or employees, or of any persons performing services or portions of the work.",
    "O. HCI will comply with all applicable federal and state laws and regulations with respect to non-discrimination and equal opportunity in employment.",
    "P. Client agrees to resolve by mediation any and all disputes, claims, or controversies arising from or related to any work performed for Client by HCI including disputes related to the breadth or scope of this provision.  Mediation shall be conducted in Birmingham, AL.  This provision, however, does not require the mediation of disputes where the fees paid to HCI are less than $10,000 or the amount sought does not exceed $10,000.",
    "Q. The prevailing party in any mediation, or any other final, binding dispute proceeding upon which the parties may agree, may be awarded reasonable attorneys' fees and expenses incurred by such party upon a finding that the other party initiated or continued to assert a clearly frivolous, unreasonable, or groundless claim or defense.",
    "R. The Agreement constitutes the entire Agreement by and between Client and Hixson Consultants, Inc. pertaining to Technical Consulting Services for the referenced assignment.  The terms and conditions herein shall supersede and take precedence over any / all terms and conditions which may be embodied in Client's purchase order or similar documents.  The Agreement may be amended only by mutual agreement in writing signed by both parties and attached hereto.  The laws of the State of Alabama will govern the Agreement.",
];

/// Terms paragraphs in order, with the errors-and-omissions coverage filled in.
pub fn consulting_terms(risk: RiskAllocation) -> Vec<String> {
    CONSULTING_TERMS
        .iter()
        .map(|t| t.replace(RISK_PLACEHOLDER, risk.terms_wording()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_default_coverage() {
        let terms = consulting_terms(RiskAllocation::default());
        assert_eq!(terms.len(), CONSULTING_TERMS.len());
        assert_eq!(terms[0], "I.  COMPENSATION");
        assert!(terms
            .iter()
            .any(|t| t.contains("for a charge of $1 Million Errors and Omissions (E&O)")));
        assert!(terms.iter().all(|t| !t.contains(RISK_PLACEHOLDER)));
    }

    #[test]
    fn test_terms_reduced_coverage() {
        let terms = consulting_terms(RiskAllocation::OneHundredThousand);
        assert!(terms
            .iter()
            .any(|t| t.contains("for a charge of $100,000 Errors and Omissions")));
        assert!(!terms.iter().any(|t| t.contains("$1 Million")));
    }

    #[test]
    fn test_terms_end_with_governing_law() {
        let terms = consulting_terms(RiskAllocation::default());
        assert!(terms
            .last()
            .is_some_and(|t| t.ends_with("The laws of the State of Alabama will govern the Agreement.")));
    }
}
