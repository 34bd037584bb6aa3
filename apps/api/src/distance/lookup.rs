//! Static one-way driving miles from the Alabaster office, used when geocoding is
//! unavailable. Matching is by substring on the lowercased address, so table order
//! decides ties ("jackson" before "jacksonville", "columbus" in Georgia position).

use serde::Serialize;

/// City → one-way miles. A city name that appears under two states keeps its first
/// position with the later state's mileage.
pub const CITY_MILES: &[(&str, u32)] = &[
    // Alabama
    ("birmingham", 25),
    ("hoover", 20),
    ("vestavia", 22),
    ("mountain brook", 28),
    ("homewood", 25),
    ("tuscaloosa", 60),
    ("huntsville", 120),
    ("madison", 125),
    ("decatur", 110),
    ("florence", 140),
    ("mobile", 180),
    ("montgomery", 90),
    ("auburn", 85),
    ("opelika", 90),
    ("dothan", 140),
    ("gadsden", 75),
    ("anniston", 70),
    ("cullman", 65),
    ("jasper", 45),
    ("gulf shores", 190),
    ("orange beach", 195),
    ("phenix city", 95),
    ("enterprise", 135),
    ("troy", 110),
    ("selma", 75),
    ("andalusia", 125),
    ("fort payne", 100),
    ("scottsboro", 130),
    ("arab", 115),
    ("guntersville", 105),
    // Georgia
    ("atlanta", 150),
    ("columbus", 110),
    ("macon", 180),
    ("savannah", 280),
    ("augusta", 200),
    ("albany", 220),
    ("valdosta", 250),
    ("warner robins", 190),
    ("roswell", 160),
    ("sandy springs", 155),
    ("johns creek", 165),
    ("alpharetta", 170),
    ("marietta", 145),
    ("smyrna", 140),
    ("dunwoody", 160),
    // Tennessee
    ("nashville", 200),
    ("memphis", 220),
    ("knoxville", 240),
    ("chattanooga", 120),
    ("clarksville", 230),
    ("murfreesboro", 210),
    ("franklin", 205),
    ("jackson", 160),
    ("johnson city", 280),
    ("bartlett", 225),
    ("hendersonville", 205),
    ("kingsport", 290),
    ("collierville", 230),
    ("cleveland", 130),
    // Mississippi
    ("gulfport", 170),
    ("biloxi", 175),
    ("hattiesburg", 140),
    ("meridian", 90),
    ("tupelo", 120),
    ("greenville", 220),
    ("vicksburg", 150),
    ("natchez", 170),
    ("starkville", 100),
    ("oxford", 140),
    // Florida
    ("pensacola", 160),
    ("tallahassee", 200),
    ("panama city", 180),
    ("jacksonville", 320),
    ("gainesville", 280),
    ("orlando", 380),
    ("tampa", 350),
    ("miami", 520),
    ("fort lauderdale", 500),
    ("west palm beach", 480),
    ("naples", 420),
    ("fort myers", 400),
    ("sarasota", 360),
    ("clearwater", 340),
    ("st. petersburg", 345),
    // Louisiana
    ("new orleans", 200),
    ("baton rouge", 180),
    ("shreveport", 280),
    ("lafayette", 220),
    ("lake charles", 250),
    ("monroe", 240),
    ("alexandria", 220),
    // South Carolina
    ("charleston", 320),
    ("columbia", 280),
    ("rock hill", 240),
    ("mount pleasant", 325),
    ("spartanburg", 210),
    // North Carolina
    ("charlotte", 260),
    ("raleigh", 380),
    ("greensboro", 340),
    ("durham", 385),
    ("winston-salem", 320),
    ("fayetteville", 400),
    ("cary", 380),
    ("high point", 335),
    ("concord", 265),
    ("gastonia", 250),
    // Kentucky
    ("louisville", 280),
    ("lexington", 320),
    ("bowling green", 200),
    ("owensboro", 240),
    ("covington", 350),
    ("hopkinsville", 220),
    // Arkansas
    ("little rock", 320),
    ("fort smith", 380),
    ("springdale", 410),
    ("jonesboro", 280),
    ("pine bluff", 300),
    // Texas
    ("houston", 420),
    ("dallas", 480),
    ("austin", 520),
    ("san antonio", 580),
    ("beaumont", 380),
    ("tyler", 450),
    ("longview", 420),
    ("texarkana", 360),
];

/// State name, abbreviation, fallback miles.
pub const STATE_MILES: &[(&str, &str, u32)] = &[
    ("Alabama", "al", 75),
    ("Georgia", "ga", 180),
    ("Tennessee", "tn", 200),
    ("Mississippi", "ms", 140),
    ("Florida", "fl", 300),
    ("Louisiana", "la", 220),
    ("South Carolina", "sc", 280),
    ("North Carolina", "nc", 320),
    ("Kentucky", "ky", 280),
    ("Arkansas", "ar", 350),
    ("Texas", "tx", 450),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextEstimate {
    pub miles: u32,
    pub location: String,
}

/// Estimates one-way miles from address text alone.
///
/// City matches win over state matches; a state matches on its full name or on the
/// abbreviation surrounded by spaces or following a comma.
pub fn estimate_from_text(address: &str) -> Option<TextEstimate> {
    let lower = address.to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some((city, miles)) = CITY_MILES.iter().find(|(city, _)| lower.contains(city)) {
        return Some(TextEstimate {
            miles: *miles,
            location: capitalize_first(city),
        });
    }

    STATE_MILES
        .iter()
        .find(|(name, abbr, _)| {
            lower.contains(&name.to_lowercase())
                || lower.contains(&format!(" {abbr} "))
                || lower.contains(&format!(", {abbr}"))
        })
        .map(|(name, _, miles)| TextEstimate {
            miles: *miles,
            location: format!("{name} (estimated)"),
        })
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_match() {
        let est = estimate_from_text("1901 6th Ave N, Birmingham, AL 35203").unwrap();
        assert_eq!(est.miles, 25);
        assert_eq!(est.location, "Birmingham");
    }

    #[test]
    fn test_multiword_city_keeps_lowercase_tail() {
        let est = estimate_from_text("100 Beach Blvd, Gulf Shores, AL 36542").unwrap();
        assert_eq!(est.miles, 190);
        assert_eq!(est.location, "Gulf shores");
    }

    #[test]
    fn test_duplicate_city_uses_later_mileage() {
        assert_eq!(estimate_from_text("Jackson, MS 39201").unwrap().miles, 160);
        assert_eq!(estimate_from_text("Columbus, GA 31901").unwrap().miles, 110);
        assert_eq!(estimate_from_text("Greenville, SC 29601").unwrap().miles, 220);
        assert_eq!(estimate_from_text("Fayetteville, NC 28301").unwrap().miles, 400);
    }

    #[test]
    fn test_earlier_entry_wins_substring_overlap() {
        // "jackson" precedes "jacksonville" in the table.
        let est = estimate_from_text("1 Bay St, Jacksonville, FL 32202").unwrap();
        assert_eq!(est.location, "Jackson");
    }

    #[test]
    fn test_state_fallback_by_abbreviation() {
        let est = estimate_from_text("12 Rural Route, Nowhere, TN 38000").unwrap();
        assert_eq!(est.miles, 200);
        assert_eq!(est.location, "Tennessee (estimated)");
    }

    #[test]
    fn test_state_fallback_by_name() {
        let est = estimate_from_text("somewhere in texas").unwrap();
        assert_eq!(est.miles, 450);
    }

    #[test]
    fn test_unknown_location() {
        assert!(estimate_from_text("1 Main St, Portland, OR 97201").is_none());
        assert!(estimate_from_text("").is_none());
    }
}
