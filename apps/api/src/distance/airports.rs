//! Commercial airport table for flight-mode travel, plus search and the Google
//! Flights link builder.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Results returned by one airport search.
pub const MAX_AIRPORT_RESULTS: usize = 8;
/// Queries shorter than this return nothing.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub address: &'static str,
}

const fn airport(
    code: &'static str,
    name: &'static str,
    city: &'static str,
    state: &'static str,
    address: &'static str,
) -> Airport {
    Airport {
        code,
        name,
        city,
        state,
        address,
    }
}

impl Airport {
    fn searchable_text(&self) -> [String; 6] {
        [
            self.code.to_lowercase(),
            self.name.to_lowercase(),
            self.city.to_lowercase(),
            self.state.to_lowercase(),
            format!("{}, {}", self.city, self.state).to_lowercase(),
            format!("{} - {}", self.code, self.name).to_lowercase(),
        ]
    }

    fn matches(&self, terms: &[String]) -> bool {
        let text = self.searchable_text();
        terms
            .iter()
            .all(|term| text.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Every whitespace-separated term must appear in one of the airport's fields.
pub fn search_airports(query: &str) -> Vec<Airport> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let terms: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    AIRPORTS
        .iter()
        .filter(|a| a.matches(&terms))
        .take(MAX_AIRPORT_RESULTS)
        .copied()
        .collect()
}

pub fn find_airport(code: &str) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.code.eq_ignore_ascii_case(code))
}

/// Google Flights search from `origin` to `destination`, leaving a week after `today`
/// and returning the day after.
pub fn flights_url(origin: &str, destination: &str, today: NaiveDate) -> String {
    let depart = today + Duration::days(7);
    let back = today + Duration::days(8);
    format!(
        "https://www.google.com/travel/flights?q=Flights%20from%20{origin}%20to%20{destination}%20on%20{}%20through%20{}",
        depart.format("%Y-%m-%d"),
        back.format("%Y-%m-%d"),
    )
}

pub const AIRPORTS: &[Airport] = &[
    airport("BHM", "Birmingham-Shuttlesworth International Airport", "Birmingham", "AL", "5900 Messer Airport Hwy, Birmingham, AL 35212"),
    airport("HSV", "Huntsville International Airport", "Huntsville", "AL", "1000 Glenn Hearn Blvd SW, Huntsville, AL 35824"),
    airport("MOB", "Mobile Regional Airport", "Mobile", "AL", "8400 Airport Blvd, Mobile, AL 36608"),
    airport("MGM", "Montgomery Regional Airport", "Montgomery", "AL", "4445 Selma Hwy, Montgomery, AL 36108"),
    airport("DHN", "Dothan Regional Airport", "Dothan", "AL", "1759 Westgate Pkwy, Dothan, AL 36303"),
    airport("ATL", "Hartsfield-Jackson Atlanta International Airport", "Atlanta", "GA", "6000 N Terminal Pkwy, Atlanta, GA 30320"),
    airport("CSG", "Columbus Metropolitan Airport", "Columbus", "GA", "3250 W Britt David Rd, Columbus, GA 31909"),
    airport("MCN", "Middle Georgia Regional Airport", "Macon", "GA", "1000 Terminal Dr, Macon, GA 31297"),
    airport("SAV", "Savannah/Hilton Head International Airport", "Savannah", "GA", "400 Airways Ave, Savannah, GA 31408"),
    airport("AGS", "Augusta Regional Airport", "Augusta", "GA", "1501 Aviation Way, Augusta, GA 30906"),
    airport("ABY", "Southwest Georgia Regional Airport", "Albany", "GA", "3142 Schilling Ave, Albany, GA 31705"),
    airport("VLD", "Valdosta Regional Airport", "Valdosta", "GA", "4290 Inner Perimeter Rd, Valdosta, GA 31601"),
    airport("BNA", "Nashville International Airport", "Nashville", "TN", "1 Terminal Dr, Nashville, TN 37214"),
    airport("MEM", "Memphis International Airport", "Memphis", "TN", "2491 Winchester Rd, Memphis, TN 38116"),
    airport("TYS", "McGhee Tyson Airport", "Knoxville", "TN", "2055 Alcoa Hwy, Alcoa, TN 37701"),
    airport("CHA", "Chattanooga Metropolitan Airport", "Chattanooga", "TN", "1001 Airport Rd, Chattanooga, TN 37421"),
    airport("TRI", "Tri-Cities Airport", "Bristol", "TN", "2525 Hwy 75, Blountville, TN 37617"),
    airport("JAN", "Jackson-Medgar Wiley Evers International Airport", "Jackson", "MS", "100 International Dr, Jackson, MS 39208"),
    airport("GPT", "Gulfport-Biloxi International Airport", "Gulfport", "MS", "14035 Airport Rd, Gulfport, MS 39503"),
    airport("PIB", "Hattiesburg-Laurel Regional Airport", "Hattiesburg", "MS", "9 Terminal Dr, Moselle, MS 39459"),
    airport("MEI", "Meridian Regional Airport", "Meridian", "MS", "1935 Airport Blvd, Meridian, MS 39301"),
    airport("TUP", "Tupelo Regional Airport", "Tupelo", "MS", "1740 Airport Rd, Tupelo, MS 38804"),
    airport("PNS", "Pensacola International Airport", "Pensacola", "FL", "2430 Airport Blvd, Pensacola, FL 32504"),
    airport("TLH", "Tallahassee International Airport", "Tallahassee", "FL", "3300 Capital Cir SW, Tallahassee, FL 32310"),
    airport("ECP", "Northwest Florida Beaches International Airport", "Panama City", "FL", "6300 West Bay Pkwy, Panama City, FL 32409"),
    airport("JAX", "Jacksonville International Airport", "Jacksonville", "FL", "2400 Yankee Clipper Dr, Jacksonville, FL 32218"),
    airport("GNV", "Gainesville Regional Airport", "Gainesville", "FL", "3880 NE 39th Ave, Gainesville, FL 32609"),
    airport("MCO", "Orlando International Airport", "Orlando", "FL", "1 Jeff Fuqua Blvd, Orlando, FL 32827"),
    airport("TPA", "Tampa International Airport", "Tampa", "FL", "4100 George J Bean Pkwy, Tampa, FL 33607"),
    airport("MIA", "Miami International Airport", "Miami", "FL", "2100 NW 42nd Ave, Miami, FL 33126"),
    airport("FLL", "Fort Lauderdale-Hollywood International Airport", "Fort Lauderdale", "FL", "100 Terminal Dr, Fort Lauderdale, FL 33315"),
    airport("PBI", "Palm Beach International Airport", "West Palm Beach", "FL", "1000 James L Turnage Blvd, West Palm Beach, FL 33415"),
    airport("RSW", "Southwest Florida International Airport", "Fort Myers", "FL", "11000 Terminal Access Rd, Fort Myers, FL 33913"),
    airport("SRQ", "Sarasota-Bradenton International Airport", "Sarasota", "FL", "6000 Airport Cir, Sarasota, FL 34243"),
    airport("MSY", "Louis Armstrong New Orleans International Airport", "New Orleans", "LA", "1 Terminal Dr, Kenner, LA 70062"),
    airport("BTR", "Baton Rouge Metropolitan Airport", "Baton Rouge", "LA", "9430 Jackie Cochran Dr, Baton Rouge, LA 70807"),
    airport("SHV", "Shreveport Regional Airport", "Shreveport", "LA", "5103 Hollywood Ave, Shreveport, LA 71109"),
    airport("LFT", "Lafayette Regional Airport", "Lafayette", "LA", "200 Terminal Dr, Lafayette, LA 70508"),
    airport("LCH", "Lake Charles Regional Airport", "Lake Charles", "LA", "500 Airport Blvd, Lake Charles, LA 70607"),
    airport("MLU", "Monroe Regional Airport", "Monroe", "LA", "5400 Operations Rd, Monroe, LA 71203"),
    airport("AEX", "Alexandria International Airport", "Alexandria", "LA", "3029 MacArthur Dr, Alexandria, LA 71303"),
    airport("CHS", "Charleston International Airport", "Charleston", "SC", "5500 International Blvd, Charleston, SC 29418"),
    airport("CAE", "Columbia Metropolitan Airport", "Columbia", "SC", "3000 Aviation Way, West Columbia, SC 29170"),
    airport("GSP", "Greenville-Spartanburg International Airport", "Greer", "SC", "2000 GSP Dr, Greer, SC 29651"),
    airport("MYR", "Myrtle Beach International Airport", "Myrtle Beach", "SC", "1100 Jetport Rd, Myrtle Beach, SC 29577"),
    airport("CLT", "Charlotte Douglas International Airport", "Charlotte", "NC", "5501 Josh Birmingham Pkwy, Charlotte, NC 28208"),
    airport("RDU", "Raleigh-Durham International Airport", "Raleigh", "NC", "2400 John Brantley Blvd, Morrisville, NC 27560"),
    airport("GSO", "Piedmont Triad International Airport", "Greensboro", "NC", "1000 Ted Johnson Pkwy, Greensboro, NC 27409"),
    airport("ILM", "Wilmington International Airport", "Wilmington", "NC", "1740 Airport Blvd, Wilmington, NC 28405"),
    airport("FAY", "Fayetteville Regional Airport", "Fayetteville", "NC", "400 Airport Rd, Fayetteville, NC 28306"),
    airport("AVL", "Asheville Regional Airport", "Asheville", "NC", "61 Terminal Dr, Fletcher, NC 28732"),
    airport("SDF", "Louisville Muhammad Ali International Airport", "Louisville", "KY", "600 Terminal Dr, Louisville, KY 40209"),
    airport("LEX", "Blue Grass Airport", "Lexington", "KY", "4000 Versailles Rd, Lexington, KY 40510"),
    airport("BWG", "Bowling Green-Warren County Regional Airport", "Bowling Green", "KY", "2064 Three Springs Rd, Bowling Green, KY 42104"),
    airport("LIT", "Bill and Hillary Clinton National Airport", "Little Rock", "AR", "1 Airport Dr, Little Rock, AR 72202"),
    airport("XNA", "Northwest Arkansas Regional Airport", "Bentonville", "AR", "1 Airport Blvd, Bentonville, AR 72712"),
    airport("FSM", "Fort Smith Regional Airport", "Fort Smith", "AR", "6700 McKennon Blvd, Fort Smith, AR 72903"),
    airport("IAH", "George Bush Intercontinental Airport", "Houston", "TX", "2800 N Terminal Rd, Houston, TX 77032"),
    airport("HOU", "William P. Hobby Airport", "Houston", "TX", "7800 Airport Blvd, Houston, TX 77061"),
    airport("DFW", "Dallas/Fort Worth International Airport", "Dallas", "TX", "2400 Aviation Dr, DFW Airport, TX 75261"),
    airport("DAL", "Dallas Love Field", "Dallas", "TX", "8008 Herb Kelleher Way, Dallas, TX 75235"),
    airport("AUS", "Austin-Bergstrom International Airport", "Austin", "TX", "3600 Presidential Blvd, Austin, TX 78719"),
    airport("SAT", "San Antonio International Airport", "San Antonio", "TX", "9800 Airport Blvd, San Antonio, TX 78216"),
    airport("JFK", "John F. Kennedy International Airport", "New York", "NY", "JFK Airport, Queens, NY 11430"),
    airport("LAX", "Los Angeles International Airport", "Los Angeles", "CA", "1 World Way, Los Angeles, CA 90045"),
    airport("ORD", "O'Hare International Airport", "Chicago", "IL", "10000 W O'Hare Ave, Chicago, IL 60666"),
    airport("DEN", "Denver International Airport", "Denver", "CO", "8500 Peña Blvd, Denver, CO 80249"),
    airport("SFO", "San Francisco International Airport", "San Francisco", "CA", "San Francisco, CA 94128"),
    airport("SEA", "Seattle-Tacoma International Airport", "Seattle", "WA", "17801 International Blvd, Seattle, WA 98158"),
    airport("LAS", "Harry Reid International Airport", "Las Vegas", "NV", "5757 Wayne Newton Blvd, Las Vegas, NV 89119"),
    airport("PHX", "Phoenix Sky Harbor International Airport", "Phoenix", "AZ", "3400 E Sky Harbor Blvd, Phoenix, AZ 85034"),
    airport("MSP", "Minneapolis-Saint Paul International Airport", "Minneapolis", "MN", "4300 Glumack Dr, St Paul, MN 55111"),
    airport("DTW", "Detroit Metropolitan Airport", "Detroit", "MI", "1 Detroit Metro Airport, Detroit, MI 48242"),
    airport("PHL", "Philadelphia International Airport", "Philadelphia", "PA", "8000 Essington Ave, Philadelphia, PA 19153"),
    airport("BOS", "Boston Logan International Airport", "Boston", "MA", "1 Harborside Dr, Boston, MA 02128"),
    airport("LGA", "LaGuardia Airport", "New York", "NY", "LaGuardia Airport, Queens, NY 11371"),
    airport("BWI", "Baltimore/Washington International Airport", "Baltimore", "MD", "Baltimore, MD 21240"),
    airport("IAD", "Washington Dulles International Airport", "Washington", "DC", "1 Saarinen Cir, Dulles, VA 20166"),
    airport("SLC", "Salt Lake City International Airport", "Salt Lake City", "UT", "776 N Terminal Dr, Salt Lake City, UT 84122"),
    airport("PDX", "Portland International Airport", "Portland", "OR", "7000 NE Airport Way, Portland, OR 97218"),
    airport("SAN", "San Diego International Airport", "San Diego", "CA", "3225 N Harbor Dr, San Diego, CA 92101"),
    airport("STL", "St. Louis Lambert International Airport", "St. Louis", "MO", "10701 Lambert International Blvd, St. Louis, MO 63145"),
    airport("CVG", "Cincinnati/Northern Kentucky International Airport", "Cincinnati", "OH", "3087 Terminal Dr, Hebron, KY 41048"),
    airport("CLE", "Cleveland Hopkins International Airport", "Cleveland", "OH", "5300 Riverside Dr, Cleveland, OH 44135"),
    airport("PIT", "Pittsburgh International Airport", "Pittsburgh", "PA", "1000 Airport Blvd, Pittsburgh, PA 15231"),
    airport("IND", "Indianapolis International Airport", "Indianapolis", "IN", "7800 Col. H. Weir Cook Memorial Dr, Indianapolis, IN 46241"),
    airport("KCI", "Kansas City International Airport", "Kansas City", "MO", "601 Brasilia Ave, Kansas City, MO 64153"),
    airport("OMA", "Eppley Airfield", "Omaha", "NE", "4501 Abbott Dr, Omaha, NE 68110"),
    airport("MCI", "Kansas City International Airport", "Kansas City", "MO", "601 Brasilia Ave, Kansas City, MO 64153"),
    airport("OKC", "Will Rogers World Airport", "Oklahoma City", "OK", "7100 Terminal Dr, Oklahoma City, OK 73159"),
    airport("TUL", "Tulsa International Airport", "Tulsa", "OK", "7777 E Apache St, Tulsa, OK 74115"),
    airport("ABQ", "Albuquerque International Sunport", "Albuquerque", "NM", "2200 Sunport Blvd SE, Albuquerque, NM 87106"),
    airport("BOI", "Boise Airport", "Boise", "ID", "3201 W Airport Way #1000, Boise, ID 83705"),
    airport("SMF", "Sacramento International Airport", "Sacramento", "CA", "6900 Airport Blvd, Sacramento, CA 95837"),
    airport("ONT", "Ontario International Airport", "Ontario", "CA", "2500 E Airport Dr, Ontario, CA 91761"),
    airport("SNA", "John Wayne Airport", "Santa Ana", "CA", "18601 Airport Way, Santa Ana, CA 92707"),
    airport("OAK", "Oakland International Airport", "Oakland", "CA", "1 Airport Dr, Oakland, CA 94621"),
    airport("SJC", "Norman Y. Mineta San Jose International Airport", "San Jose", "CA", "1701 Airport Blvd, San Jose, CA 95110"),
    airport("HNL", "Daniel K. Inouye International Airport", "Honolulu", "HI", "300 Rodgers Blvd, Honolulu, HI 96819"),
    airport("ANC", "Ted Stevens Anchorage International Airport", "Anchorage", "AK", "5000 W International Airport Rd, Anchorage, AK 99502"),
    airport("EWR", "Newark Liberty International Airport", "Newark", "NJ", "3 Brewster Rd, Newark, NJ 07114"),
    airport("DCA", "Ronald Reagan Washington National Airport", "Arlington", "VA", "2401 Ronald Reagan Washington National Airport, Arlington, VA 22202"),
    airport("MKE", "Milwaukee Mitchell International Airport", "Milwaukee", "WI", "5300 S Howell Ave, Milwaukee, WI 53207"),
    airport("CMH", "John Glenn Columbus International Airport", "Columbus", "OH", "4600 International Gateway, Columbus, OH 43219"),
    airport("MSN", "Dane County Regional Airport", "Madison", "WI", "4000 International Ln, Madison, WI 53704"),
    airport("DSM", "Des Moines International Airport", "Des Moines", "IA", "5800 Fleur Dr, Des Moines, IA 50321"),
    airport("GRR", "Gerald R. Ford International Airport", "Grand Rapids", "MI", "5500 44th St SE, Grand Rapids, MI 49512"),
    airport("ROC", "Frederick Douglass Greater Rochester International Airport", "Rochester", "NY", "1200 Brooks Ave, Rochester, NY 14624"),
    airport("SYR", "Syracuse Hancock International Airport", "Syracuse", "NY", "1000 Col Eileen Collins Blvd, Syracuse, NY 13212"),
    airport("BUF", "Buffalo Niagara International Airport", "Buffalo", "NY", "4200 Genesee St, Buffalo, NY 14225"),
    airport("RIC", "Richmond International Airport", "Richmond", "VA", "1 Richard E Byrd Terminal Dr, Richmond, VA 23250"),
    airport("ORF", "Norfolk International Airport", "Norfolk", "VA", "2200 Norview Ave, Norfolk, VA 23518"),
    airport("CRW", "Yeager Airport", "Charleston", "WV", "100 Airport Rd, Charleston, WV 25311"),
    airport("EVV", "Evansville Regional Airport", "Evansville", "IN", "7801 Bussing Dr, Evansville, IN 47725"),
    airport("CID", "The Eastern Iowa Airport", "Cedar Rapids", "IA", "2121 Arthur Collins Pkwy SW, Cedar Rapids, IA 52404"),
    airport("FSD", "Sioux Falls Regional Airport", "Sioux Falls", "SD", "2801 N Jaycee Ln, Sioux Falls, SD 57104"),
    airport("FAR", "Hector International Airport", "Fargo", "ND", "2801 32nd Ave N, Fargo, ND 58102"),
    airport("BIS", "Bismarck Airport", "Bismarck", "ND", "2301 University Dr, Bismarck, ND 58504"),
    airport("RAP", "Rapid City Regional Airport", "Rapid City", "SD", "4550 Terminal Rd, Rapid City, SD 57703"),
    airport("GJT", "Grand Junction Regional Airport", "Grand Junction", "CO", "2828 Walker Field Dr, Grand Junction, CO 81506"),
    airport("ASE", "Aspen/Pitkin County Airport", "Aspen", "CO", "233 E Airport Rd, Aspen, CO 81611"),
    airport("GEG", "Spokane International Airport", "Spokane", "WA", "9000 W Airport Dr, Spokane, WA 99224"),
    airport("BLI", "Bellingham International Airport", "Bellingham", "WA", "4255 Mitchell Way, Bellingham, WA 98226"),
    airport("EUG", "Eugene Airport", "Eugene", "OR", "28801 Douglas Dr, Eugene, OR 97402"),
    airport("RDM", "Redmond Municipal Airport", "Redmond", "OR", "2522 SE Jesse Butler Cir, Redmond, OR 97756"),
    airport("ACV", "California Redwood Coast-Humboldt County Airport", "Arcata", "CA", "3561 Boeing Ave, McKinleyville, CA 95519"),
    airport("CEC", "Del Norte County Airport", "Crescent City", "CA", "100 Dale Rupert Rd, Crescent City, CA 95531"),
    airport("LIH", "Lihue Airport", "Lihue", "HI", "3901 Mokulele Loop, Lihue, HI 96766"),
    airport("OGG", "Kahului Airport", "Kahului", "HI", "1 Keolani Pl, Kahului, HI 96732"),
    airport("ITO", "Hilo International Airport", "Hilo", "HI", "2450 Kekuanaoa St, Hilo, HI 96720"),
    airport("KOA", "Ellison Onizuka Kona International Airport", "Kailua-Kona", "HI", "73-200 Kupipi St, Kailua-Kona, HI 96740"),
    airport("JNU", "Juneau International Airport", "Juneau", "AK", "1873 Shell Simmons Dr, Juneau, AK 99801"),
    airport("FAI", "Fairbanks International Airport", "Fairbanks", "AK", "6450 Airport Way, Fairbanks, AK 99709"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = AIRPORTS.iter().map(|a| a.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), AIRPORTS.len());
    }

    #[test]
    fn test_short_query_returns_nothing() {
        assert!(search_airports("").is_empty());
        assert!(search_airports("b").is_empty());
    }

    #[test]
    fn test_search_by_code() {
        let results = search_airports("bhm");
        assert_eq!(results[0].code, "BHM");
    }

    #[test]
    fn test_all_terms_must_match() {
        let results = search_airports("birmingham international");
        assert!(!results.is_empty());
        assert!(results.iter().all(|a| a.name.contains("International")));

        assert!(search_airports("birmingham zzzz").is_empty());
    }

    #[test]
    fn test_search_city_state_form() {
        let results = search_airports("mobile, al");
        assert!(results.iter().any(|a| a.code == "MOB"));
    }

    #[test]
    fn test_results_capped() {
        assert_eq!(search_airports("airport").len(), MAX_AIRPORT_RESULTS);
    }

    #[test]
    fn test_find_airport_is_case_insensitive() {
        assert_eq!(find_airport("atl").map(|a| a.city), Some("Atlanta"));
        assert!(find_airport("XXX").is_none());
    }

    #[test]
    fn test_flights_url_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        assert_eq!(
            flights_url("BHM", "ATL", today),
            "https://www.google.com/travel/flights?q=Flights%20from%20BHM%20to%20ATL%20on%202025-01-04%20through%202025-01-05"
        );
    }
}
