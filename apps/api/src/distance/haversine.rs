use crate::places::models::LatLng;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const METERS_PER_MILE: f64 = 1609.34;
pub const MILES_PER_METER: f64 = 0.000621371;

/// Great-circle distance between two points, rounded to whole miles.
pub fn haversine_miles(from: LatLng, to: LatLng) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_MILES * c).round()
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Converts a metre distance back to whole miles.
pub fn meters_to_miles(meters: f64) -> f64 {
    (meters * MILES_PER_METER).round()
}

/// Drive-time estimate at 60 mph: (display minutes, seconds).
pub fn duration_at_60_mph(miles: f64) -> (f64, f64) {
    ((miles / 60.0 * 60.0).round(), (miles / 60.0 * 3600.0).round())
}
