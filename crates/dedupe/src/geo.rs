use civic_db::issues::models::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

pub fn distance_between(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km(a.lat, a.lng, b.lat, b.lng)
}

/// Render a distance for humans as whole meters, e.g. `"120m"`.
pub fn format_meters(km: f64) -> String {
    format!("{}m", (km * 1000.0).round() as i64)
}

/// Render a distance for humans as whole kilometers, e.g. `"6km"`.
pub fn format_kilometers(km: f64) -> String {
    format!("{}km", km.round() as i64)
}

/// Render a distance that lies beyond `limit_km` without it ever reading as
/// inside the limit: whole kilometers when those stay above it, otherwise
/// tenths rounded up (`"5.2km"` rather than `"5km"` against a 5km limit).
pub fn format_kilometers_beyond(km: f64, limit_km: f64) -> String {
    if km.round() > limit_km {
        return format_kilometers(km);
    }
    format!("{:.1}km", (km * 10.0).ceil() / 10.0)
}
