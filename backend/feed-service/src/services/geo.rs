//! Great-circle distance between coordinates

use waypost_common::GeoPoint;

/// Haversine distance between two points in kilometers.
///
/// Pure and deterministic; callers must not pass NaN coordinates.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_distance() {
        let p = GeoPoint::new(48.8566, 2.3522);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn paris_to_london_is_about_344_km() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1278);

        let d = distance_km(paris, london);
        assert!((d - 344.0).abs() < 5.0, "got {} km", d);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(40.7128, -74.0060);
        let b = GeoPoint::new(34.0522, -118.2437);

        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }
}
