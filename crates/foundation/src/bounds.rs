/// Geographic axis-aligned bounding box, degrees, `[lon, lat]` axis order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        GeoBounds { min, max }
    }

    /// Collaborator array form: `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn from_corners(c: [f64; 4]) -> Self {
        GeoBounds::new([c[0], c[1]], [c[2], c[3]])
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.min[0] <= lon && lon <= self.max[0] && self.min[1] <= lat && lat <= self.max[1]
    }

    /// Finite and non-inverted on both axes. A zero-area box is well formed.
    pub fn is_well_formed(&self) -> bool {
        self.min[0].is_finite()
            && self.min[1].is_finite()
            && self.max[0].is_finite()
            && self.max[1].is_finite()
            && self.min[0] <= self.max[0]
            && self.min[1] <= self.max[1]
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let b = GeoBounds::from_corners([0.0, 0.0, 1.0, 1.0]);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(1.0, 1.0));
        assert!(b.contains(0.0, 1.0));
        assert!(b.contains(1.0, 0.0));
        assert!(b.contains(0.5, 0.5));
        assert!(!b.contains(1.000001, 0.5));
        assert!(!b.contains(0.5, -0.000001));
    }

    #[test]
    fn from_corners_keeps_lon_lat_axis_order() {
        let b = GeoBounds::from_corners([-10.0, -5.0, 10.0, 5.0]);
        assert_eq!(b.min, [-10.0, -5.0]);
        assert_eq!(b.max, [10.0, 5.0]);
    }

    #[test]
    fn well_formedness() {
        assert!(GeoBounds::from_corners([0.0, 0.0, 1.0, 1.0]).is_well_formed());
        // Zero-area boxes are still valid queries.
        assert!(GeoBounds::from_corners([0.5, 0.5, 0.5, 0.5]).is_well_formed());
        // Inverted on either axis is not.
        assert!(!GeoBounds::from_corners([1.0, 0.0, 0.0, 1.0]).is_well_formed());
        assert!(!GeoBounds::from_corners([0.0, 1.0, 1.0, 0.0]).is_well_formed());
        assert!(!GeoBounds::from_corners([f64::NAN, 0.0, 1.0, 1.0]).is_well_formed());
        assert!(!GeoBounds::from_corners([0.0, 0.0, f64::INFINITY, 1.0]).is_well_formed());
    }
}
