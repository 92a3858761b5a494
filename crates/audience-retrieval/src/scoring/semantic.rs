//! Distance-to-score transform for index hits.

/// `max(0, 1 - distance) * scale`. Distances of 1 or more score zero.
pub fn semantic_score(distance: f64, scale: f64) -> f64 {
    if distance.is_nan() {
        return 0.0;
    }
    (1.0 - distance).max(0.0) * scale
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_is_higher() {
        assert_eq!(semantic_score(0.0, 10.0), 10.0);
        assert_eq!(semantic_score(0.5, 10.0), 5.0);
        assert_eq!(semantic_score(1.0, 10.0), 0.0);
        assert_eq!(semantic_score(1.7, 10.0), 0.0);
        assert_eq!(semantic_score(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.675_000_1, 2), 2.68);
        assert_eq!(round_to(7.0, 0), 7.0);
    }
}
