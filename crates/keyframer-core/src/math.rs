//! Numeric helpers shared by the resolver and the CSS formatter.

/// Normalized position of `x` inside `[min, max]`, clamped to `[0, 1]`.
pub fn linear(x: f32, min: f32, max: f32) -> f32 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    (x - min) / (max - min)
}

pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(x: f32) -> f32 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_clamps_outside_the_interval() {
        assert_eq!(linear(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(linear(0.0, 0.0, 10.0), 0.0);
        assert_eq!(linear(5.0, 0.0, 10.0), 0.5);
        assert_eq!(linear(10.0, 0.0, 10.0), 1.0);
        assert_eq!(linear(11.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn linear_degenerate_interval() {
        // ip == op: everything below is 0, everything at/above is 1.
        assert_eq!(linear(4.9, 5.0, 5.0), 0.0);
        assert_eq!(linear(5.0, 5.0, 5.0), 0.0);
        assert_eq!(linear(5.1, 5.0, 5.0), 1.0);
    }

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(12.0), 12.0);
    }
}
