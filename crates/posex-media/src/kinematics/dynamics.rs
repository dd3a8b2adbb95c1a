//! Finite-difference velocity and acceleration of scalar series.

/// Finite-difference derivatives at a fixed sample rate.
///
/// Interior samples use central differences; the first and last samples use
/// forward and backward differences. Output length always equals input
/// length. Series with fewer than two samples have zero derivatives.
#[derive(Debug, Clone, Copy)]
pub struct MotionDynamics {
    sample_rate: f64,
}

impl MotionDynamics {
    /// Create for a series sampled at `sample_rate` samples per second.
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// First derivative of `series` with respect to time.
    pub fn gradient(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        if n < 2 {
            return vec![0.0; n];
        }

        let rate = self.sample_rate;
        let mut out = Vec::with_capacity(n);
        out.push((series[1] - series[0]) * rate);
        out.extend(
            series
                .windows(3)
                .map(|w| (w[2] - w[0]) * rate / 2.0),
        );
        out.push((series[n - 1] - series[n - 2]) * rate);
        out
    }

    /// Velocity of `series`.
    pub fn velocity(&self, series: &[f64]) -> Vec<f64> {
        self.gradient(series)
    }

    /// Velocity and acceleration of `series`.
    pub fn derivatives(&self, series: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let velocity = self.gradient(series);
        let acceleration = self.gradient(&velocity);
        (velocity, acceleration)
    }

    /// Acceleration of `series`.
    pub fn acceleration(&self, series: &[f64]) -> Vec<f64> {
        self.derivatives(series).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_series() {
        let dynamics = MotionDynamics::new(30.0);
        let (v, a) = dynamics.derivatives(&[42.0; 10]);
        assert_eq!(v.len(), 10);
        assert_eq!(a.len(), 10);
        assert!(v.iter().all(|x| x.abs() < 1e-9));
        assert!(a.iter().all(|x| x.abs() < 1e-9));
    }

    #[test]
    fn test_linear_series() {
        let dynamics = MotionDynamics::new(30.0);
        let series: Vec<f64> = (0..12).map(|i| 10.0 + 3.0 * i as f64).collect();
        let (v, a) = dynamics.derivatives(&series);
        // 3 units per sample at 30 samples/s
        assert!(v.iter().all(|x| (x - 90.0).abs() < 1e-9));
        assert!(a.iter().all(|x| x.abs() < 1e-9));
    }

    #[test]
    fn test_quadratic_interior_acceleration() {
        // x = t^2 sampled at 10 Hz has acceleration 2
        let dynamics = MotionDynamics::new(10.0);
        let series: Vec<f64> = (0..20).map(|i| (i as f64 / 10.0).powi(2)).collect();
        let a = dynamics.acceleration(&series);
        for value in &a[2..18] {
            assert!((value - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_boundary_differences() {
        let dynamics = MotionDynamics::new(1.0);
        let v = dynamics.gradient(&[0.0, 1.0, 4.0, 9.0]);
        assert_eq!(v, vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_short_series() {
        let dynamics = MotionDynamics::new(30.0);
        assert!(dynamics.gradient(&[]).is_empty());
        assert_eq!(dynamics.gradient(&[5.0]), vec![0.0]);
        assert_eq!(dynamics.gradient(&[1.0, 2.0]), vec![30.0, 30.0]);
    }
}
