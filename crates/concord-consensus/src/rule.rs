//! The per-agent update rule.
//!
//! Each round an agent moves a fraction α of the way toward its local average:
//! - local average = (own + Σ neighbors) / (1 + n)
//! - updated = own + α × (local average − own)
//!
//! An agent with no neighbors keeps its value.

/// Fraction of agents allowed to still be moving for the change-ratio tier
/// to report convergence (strictly below this).
pub const CHANGE_RATIO_THRESHOLD: f64 = 0.2;

/// Step size used when none is given.
pub const DEFAULT_STEP_SIZE: f64 = 0.5;

/// Round budget used when none is given.
pub const DEFAULT_MAX_ROUNDS: usize = 1000;

/// Convergence tolerance used when none is given.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Whether a step size lies in (0, 1]. NaN is rejected.
pub fn is_valid_step_size(step_size: f64) -> bool {
    step_size > 0.0 && step_size <= 1.0
}

/// Mean of an agent's own value and its neighbors', weighted equally.
///
/// # Examples
///
/// ```
/// use concord_consensus::local_average;
///
/// assert_eq!(local_average(0.0, 10.0, 1), 5.0);
/// assert_eq!(local_average(10.0, 20.0, 2), 10.0);
/// ```
pub fn local_average(own: f64, neighbor_sum: f64, neighbor_count: usize) -> f64 {
    (own + neighbor_sum) / (1 + neighbor_count) as f64
}

/// One agent's value after a round.
///
/// # Examples
///
/// ```
/// use concord_consensus::blend;
///
/// assert_eq!(blend(0.0, 10.0, 1, 0.5), 2.5);  // halfway to 5.0
/// assert_eq!(blend(0.0, 10.0, 1, 1.0), 5.0);  // all the way
/// assert_eq!(blend(7.0, 0.0, 0, 0.5), 7.0);   // isolated
/// ```
pub fn blend(own: f64, neighbor_sum: f64, neighbor_count: usize, step_size: f64) -> f64 {
    if neighbor_count == 0 {
        return own;
    }
    own + step_size * (local_average(own, neighbor_sum, neighbor_count) - own)
}
