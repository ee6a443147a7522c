use log::warn;

/// One row of an order sweep: the double integral evaluated with the
/// `points`-point rule.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderEstimate {
    /// Order index of the rule (0..=3)
    pub order: usize,
    /// Number of Gauss-Legendre points per variable
    pub points: usize,
    /// Value of the integration
    pub val: f64,
    /// Difference to the previous order, `None` for the first row
    pub change: Option<f64>,
}

impl OrderEstimate {
    pub(crate) fn new(order: usize, val: f64, previous: Option<&OrderEstimate>) -> OrderEstimate {
        OrderEstimate {
            order,
            points: order + 2,
            val,
            change: previous.map(|p| val - p.val),
        }
    }

    /// True when the change grew compared to the previous row by more than
    /// rounding noise.
    pub(crate) fn is_diverging(&self, previous: Option<&OrderEstimate>) -> bool {
        match (self.change, previous.and_then(|p| p.change)) {
            (Some(change), Some(prev_change)) => {
                let noise = 1e-12 * self.val.abs().max(f64::MIN_POSITIVE);
                if change.abs() <= noise && prev_change.abs() <= noise {
                    false
                } else {
                    change.abs() > prev_change.abs()
                }
            }
            _ => false,
        }
    }

    /// Warn when the estimate is not converging or not finite.
    pub(crate) fn issue_warning(&self, previous: Option<&OrderEstimate>) {
        if self.is_diverging(previous) {
            warn!(
                "Estimate is not converging: change {:e} at N = {} exceeds {:?} at N = {}",
                self.change.unwrap_or(0.0),
                self.order,
                previous.and_then(|p| p.change),
                self.order - 1
            );
        }
        if !self.val.is_finite() {
            warn!("Non-finite estimate {} at N = {}", self.val, self.order);
        }
    }
}
