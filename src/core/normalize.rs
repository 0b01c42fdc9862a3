//! Normalizes subscription costs to a common monthly cadence.

use crate::core::subscription::{PaymentCycle, Subscription};

/// Average days per month used to scale weekly charges.
const DAYS_PER_MONTH: f64 = 30.0;

/// Maps a cost charged every `cycle` to its monthly equivalent.
///
/// Weekly charges are scaled by `30 / 7`. The cost is expected to be
/// non-negative; no validation happens here.
pub fn monthly_equivalent(cost: f64, cycle: PaymentCycle) -> f64 {
    match cycle {
        PaymentCycle::Monthly => cost,
        PaymentCycle::Quarterly => cost / 3.0,
        PaymentCycle::Annually => cost / 12.0,
        PaymentCycle::Weekly => cost * (DAYS_PER_MONTH / 7.0),
    }
}

impl Subscription {
    pub fn monthly_cost(&self) -> f64 {
        monthly_equivalent(self.cost, self.payment_cycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_monthly_equivalent_per_cycle() {
        assert_eq!(monthly_equivalent(17.99, PaymentCycle::Monthly), 17.99);
        assert!((monthly_equivalent(12.99, PaymentCycle::Quarterly) - 4.33).abs() < EPSILON);
        assert!((monthly_equivalent(120.0, PaymentCycle::Annually) - 10.0).abs() < EPSILON);
        assert!((monthly_equivalent(10.0, PaymentCycle::Weekly) - 42.857).abs() < 1e-3);
    }

    #[test]
    fn test_monthly_equivalent_is_linear() {
        for cycle in PaymentCycle::ALL {
            for x in [0.0, 1.0, 4.99, 60.99, 1234.5] {
                for k in [0.0, 0.5, 2.0, 12.0] {
                    let lhs = monthly_equivalent(k * x, cycle);
                    let rhs = k * monthly_equivalent(x, cycle);
                    assert!(
                        (lhs - rhs).abs() < EPSILON * (1.0 + rhs.abs()),
                        "{cycle} k={k} x={x}: {lhs} != {rhs}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_cost_stays_zero() {
        for cycle in PaymentCycle::ALL {
            assert_eq!(monthly_equivalent(0.0, cycle), 0.0);
        }
    }
}
