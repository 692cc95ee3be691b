use super::domain::{PaybackPeriod, Projection, ProjectionInput};

/// Fixed operating assumptions behind every projection. These are platform
/// constants, not per-franchise knobs; the template-driven computation that
/// would replace them is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionAssumptions {
    /// Rent, materials and other non-labor monthly costs.
    pub other_costs: i64,
    /// Assumed monthly revenue.
    pub baseline_revenue: i64,
    /// Assumed upfront investment the ROI and payback are measured against.
    pub assumed_investment: i64,
    pub days_per_month: i64,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            other_costs: 200_000,
            baseline_revenue: 800_000,
            assumed_investment: 500_000,
            days_per_month: 30,
        }
    }
}

/// Stateless evaluator applying the fixed formula to a set of operating
/// inputs. Purely computational: no storage, no clock, no failure modes.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    assumptions: ProjectionAssumptions,
}

impl ProjectionEngine {
    pub fn new(assumptions: ProjectionAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn project(&self, input: &ProjectionInput) -> Projection {
        let assumptions = &self.assumptions;

        // saturating so absurd inputs cannot wrap
        let labor_cost = i64::from(input.workers)
            .saturating_mul(i64::from(input.shift_hours))
            .saturating_mul(i64::from(input.shifts_per_day))
            .saturating_mul(assumptions.days_per_month)
            .saturating_mul(i64::from(input.salary_rate));

        let total_expenses = labor_cost.saturating_add(assumptions.other_costs);
        let net_profit = assumptions.baseline_revenue.saturating_sub(total_expenses);

        let roi = net_profit as f64 / assumptions.assumed_investment as f64 * 100.0;
        let payback_period = if net_profit == 0 {
            PaybackPeriod::NotComputable
        } else {
            PaybackPeriod::Months(assumptions.assumed_investment as f64 / net_profit as f64)
        };

        Projection {
            labor_cost,
            other_costs: assumptions.other_costs,
            revenue: assumptions.baseline_revenue,
            total_expenses,
            net_profit,
            roi,
            payback_period,
        }
    }
}
