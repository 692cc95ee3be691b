use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::accounts::UserId;
use crate::catalog::FranchiseId;

/// Identifier wrapper for stored calculation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalculationId(pub i64);

/// Operating inputs for a projection run, as submitted by the client.
///
/// Parsing is deliberately permissive, matching the platform's historical
/// contract: numbers are taken as-is, numeric strings are parsed, and
/// anything else — absent fields, nulls, garbage text, negative or
/// fractional values — normalizes to 0. The engine therefore never fails on
/// malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInput {
    #[serde(default, deserialize_with = "lenient_count")]
    pub workers: u32,
    #[serde(rename = "shiftTime", default, deserialize_with = "lenient_count")]
    pub shift_hours: u32,
    #[serde(rename = "shifts", default, deserialize_with = "lenient_count")]
    pub shifts_per_day: u32,
    #[serde(rename = "salary", default, deserialize_with = "lenient_count")]
    pub salary_rate: u32,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => match number.as_u64() {
            Some(whole) => clamp_u32(whole),
            // fractional or negative; keep the non-negative integer part
            None => number
                .as_f64()
                .filter(|raw| *raw > 0.0)
                .map(|raw| raw as u32)
                .unwrap_or(0),
        },
        Some(Value::String(raw)) => raw.trim().parse::<u64>().map(clamp_u32).unwrap_or(0),
        _ => 0,
    })
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Months until the assumed investment is recovered.
///
/// A zero net profit makes the division meaningless, so it is reported as an
/// explicit `NotComputable` sentinel rather than propagating an infinity. A
/// negative net profit is surfaced as negative months — the caller decides
/// how to present an unrecoverable investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PaybackPeriod {
    Months(f64),
    NotComputable,
}

/// Result of one projection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub labor_cost: i64,
    pub other_costs: i64,
    pub revenue: i64,
    pub total_expenses: i64,
    pub net_profit: i64,
    pub roi: f64,
    pub payback_period: PaybackPeriod,
}

/// A persisted projection run: the input/result pair tied to the user and
/// franchise it was computed for. Append-only.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationRecord {
    pub id: CalculationId,
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub input: ProjectionInput,
    pub result: Projection,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the calculation history.
#[derive(Debug, Clone)]
pub struct NewCalculation {
    pub user_id: UserId,
    pub franchise_id: FranchiseId,
    pub input: ProjectionInput,
    pub result: Projection,
}

/// Wire payload for `POST /api/calculate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub franchise_id: Option<FranchiseId>,
    #[serde(default)]
    pub input_data: Option<ProjectionInput>,
}
