//! One-shot sizing from form text.

use rc_core::numeric::parse_lenient;
use rc_sizing::{BackupPolicy, DisplaySlots, SolveInput, SolveOutcome, solve};
use serde::Serialize;

use crate::error::AppResult;

/// Form fields exactly as typed.
#[derive(Debug, Clone, Copy)]
pub struct QuickSolveRequest<'a> {
    pub estimated_load: &'a str,
    pub safety_factor_percent: &'a str,
    pub unit_capacity_tr: &'a str,
    pub backup_policy: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickSolve {
    pub outcome: SolveOutcome,
    pub slots: DisplaySlots,
}

/// Size one room. Only the backup policy can be rejected; numeric fields
/// fall back the same way the panel does.
pub fn quick_solve(request: &QuickSolveRequest<'_>) -> AppResult<QuickSolve> {
    let backup_policy: BackupPolicy = request.backup_policy.parse()?;
    let input = SolveInput {
        estimated_load: parse_lenient(request.estimated_load),
        safety_factor_percent: parse_lenient(request.safety_factor_percent).unwrap_or(f64::NAN),
        unit_capacity: parse_lenient(request.unit_capacity_tr).unwrap_or(f64::NAN),
        backup_policy,
    };
    let outcome = solve(&input);
    let slots = DisplaySlots::render(&outcome);
    Ok(QuickSolve { outcome, slots })
}
