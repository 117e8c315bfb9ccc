use crate::{preprocess, reconstruct, Diagnostics, IntervalTable, Params};
use anyhow::Result;
use ikp_instance::{Evaluation, Instance, KnapsackError, KnapsackResult, Solution};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// A rounded attempt plus at most one exact retry.
const MAX_ATTEMPTS: usize = 2;

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solution: Solution,
    pub evaluation: Evaluation,
    /// Every attempt's solution in the order they ran; the last one is
    /// `solution`.
    pub attempts: Vec<Solution>,
}

impl SolveReport {
    pub fn guard_triggered(&self) -> bool {
        self.attempts.len() > 1
    }
}

/// Runs the full pipeline once: preprocessing, table, reconstruction. The
/// returned set is only feasible for certain when `params` does not round.
pub fn solve_attempt(
    instance: &Instance,
    params: &Params,
    diagnostics: &Diagnostics,
) -> KnapsackResult<Solution> {
    let pre = preprocess(&instance.items, instance.capacity, params, diagnostics)?;
    let table = IntervalTable::build(&pre.dp_items, instance.capacity, diagnostics)?;
    let taken = reconstruct(&table, &pre.dp_items)?;
    Ok(Solution::from_ids(
        taken
            .into_iter()
            .chain(pre.set_aside.iter().map(|item| item.id)),
    ))
}

/// Solves `instance`, rounding weights as `params` asks. If the rounded
/// selection turns out heavier than the capacity, the items it chose are
/// solved again exactly and that answer is returned instead.
pub fn solve_report(
    instance: &Instance,
    params: &Params,
    diagnostics: &Diagnostics,
) -> KnapsackResult<SolveReport> {
    let mut attempts = Vec::with_capacity(MAX_ATTEMPTS);
    let mut current = instance.clone();
    let mut current_params = params.clone();
    loop {
        let solution = solve_attempt(&current, &current_params, diagnostics)?;
        let evaluation = instance.measure(&solution)?;
        attempts.push(solution.clone());
        if diagnostics.summary() {
            info!(
                "Attempt {}: {} items taken, weight {}, profit {}",
                attempts.len(),
                solution.len(),
                evaluation.total_weight,
                evaluation.total_profit
            );
        }
        if evaluation.total_weight <= instance.capacity {
            return Ok(SolveReport {
                solution,
                evaluation,
                attempts,
            });
        }
        if !current_params.rounds() || attempts.len() >= MAX_ATTEMPTS {
            return Err(KnapsackError::Overweight {
                weight: evaluation.total_weight,
                capacity: instance.capacity,
            });
        }
        warn!(
            "Rounded solution weighs {} but capacity is {}; re-solving exactly over its {} items",
            evaluation.total_weight,
            instance.capacity,
            solution.len()
        );
        current = instance.restrict(&solution);
        current_params = Params::exact();
    }
}

pub fn solve(
    instance: &Instance,
    params: &Params,
    diagnostics: &Diagnostics,
) -> KnapsackResult<Solution> {
    Ok(solve_report(instance, params, diagnostics)?.solution)
}

pub fn solve_challenge(
    instance: &Instance,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
    diagnostics: &Diagnostics,
) -> Result<()> {
    let params = Params::initialize(hyperparameters)?;
    let report = solve_report(instance, &params, diagnostics)?;
    for solution in &report.attempts {
        save_solution(solution)?;
    }
    Ok(())
}
