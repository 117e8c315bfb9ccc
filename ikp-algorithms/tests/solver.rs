mod support;

use ikp_algorithms::*;
use ikp_instance::Solution;
use std::cell::RefCell;
use support::{brute_force_profit, build, fixture_878, q};

fn rounded(modulo: u64, exponents: &[u32]) -> Params {
    Params {
        modulo,
        exponents: exponents.to_vec(),
    }
}

#[test]
fn test_small_scenario_matches_brute_force() {
    let instance = build("10", &[("2", "3"), ("3", "4"), ("4", "5"), ("5", "6")]);
    let report = solve_report(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert_eq!(report.evaluation.total_profit, brute_force_profit(&instance));
    assert_eq!(report.evaluation.total_profit, q("13"));
    assert_eq!(report.solution, Solution::from_ids([2, 3, 5]));
    assert!(!report.guard_triggered());
}

#[test]
fn test_fixture_exact() {
    let instance = fixture_878();
    assert_eq!(instance.num_items(), 20);
    let report = solve_report(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert_eq!(report.evaluation.total_profit, q("1024"));
    assert_eq!(report.evaluation.total_weight, q("871"));
    assert_eq!(
        report.solution,
        Solution::from_ids((2..=14).chain([16, 18, 20, 21]))
    );
}

#[test]
fn test_fixture_rounding_stays_optimal() {
    let instance = fixture_878();
    let configs: [(u64, &[u32]); 13] = [
        (2, &[0]),
        (2, &[0, 1]),
        (3, &[0]),
        (3, &[1, 0]),
        (3, &[1]),
        (3, &[0, 1]),
        (5, &[0]),
        (5, &[1, 0]),
        (10, &[0]),
        (10, &[2]),
        (16, &[2]),
        (100, &[1]),
        (100, &[2]),
    ];
    for (modulo, exponents) in configs {
        let report =
            solve_report(&instance, &rounded(modulo, exponents), &Diagnostics::quiet()).unwrap();
        assert_eq!(
            report.evaluation.total_profit,
            q("1024"),
            "modulo {} exponents {:?}",
            modulo,
            exponents
        );
        assert!(!report.guard_triggered());
    }
}

#[test]
fn test_fixture_rounding_recovered_by_exact_retry() {
    let instance = fixture_878();
    let configs: [(u64, &[u32]); 6] = [
        (10, &[2, 1, 0]),
        (16, &[1, 0]),
        (16, &[1]),
        (3, &[2, 1, 0]),
        (5, &[2]),
        (100, &[1, 0]),
    ];
    for (modulo, exponents) in configs {
        let report =
            solve_report(&instance, &rounded(modulo, exponents), &Diagnostics::quiet()).unwrap();
        assert!(report.guard_triggered(), "modulo {} exponents {:?}", modulo, exponents);
        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.evaluation.total_profit, q("1024"));
    }
}

#[test]
fn test_coarse_rounding_is_feasible_but_may_lose_profit() {
    let instance = fixture_878();
    let cases: [(u64, &[u32], &str); 3] = [
        (3, &[2], "1016"),
        (16, &[0, 1], "788"),
        (100, &[0, 1], "481"),
    ];
    for (modulo, exponents, profit) in cases {
        let report =
            solve_report(&instance, &rounded(modulo, exponents), &Diagnostics::quiet()).unwrap();
        assert!(report.evaluation.total_weight <= instance.capacity);
        assert_eq!(report.evaluation.total_profit, q(profit));
    }
}

#[test]
fn test_guard_resolves_overweight_rounding() {
    let instance = build("7", &[("4", "5"), ("4", "6")]);
    let report = solve_report(&instance, &rounded(10, &[0]), &Diagnostics::quiet()).unwrap();
    assert_eq!(report.attempts.len(), 2);
    assert_eq!(report.attempts[0], Solution::from_ids([2, 3]));
    assert_eq!(report.solution, Solution::from_ids([3]));
    assert_eq!(report.evaluation.total_profit, q("6"));
}

#[test]
fn test_decimal_instance() {
    let instance = build(
        "7.5",
        &[("2.5", "3"), ("2.5", "3"), ("5", "7"), ("0.5", "1")],
    );
    let report = solve_report(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert_eq!(report.evaluation.total_profit, q("10"));
    assert_eq!(report.evaluation.total_profit, brute_force_profit(&instance));
    assert!(report.solution.contains(4));
    assert_eq!(report.solution.len(), 2);
}

#[test]
fn test_zero_weight_item_is_always_taken() {
    let instance = build(
        "10",
        &[("2", "3"), ("3", "4"), ("4", "5"), ("5", "6"), ("0", "5")],
    );
    let solution = solve(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert!(solution.contains(6));
    assert_eq!(instance.measure(&solution).unwrap().total_profit, q("18"));
}

#[test]
fn test_zero_profit_item_never_taken() {
    let instance = build("10", &[("1", "0"), ("2", "3")]);
    let solution = solve(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert_eq!(solution, Solution::from_ids([3]));
}

#[test]
fn test_empty_instance() {
    let instance = build("10", &[]);
    let report = solve_report(&instance, &Params::exact(), &Diagnostics::quiet()).unwrap();
    assert!(report.solution.is_empty());
    assert_eq!(report.evaluation.total_profit, q("0"));
}

#[test]
fn test_verbosity_does_not_change_result() {
    let instance = fixture_878();
    let quiet = solve(&instance, &rounded(10, &[0]), &Diagnostics::quiet()).unwrap();
    let detailed = solve(
        &instance,
        &rounded(10, &[0]),
        &Diagnostics::new(Verbosity::Detailed),
    )
    .unwrap();
    assert_eq!(quiet, detailed);
}

#[test]
fn test_solve_challenge_saves_each_attempt() {
    let instance = build("7", &[("4", "5"), ("4", "6")]);
    let saved = RefCell::new(Vec::new());
    let hyperparameters = serde_json::json!({"modulo": 10, "exponents": [0]})
        .as_object()
        .cloned();
    let save_solution = |solution: &Solution| -> anyhow::Result<()> {
        saved.borrow_mut().push(solution.clone());
        Ok(())
    };
    solve_challenge(&instance, &save_solution, &hyperparameters, &Diagnostics::quiet()).unwrap();
    assert_eq!(
        saved.into_inner(),
        vec![Solution::from_ids([2, 3]), Solution::from_ids([3])]
    );
}

#[test]
fn test_solve_challenge_rejects_bad_hyperparameters() {
    let instance = build("7", &[("4", "5")]);
    let hyperparameters = serde_json::json!({"modulo": 0}).as_object().cloned();
    let ignore = |_: &Solution| -> anyhow::Result<()> { Ok(()) };
    let result = solve_challenge(&instance, &ignore, &hyperparameters, &Diagnostics::quiet());
    assert!(result.is_err());
}
