use ikp_instance::*;
use ikp_utils::Quantity;

fn instance() -> Instance {
    Instance::from_kp_str("t 10\n2 3\n3 4\n4 5\n5 6\n").unwrap()
}

#[test]
fn test_write_solution() {
    let mut out = Vec::new();
    instance()
        .write_solution(&Solution::from_ids([2, 3, 5]), &mut out)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "p 13\n1\n1\n0\n1\n");
}

#[test]
fn test_parse_output() {
    let (profit, solution) = Solution::parse_output("p 13\n1\n1\n0\n1\n".as_bytes(), &instance()).unwrap();
    assert_eq!(profit, Quantity::from(13u32));
    assert_eq!(solution, Solution::from_ids([2, 3, 5]));
}

#[test]
fn test_parse_output_rejects_bad_lines() {
    assert!(matches!(
        Solution::parse_output("1\n0\n".as_bytes(), &instance()),
        Err(KnapsackError::MalformedSolution { line: 1, .. })
    ));
    assert!(matches!(
        Solution::parse_output("p 3\n1\n2\n0\n0\n".as_bytes(), &instance()),
        Err(KnapsackError::MalformedSolution { line: 3, .. })
    ));
    assert!(matches!(
        Solution::parse_output("p 3\n1\n".as_bytes(), &instance()),
        Err(KnapsackError::MalformedSolution { .. })
    ));
    assert!(matches!(
        Solution::parse_output("".as_bytes(), &instance()),
        Err(KnapsackError::MalformedSolution { .. })
    ));
}

#[test]
fn test_verify_solution() {
    let instance = instance();
    let evaluation = instance.verify_solution(&Solution::from_ids([2, 3, 5])).unwrap();
    assert_eq!(evaluation.total_weight, Quantity::from(10u32));
    assert_eq!(evaluation.total_profit, Quantity::from(13u32));

    assert!(matches!(
        instance.verify_solution(&Solution::from_ids([2, 3, 4, 5])),
        Err(KnapsackError::Overweight { .. })
    ));
    assert!(matches!(
        instance.verify_solution(&Solution::from_ids([42])),
        Err(KnapsackError::UnknownItem(42))
    ));
}

#[test]
fn test_measure_ignores_capacity() {
    let evaluation = instance().measure(&Solution::from_ids([2, 3, 4, 5])).unwrap();
    assert_eq!(evaluation.total_weight, Quantity::from(14u32));
}

#[test]
fn test_solution_serde() {
    let solution = Solution::from_ids([5, 2]);
    let json = serde_json::to_string(&solution).unwrap();
    assert_eq!(json, r#"{"taken":[2,5]}"#);
    assert_eq!(serde_json::from_str::<Solution>(&json).unwrap(), solution);
}
