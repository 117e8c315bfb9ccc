#![allow(dead_code)]

use ikp_instance::Instance;
use ikp_utils::Quantity;

/// The 20-item instance with capacity 878 used across the scenario tests.
pub const FIXTURE_878: &str = "\
c twenty items, capacity 878
t 878
92 44
4 46
43 90
83 72
84 91
68 40
92 75
82 35
6 8
44 54
32 78
18 40
56 77
83 15
25 61
96 17
70 75
48 29
14 75
58 63
";

pub fn fixture_878() -> Instance {
    Instance::from_kp_str(FIXTURE_878).unwrap()
}

pub fn q(value: &str) -> Quantity {
    Quantity::from_dec_str(value).unwrap()
}

pub fn build(capacity: &str, items: &[(&str, &str)]) -> Instance {
    let mut content = format!("t {}\n", capacity);
    for (weight, profit) in items {
        content.push_str(&format!("{} {}\n", weight, profit));
    }
    Instance::from_kp_str(&content).unwrap()
}

/// Best profit over every subset; only for small instances.
pub fn brute_force_profit(instance: &Instance) -> Quantity {
    let n = instance.items.len();
    assert!(n <= 24, "brute force is limited to small instances");
    let mut best = Quantity::ZERO;
    for mask in 0u32..(1u32 << n) {
        let mut weight = Quantity::ZERO;
        let mut profit = Quantity::ZERO;
        for (i, item) in instance.items.iter().enumerate() {
            if mask & (1 << i) != 0 {
                weight += item.weight;
                profit += item.profit;
            }
        }
        if weight <= instance.capacity && profit > best {
            best = profit;
        }
    }
    best
}
