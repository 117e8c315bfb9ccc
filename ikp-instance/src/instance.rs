use crate::{KnapsackError, KnapsackResult, Solution};
use ikp_utils::Quantity;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::{BufRead, Write},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: usize,
    pub weight: Quantity,
    /// Weight the DP works with. Equal to `weight` unless a solve attempt
    /// rounded it.
    pub clean_weight: Quantity,
    pub profit: Quantity,
}

impl Item {
    pub fn new(id: usize, weight: Quantity, profit: Quantity) -> Self {
        Self {
            id,
            weight,
            clean_weight: weight,
            profit,
        }
    }

    pub fn with_clean_weight(&self, clean_weight: Quantity) -> Self {
        Self {
            clean_weight,
            ..self.clone()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub total_weight: Quantity,
    pub total_profit: Quantity,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Track {
    pub num_items: usize,
    pub max_weight: u32,
    pub max_profit: u32,
    /// Capacity as a percentage of the summed item weights.
    pub budget: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub capacity: Quantity,
    pub items: Vec<Item>,
}

impl Instance {
    pub fn new(capacity: Quantity, items: Vec<Item>) -> KnapsackResult<Self> {
        if capacity.is_negative() {
            return Err(KnapsackError::NegativeCapacity(capacity));
        }
        let weights: Vec<Quantity> = items.iter().map(|item| item.weight).collect();
        checked_total(capacity, &weights)
            .ok_or_else(|| KnapsackError::TooLarge("capacity plus total weight".to_string()))?;
        let profits: Vec<Quantity> = items.iter().map(|item| item.profit).collect();
        checked_total(Quantity::ZERO, &profits)
            .ok_or_else(|| KnapsackError::TooLarge("total profit".to_string()))?;
        Ok(Self { capacity, items })
    }

    /// Reads one instance in the `.kp` line format.
    ///
    /// Ids count every non-comment line, the capacity line included, so an
    /// instance whose first line is `t ...` numbers its items from 2.
    pub fn parse<R: BufRead>(reader: R) -> KnapsackResult<Self> {
        let mut capacity: Option<Quantity> = None;
        let mut items = Vec::new();
        let mut id = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let mut tokens = line.split_whitespace();
            let first = match tokens.next() {
                Some(token) => token,
                None => continue,
            };
            if first == "c" {
                continue;
            }
            id += 1;
            if first == "t" {
                if capacity.is_some() {
                    return Err(KnapsackError::DuplicateCapacity { line: line_no });
                }
                capacity = Some(parse_field(tokens.next(), line_no, "capacity")?);
            } else {
                let weight = parse_field(Some(first), line_no, "weight")?;
                let profit = parse_field(tokens.next(), line_no, "profit")?;
                if weight.is_negative() || profit.is_negative() {
                    return Err(KnapsackError::Parse {
                        line: line_no,
                        message: format!("negative item ({} {})", weight, profit),
                    });
                }
                items.push(Item::new(id, weight, profit));
            }
        }
        Instance::new(capacity.ok_or(KnapsackError::MissingCapacity)?, items)
    }

    pub fn from_kp_str(content: &str) -> KnapsackResult<Self> {
        Self::parse(content.as_bytes())
    }

    pub fn to_kp_string(&self) -> String {
        let mut out = format!("t {}\n", self.capacity);
        for item in self.items_by_id() {
            out.push_str(&format!("{} {}\n", item.weight, item.profit));
        }
        out
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> KnapsackResult<Self> {
        if track.max_weight == 0 || track.max_profit == 0 {
            return Err(KnapsackError::InvalidConfig(
                "max_weight and max_profit must be positive".to_string(),
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());

        // Ids start at 2, as if the capacity line came first
        let items: Vec<Item> = (0..track.num_items)
            .map(|i| {
                let weight: u32 = rng.gen_range(1..=track.max_weight);
                let profit: u32 = rng.gen_range(1..=track.max_profit);
                Item::new(i + 2, weight.into(), profit.into())
            })
            .collect();

        let total_weight: u64 = items
            .iter()
            .filter_map(|item| item.weight.to_integer())
            .map(|w| w as u64)
            .sum();
        let capacity = total_weight * track.budget as u64 / 100;
        Instance::new(capacity.into(), items)
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn items_by_id(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Same capacity, only the items named by `solution`.
    pub fn restrict(&self, solution: &Solution) -> Self {
        Self {
            capacity: self.capacity,
            items: self
                .items
                .iter()
                .filter(|item| solution.contains(item.id))
                .cloned()
                .collect(),
        }
    }

    /// Totals of the true weights and profits of the taken items. Fails on
    /// ids the instance does not know; does not check the capacity.
    pub fn measure(&self, solution: &Solution) -> KnapsackResult<Evaluation> {
        let by_id: BTreeMap<usize, &Item> = self.items.iter().map(|item| (item.id, item)).collect();
        let mut total_weight = Quantity::ZERO;
        let mut total_profit = Quantity::ZERO;
        for id in solution.taken.iter() {
            let item = by_id.get(id).ok_or(KnapsackError::UnknownItem(*id))?;
            total_weight += item.weight;
            total_profit += item.profit;
        }
        Ok(Evaluation {
            total_weight,
            total_profit,
        })
    }

    pub fn verify_solution(&self, solution: &Solution) -> KnapsackResult<Evaluation> {
        let evaluation = self.measure(solution)?;
        if evaluation.total_weight > self.capacity {
            return Err(KnapsackError::Overweight {
                weight: evaluation.total_weight,
                capacity: self.capacity,
            });
        }
        Ok(evaluation)
    }

    /// Writes `p <total_profit>` followed by one `0`/`1` line per item in
    /// ascending id order.
    pub fn write_solution<W: Write>(&self, solution: &Solution, mut writer: W) -> KnapsackResult<()> {
        let evaluation = self.measure(solution)?;
        writeln!(writer, "p {}", evaluation.total_profit)?;
        for item in self.items_by_id() {
            writeln!(writer, "{}", solution.contains(item.id) as u8)?;
        }
        Ok(())
    }
}

/// `start` plus every value, or `None` if any partial sum overflows. Every
/// sum and difference the solver forms is bounded by these totals.
pub fn checked_total(start: Quantity, values: &[Quantity]) -> Option<Quantity> {
    values
        .iter()
        .try_fold(start, |acc, value| acc.checked_add(value))
}

fn parse_field(token: Option<&str>, line: usize, name: &str) -> KnapsackResult<Quantity> {
    let token = token.ok_or_else(|| KnapsackError::Parse {
        line,
        message: format!("missing {}", name),
    })?;
    Quantity::from_dec_str(token).map_err(|e| KnapsackError::Parse {
        line,
        message: format!("invalid {}: {}", name, e),
    })
}
