use crate::{Instance, KnapsackError, KnapsackResult};
use ikp_utils::Quantity;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, io::BufRead};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub taken: BTreeSet<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            taken: BTreeSet::new(),
        }
    }

    pub fn from_ids<I: IntoIterator<Item = usize>>(ids: I) -> Self {
        Self {
            taken: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: usize) -> bool {
        self.taken.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    /// Reads the solver's output format back. Returns the declared total
    /// profit next to the taken set; the two are not cross-checked here.
    pub fn parse_output<R: BufRead>(reader: R, instance: &Instance) -> KnapsackResult<(Quantity, Self)> {
        let ids: Vec<usize> = instance.items_by_id().iter().map(|item| item.id).collect();
        let mut declared_profit: Option<Quantity> = None;
        let mut flags = Vec::with_capacity(ids.len());
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let malformed = |message: String| KnapsackError::MalformedSolution {
                line: line_no,
                message,
            };
            match declared_profit {
                None => {
                    let value = trimmed
                        .strip_prefix("p ")
                        .ok_or_else(|| malformed(format!("expected 'p <profit>', got '{}'", trimmed)))?;
                    declared_profit = Some(
                        Quantity::from_dec_str(value)
                            .map_err(|e| malformed(format!("invalid profit: {}", e)))?,
                    );
                }
                Some(_) => match trimmed {
                    "0" => flags.push(false),
                    "1" => flags.push(true),
                    other => return Err(malformed(format!("expected 0 or 1, got '{}'", other))),
                },
            }
        }
        let declared_profit = declared_profit.ok_or_else(|| KnapsackError::MalformedSolution {
            line: 0,
            message: "missing 'p <profit>' line".to_string(),
        })?;
        if flags.len() != ids.len() {
            return Err(KnapsackError::MalformedSolution {
                line: 0,
                message: format!("expected {} item lines, got {}", ids.len(), flags.len()),
            });
        }
        let solution = Solution::from_ids(
            ids.into_iter()
                .zip(flags)
                .filter_map(|(id, taken)| taken.then_some(id)),
        );
        Ok((declared_profit, solution))
    }
}
