use crate::{relevant_intervals, subset_sums, Bound, Diagnostics, Interval, Partition};
use ikp_instance::{Item, KnapsackError, KnapsackResult};
use ikp_utils::Quantity;
use tracing::{debug, info};

/// Optimal profit per (step, relevant interval).
///
/// `steps[s]` holds, sorted by lower bound, the best profit reachable with
/// items `s..` for any leftover capacity inside each interval. Steps are
/// written last to first and never touched again.
#[derive(Debug, Clone)]
pub struct IntervalTable {
    steps: Vec<Vec<(Interval, Quantity)>>,
}

impl IntervalTable {
    /// `items` must be sorted ascending by `clean_weight`, and every
    /// `clean_weight` must be positive.
    pub fn build(
        items: &[Item],
        capacity: Quantity,
        diagnostics: &Diagnostics,
    ) -> KnapsackResult<Self> {
        let num_items = items.len();
        let mut table = Self {
            steps: vec![Vec::new(); num_items],
        };
        if num_items == 0 {
            return Ok(table);
        }

        let weights: Vec<Quantity> = items.iter().map(|item| item.clean_weight).collect();
        let reversed: Vec<Quantity> = weights.iter().rev().cloned().collect();
        // backward[k]: sums over the last k items
        let backward = subset_sums(&reversed);
        // forward[s]: sums over the items before step s
        let forward = subset_sums(&weights[..num_items - 1]);

        if diagnostics.detailed() {
            for (step, sums) in forward.iter().enumerate() {
                debug!("Forward sums before item {}: {:?}", step + 1, display_all(sums));
            }
            for step in 0..num_items {
                debug!(
                    "Backward sums from item {}: {:?}",
                    step + 1,
                    display_all(&backward[num_items - step])
                );
            }
        }

        let mut total_entries = 0;
        for step in (0..num_items).rev() {
            let partition = Partition::from_sums(&backward[num_items - step]);
            let leftovers: Vec<Quantity> = forward[step]
                .iter()
                .map(|sum| capacity - sum)
                .filter(|leftover| !leftover.is_negative())
                .collect();
            let relevant = relevant_intervals(&leftovers, &partition);

            let weight = items[step].clean_weight;
            let profit = items[step].profit;
            let mut entries = Vec::with_capacity(relevant.len());
            for interval in relevant {
                let mut best = table.get_total_profit(step + 1, interval.lower, interval.upper)?;
                if Bound::Finite(weight) <= interval.lower {
                    let remaining = interval.shifted_down(weight);
                    let taken = profit
                        + table.get_total_profit(step + 1, remaining.lower, remaining.upper)?;
                    if taken > best {
                        best = taken;
                    }
                }
                entries.push((interval, best));
            }
            entries.sort_by_key(|(interval, _)| interval.lower);

            if diagnostics.detailed() {
                debug!(
                    "Item {}: {} of {} intervals relevant: {}",
                    step + 1,
                    entries.len(),
                    partition.len(),
                    entries
                        .iter()
                        .map(|(interval, profit)| format!("{} -> {}", interval, profit))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            total_entries += entries.len();
            table.steps[step] = entries;
        }

        if diagnostics.summary() {
            info!(
                "Interval table: {} items, {} entries",
                num_items, total_entries
            );
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn entries(&self, step: usize) -> &[(Interval, Quantity)] {
        self.steps.get(step).map(|e| e.as_slice()).unwrap_or(&[])
    }

    pub fn num_entries(&self) -> usize {
        self.steps.iter().map(|e| e.len()).sum()
    }

    /// Best profit with items `step..` for any leftover capacity in
    /// `[lower, upper)`. Past the last step nothing is left to take. Within
    /// the table exactly one stored interval must cover the query; a miss means
    /// the table was built wrongly and is reported as an error.
    pub fn get_total_profit(
        &self,
        step: usize,
        lower: Bound,
        upper: Bound,
    ) -> KnapsackResult<Quantity> {
        let entries = match self.steps.get(step) {
            Some(entries) => entries,
            None => return Ok(Quantity::ZERO),
        };
        let query = Interval::new(lower, upper);
        let idx = entries.partition_point(|(interval, _)| interval.lower <= lower);
        match idx.checked_sub(1).map(|i| &entries[i]) {
            Some((interval, profit)) if interval.covers(&query) => Ok(*profit),
            _ => Err(KnapsackError::InvariantViolation {
                step,
                lower: lower.to_string(),
                upper: upper.to_string(),
            }),
        }
    }

    /// The single entry of step 0, whose interval holds the full capacity.
    pub fn top_interval(&self) -> KnapsackResult<Option<Interval>> {
        match self.steps.first() {
            None => Ok(None),
            Some(entries) if entries.len() == 1 => Ok(Some(entries[0].0)),
            Some(entries) => Err(KnapsackError::InvariantViolation {
                step: 0,
                lower: entries
                    .first()
                    .map(|(interval, _)| interval.lower.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                upper: entries
                    .last()
                    .map(|(interval, _)| interval.upper.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            }),
        }
    }
}

fn display_all(values: &[Quantity]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
