use crate::IntervalTable;
use ikp_instance::{Item, KnapsackResult};

/// Walks `table` from the first item to the last and returns the ids of the
/// items an optimal packing takes. `items` must be the slice the table was
/// built from. The table is only read, so repeated calls agree.
pub fn reconstruct(table: &IntervalTable, items: &[Item]) -> KnapsackResult<Vec<usize>> {
    let mut cursor = match table.top_interval()? {
        Some(interval) => interval,
        None => return Ok(Vec::new()),
    };
    let mut taken = Vec::new();
    for (step, item) in items.iter().enumerate() {
        let with_item = table.get_total_profit(step, cursor.lower, cursor.upper)?;
        let without_item = table.get_total_profit(step + 1, cursor.lower, cursor.upper)?;
        if with_item > without_item {
            taken.push(item.id);
            cursor = cursor.shifted_down(item.clean_weight);
        }
    }
    Ok(taken)
}
