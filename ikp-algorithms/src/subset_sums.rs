use crate::HashSet;
use ikp_utils::Quantity;

/// Distinct subset sums of every prefix of `weights`.
///
/// Entry `i` of the result holds each sum reachable with the first `i`
/// weights exactly once, in the order it was first produced; entry `0` is
/// `[0]`. The work done is proportional to the number of distinct sums, not to
/// the number of subsets.
pub fn subset_sums(weights: &[Quantity]) -> Vec<Vec<Quantity>> {
    let mut result = Vec::with_capacity(weights.len() + 1);
    let mut seen: HashSet<Quantity> = HashSet::default();
    seen.insert(Quantity::ZERO);
    result.push(vec![Quantity::ZERO]);
    for weight in weights {
        let previous = &result[result.len() - 1];
        let mut sums = previous.clone();
        for sum in previous {
            let extended = sum + weight;
            if seen.insert(extended) {
                sums.push(extended);
            }
        }
        result.push(sums);
    }
    result
}
