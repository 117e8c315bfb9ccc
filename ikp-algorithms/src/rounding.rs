use crate::{Diagnostics, Params};
use ikp_instance::{checked_total, Item, KnapsackError, KnapsackResult};
use ikp_utils::Quantity;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// A whole number written in `base`, keeping only its non-zero digits keyed
/// by exponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseDigits {
    base: u64,
    digits: BTreeMap<u32, u64>,
}

impl SparseDigits {
    pub fn new(value: u128, base: u64) -> KnapsackResult<Self> {
        if base < 2 {
            return Err(KnapsackError::InvalidConfig(format!(
                "cannot write digits in base {}",
                base
            )));
        }
        let mut digits = BTreeMap::new();
        let mut rest = value;
        let mut exponent = 0;
        while rest > 0 {
            let digit = (rest % base as u128) as u64;
            if digit != 0 {
                digits.insert(exponent, digit);
            }
            rest /= base as u128;
            exponent += 1;
        }
        Ok(Self { base, digits })
    }

    pub fn digits(&self) -> &BTreeMap<u32, u64> {
        &self.digits
    }

    pub fn digit(&self, exponent: u32) -> u64 {
        self.digits.get(&exponent).cloned().unwrap_or(0)
    }

    /// Dense value, or `None` if it does not fit in a `u128`.
    pub fn value(&self) -> Option<u128> {
        self.digits.iter().try_fold(0u128, |acc, (&exponent, &digit)| {
            (self.base as u128)
                .checked_pow(exponent)?
                .checked_mul(digit as u128)?
                .checked_add(acc)
        })
    }

    pub fn pop(&mut self, exponent: u32) -> u64 {
        self.digits.remove(&exponent).unwrap_or(0)
    }

    /// Adds one at `exponent` and carries upwards while digits overflow.
    /// Exponents in `skip` are being discarded and never receive the carry.
    pub fn increment(&mut self, exponent: u32, skip: &BTreeSet<u32>) {
        let mut target = exponent;
        loop {
            while skip.contains(&target) {
                target += 1;
            }
            let digit = self.digit(target) + 1;
            if digit < self.base {
                self.digits.insert(target, digit);
                return;
            }
            self.digits.remove(&target);
            target += 1;
        }
    }
}

/// Drops the digits of `value` at `exponents`. Only the first listed exponent
/// rounds: if its digit is at least half the base, the next surviving digit
/// above it is incremented. The rest are cut off.
pub fn round_digits(value: u128, base: u64, exponents: &[u32]) -> KnapsackResult<Option<u128>> {
    let mut digits = SparseDigits::new(value, base)?;
    let skip: BTreeSet<u32> = exponents.iter().cloned().collect();
    if let Some((&first, rest)) = exponents.split_first() {
        let dropped = digits.pop(first);
        if 2 * dropped as u128 >= base as u128 {
            digits.increment(first + 1, &skip);
        }
        for exponent in rest {
            digits.pop(*exponent);
        }
    }
    Ok(digits.value())
}

/// Per-attempt view of the items. The instance itself is never modified.
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    /// Ascending by `clean_weight`, all of it positive.
    pub dp_items: Vec<Item>,
    /// Zero `clean_weight`; taken without consulting the DP.
    pub set_aside: Vec<Item>,
    /// Zero profit; never taken.
    pub dropped: Vec<Item>,
}

/// Rounding may push weights up, so the rounded total is checked against
/// `capacity` the same way the instance's own totals are.
pub fn preprocess(
    items: &[Item],
    capacity: Quantity,
    params: &Params,
    diagnostics: &Diagnostics,
) -> KnapsackResult<Preprocessed> {
    params.validate()?;
    let mut pre = Preprocessed::default();
    for item in items {
        if item.profit.is_zero() {
            pre.dropped.push(item.clone());
            continue;
        }
        let clean_weight = if params.rounds() {
            round_weight(item.weight, params, diagnostics)?
        } else {
            item.weight
        };
        if diagnostics.detailed() && clean_weight != item.weight {
            debug!(
                "Item {}: weight {} rounded to {}",
                item.id, item.weight, clean_weight
            );
        }
        let item = item.with_clean_weight(clean_weight);
        if clean_weight.is_zero() {
            pre.set_aside.push(item);
        } else {
            pre.dp_items.push(item);
        }
    }
    pre.dp_items.sort_by_key(|item| item.clean_weight);
    let clean_weights: Vec<Quantity> = pre.dp_items.iter().map(|item| item.clean_weight).collect();
    if checked_total(capacity, &clean_weights).is_none() {
        return Err(KnapsackError::TooLarge(format!(
            "capacity plus total weight rounded in base {}",
            params.modulo
        )));
    }

    if diagnostics.summary() {
        info!(
            "Preprocessed {} items: {} for the DP, {} without weight, {} without profit",
            items.len(),
            pre.dp_items.len(),
            pre.set_aside.len(),
            pre.dropped.len()
        );
    }
    Ok(pre)
}

fn round_weight(
    weight: Quantity,
    params: &Params,
    diagnostics: &Diagnostics,
) -> KnapsackResult<Quantity> {
    let whole = match weight.to_integer().and_then(|w| u128::try_from(w).ok()) {
        Some(whole) => whole,
        None => {
            if diagnostics.detailed() {
                debug!("Weight {} is not a whole number; left unrounded", weight);
            }
            return Ok(weight);
        }
    };
    let rounded = round_digits(whole, params.modulo, &params.exponents)?
        .and_then(|v| i128::try_from(v).ok())
        .and_then(Quantity::checked_from_integer);
    match rounded {
        Some(rounded) => Ok(rounded),
        None => {
            warn!("Rounding weight {} overflowed; left unrounded", weight);
            Ok(weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_digits_skip_zeros() {
        let digits = SparseDigits::new(1205, 10).unwrap();
        assert_eq!(
            digits.digits().iter().map(|(e, d)| (*e, *d)).collect::<Vec<_>>(),
            vec![(0, 5), (2, 2), (3, 1)]
        );
        assert_eq!(digits.value(), Some(1205));
        assert_eq!(SparseDigits::new(0, 7).unwrap().value(), Some(0));
    }

    #[test]
    fn test_increment_carries() {
        let mut digits = SparseDigits::new(199, 10).unwrap();
        digits.increment(0, &BTreeSet::new());
        assert_eq!(digits.value(), Some(200));

        let mut digits = SparseDigits::new(0b0111, 2).unwrap();
        digits.increment(0, &BTreeSet::new());
        assert_eq!(digits.value(), Some(0b1000));
    }

    #[test]
    fn test_increment_passes_skipped_exponents() {
        let mut digits = SparseDigits::new(95, 10).unwrap();
        digits.increment(1, &[1].into_iter().collect());
        assert_eq!(digits.value(), Some(195));
    }

    #[test]
    fn test_rejects_unary_base() {
        assert!(SparseDigits::new(5, 1).is_err());
        assert!(SparseDigits::new(5, 0).is_err());
    }
}
