use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEntry {
  pub address: Address,
  /// `None` marks the remainder entry, which receives whatever the explicit
  /// entries leave over.
  pub amount: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChangePolicy {
  #[default]
  None,
  Single(Address),
  List(Vec<ChangeEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
  pub outputs: Vec<(Address, Amount)>,
  pub fee: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeCalculator {
  pub minimum_change: Amount,
  pub maximum_fee: Amount,
}

impl Default for ChangeCalculator {
  fn default() -> Self {
    Self {
      minimum_change: DEFAULT_MINIMUM_CHANGE,
      maximum_fee: DEFAULT_MAXIMUM_FEE,
    }
  }
}

impl ChangeCalculator {
  pub fn calculate(
    &self,
    total_in: Amount,
    spent: Amount,
    fee: Amount,
    policy: &ChangePolicy,
  ) -> Result<Change, ComposeError> {
    let required = spent
      .checked_add(fee)
      .ok_or(ComposeError::ValueOverflow)?;

    let remaining = total_in
      .checked_sub(required)
      .ok_or(ComposeError::InsufficientFunds {
        available: total_in,
        required,
      })?;

    log::debug!("{remaining} left for change after spending {spent} with fee {fee}");

    match policy {
      ChangePolicy::None => {
        ensure!(remaining == Amount::ZERO, error::NoChangeAddress { remaining });

        Ok(Change {
          outputs: Vec::new(),
          fee,
        })
      }
      ChangePolicy::Single(address) => {
        if remaining == Amount::ZERO || remaining < self.minimum_change {
          log::debug!("folding {remaining} of change below {} into fee", self.minimum_change);

          return Ok(Change {
            outputs: Vec::new(),
            fee: fee.checked_add(remaining).ok_or(ComposeError::ValueOverflow)?,
          });
        }

        Ok(Change {
          outputs: vec![(address.clone(), remaining)],
          fee,
        })
      }
      ChangePolicy::List(entries) => {
        ensure!(
          entries.iter().filter(|entry| entry.amount.is_none()).count() <= 1,
          error::MultipleChangeRemainders
        );

        let (outputs, leftover) = entries
          .iter()
          .enumerate()
          .try_fold(Allocation::new(remaining), |allocation, (index, entry)| {
            allocation.allocate(index, entry)
          })?
          .finish();

        let fee = fee.checked_add(leftover).ok_or(ComposeError::ValueOverflow)?;

        if leftover > Amount::ZERO {
          log::debug!("{leftover} of change is unallocated and goes to fee");

          ensure!(
            fee < self.maximum_fee,
            error::UnexpectedHighFee {
              fee,
              maximum: self.maximum_fee,
            }
          );
        }

        Ok(Change { outputs, fee })
      }
    }
  }
}

/// Running state of an ordered change list.
struct Allocation {
  unallocated: Amount,
  outputs: Vec<(usize, Address, Amount)>,
  remainder: Option<(usize, Address)>,
}

impl Allocation {
  fn new(unallocated: Amount) -> Self {
    Self {
      unallocated,
      outputs: Vec::new(),
      remainder: None,
    }
  }

  fn allocate(mut self, index: usize, entry: &ChangeEntry) -> Result<Self, ComposeError> {
    let Some(amount) = entry.amount else {
      self.remainder = Some((index, entry.address.clone()));
      return Ok(self);
    };

    if amount == Amount::ZERO {
      return Ok(self);
    }

    let available = self.unallocated;

    ensure!(
      amount <= available,
      error::InsufficientChange {
        address: entry.address.clone(),
        amount,
        available,
      }
    );

    self.unallocated = available - amount;
    self.outputs.push((index, entry.address.clone(), amount));

    Ok(self)
  }

  /// Pays the remainder entry and returns outputs in list order along with
  /// whatever could not be allocated.
  fn finish(mut self) -> (Vec<(Address, Amount)>, Amount) {
    if let Some((index, address)) = self.remainder.take() {
      if self.unallocated > Amount::ZERO {
        self.outputs.push((index, address, self.unallocated));
        self.unallocated = Amount::ZERO;
      }
    }

    self.outputs.sort_by_key(|(index, _, _)| *index);

    (
      self
        .outputs
        .into_iter()
        .map(|(_, address, amount)| (address, amount))
        .collect(),
      self.unallocated,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sat(n: u64) -> Amount {
    Amount::from_sat(n)
  }

  fn entry(n: u64, amount: Option<u64>) -> ChangeEntry {
    ChangeEntry {
      address: change(n),
      amount: amount.map(Amount::from_sat),
    }
  }

  fn calculate(total_in: u64, spent: u64, policy: ChangePolicy) -> Result<Change, ComposeError> {
    ChangeCalculator::default().calculate(sat(total_in), sat(spent), DEFAULT_FEE, &policy)
  }

  #[test]
  fn insufficient_funds() {
    assert_eq!(
      calculate(15_000, 5_430, ChangePolicy::Single(change(0))),
      Err(ComposeError::InsufficientFunds {
        available: sat(15_000),
        required: sat(15_430),
      }),
    );
  }

  #[test]
  fn exact_funds_need_no_change() {
    assert_eq!(
      calculate(15_430, 5_430, ChangePolicy::None),
      Ok(Change {
        outputs: Vec::new(),
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn remaining_value_requires_change_address() {
    assert_eq!(
      calculate(15_431, 5_430, ChangePolicy::None),
      Err(ComposeError::NoChangeAddress { remaining: sat(1) }),
    );
  }

  #[test]
  fn single_change_output() {
    assert_eq!(
      calculate(12_350_000, 5_432, ChangePolicy::Single(change(0))),
      Ok(Change {
        outputs: vec![(change(0), sat(12_334_568))],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn dust_change_is_added_to_fee() {
    assert_eq!(
      calculate(15_430 + 4_999, 5_430, ChangePolicy::Single(change(0))),
      Ok(Change {
        outputs: Vec::new(),
        fee: sat(14_999),
      }),
    );

    assert_eq!(
      calculate(15_430 + 5_000, 5_430, ChangePolicy::Single(change(0))),
      Ok(Change {
        outputs: vec![(change(0), sat(5_000))],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn exact_funds_create_no_empty_change_output() {
    let calculator = ChangeCalculator {
      minimum_change: Amount::ZERO,
      ..ChangeCalculator::default()
    };

    assert_eq!(
      calculator.calculate(
        sat(15_430),
        sat(5_430),
        DEFAULT_FEE,
        &ChangePolicy::Single(change(0)),
      ),
      Ok(Change {
        outputs: Vec::new(),
        fee: DEFAULT_FEE,
      }),
    );

    assert_eq!(
      calculator.calculate(
        sat(15_431),
        sat(5_430),
        DEFAULT_FEE,
        &ChangePolicy::Single(change(0)),
      ),
      Ok(Change {
        outputs: vec![(change(0), sat(1))],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn value_is_conserved() {
    let policies = [
      ChangePolicy::None,
      ChangePolicy::Single(change(0)),
      ChangePolicy::List(vec![entry(0, Some(5_430))]),
      ChangePolicy::List(vec![entry(0, Some(7_000)), entry(1, None)]),
      ChangePolicy::List(vec![entry(0, None), entry(1, Some(0)), entry(2, Some(20_000))]),
    ];

    for minimum_change in [0, 5_000, 50_000] {
      let calculator = ChangeCalculator {
        minimum_change: sat(minimum_change),
        ..ChangeCalculator::default()
      };

      for total_in in [0, 5_430, 15_430, 20_429, 50_000, 123_456, 12_350_000] {
        for spent in [0, 5_430, 40_000, 2_300_000] {
          for fee in [0, 1_000, 10_000] {
            for policy in &policies {
              let Ok(computed) = calculator.calculate(sat(total_in), sat(spent), sat(fee), policy)
              else {
                continue;
              };

              let total_change = computed
                .outputs
                .iter()
                .map(|(_, amount)| amount.to_sat())
                .sum::<u64>();

              assert_eq!(
                total_in,
                spent + total_change + computed.fee.to_sat(),
                "{total_in} in, {spent} spent, {fee} fee, {policy:?}",
              );

              assert!(computed.fee >= sat(fee));

              assert!(
                computed.outputs.iter().all(|(_, amount)| *amount > Amount::ZERO),
                "empty change output for {total_in} in, {spent} spent, {fee} fee, {policy:?}",
              );
            }
          }
        }
      }
    }
  }

  #[test]
  fn remainder_entry_receives_leftover() {
    assert_eq!(
      calculate(
        12_350_000,
        2_300_000,
        ChangePolicy::List(vec![
          entry(0, Some(15_430)),
          entry(1, Some(15_430)),
          entry(2, None),
        ]),
      ),
      Ok(Change {
        outputs: vec![
          (change(0), sat(15_430)),
          (change(1), sat(15_430)),
          (change(2), sat(10_009_140)),
        ],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn remainder_entry_keeps_list_position() {
    assert_eq!(
      calculate(
        100_000,
        50_000,
        ChangePolicy::List(vec![
          entry(0, None),
          entry(1, Some(15_000)),
          entry(2, Some(20_000)),
        ]),
      ),
      Ok(Change {
        outputs: vec![
          (change(0), sat(5_000)),
          (change(1), sat(15_000)),
          (change(2), sat(20_000)),
        ],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn zero_entries_are_skipped() {
    assert_eq!(
      calculate(
        100_000,
        50_000,
        ChangePolicy::List(vec![entry(0, Some(0)), entry(1, Some(40_000)), entry(2, None)]),
      ),
      Ok(Change {
        outputs: vec![(change(1), sat(40_000))],
        fee: DEFAULT_FEE,
      }),
    );
  }

  #[test]
  fn unallocated_change_raises_fee() {
    assert_eq!(
      calculate(
        100_000,
        50_000,
        ChangePolicy::List(vec![entry(0, Some(30_000))]),
      ),
      Ok(Change {
        outputs: vec![(change(0), sat(30_000))],
        fee: sat(20_000),
      }),
    );
  }

  #[test]
  fn unexpected_high_fee() {
    assert_eq!(
      calculate(
        12_350_000,
        1_110_000,
        ChangePolicy::List(vec![entry(0, Some(15_430)), entry(1, Some(15_430))]),
      ),
      Err(ComposeError::UnexpectedHighFee {
        fee: sat(11_209_140),
        maximum: DEFAULT_MAXIMUM_FEE,
      }),
    );
  }

  #[test]
  fn change_entries_cannot_exceed_remaining_value() {
    assert_eq!(
      calculate(
        100_000,
        50_000,
        ChangePolicy::List(vec![entry(0, Some(30_000)), entry(1, Some(15_000))]),
      ),
      Err(ComposeError::InsufficientChange {
        address: change(1),
        amount: sat(15_000),
        available: sat(10_000),
      }),
    );
  }

  #[test]
  fn only_one_remainder_entry() {
    assert_eq!(
      calculate(
        100_000,
        50_000,
        ChangePolicy::List(vec![entry(0, None), entry(1, None)]),
      ),
      Err(ComposeError::MultipleChangeRemainders),
    );
  }

  #[test]
  fn overflow() {
    assert_eq!(
      ChangeCalculator::default().calculate(
        Amount::MAX,
        Amount::MAX,
        DEFAULT_FEE,
        &ChangePolicy::None,
      ),
      Err(ComposeError::ValueOverflow),
    );
  }
}
