use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
  pub address: Address,
  pub amount: Amount,
}

/// Where the asset of a send goes.
///
/// Only BTC can be split across several destinations; a Counterparty send
/// pays dust to exactly one address.
#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
  Single(Address),
  Multiple(Vec<Destination>),
}

impl Recipients {
  pub(crate) fn payments(&self, amount: Amount) -> Result<Vec<Destination>, ComposeError> {
    match self {
      Self::Single(address) => Ok(vec![Destination {
        address: address.clone(),
        amount,
      }]),
      Self::Multiple(destinations) => {
        let actual = destinations
          .iter()
          .try_fold(Amount::ZERO, |total, destination| {
            total.checked_add(destination.amount)
          })
          .ok_or(ComposeError::ValueOverflow)?;

        ensure!(
          actual == amount,
          error::InvalidDestinationTotal {
            expected: amount,
            actual,
          }
        );

        Ok(destinations.clone())
      }
    }
  }

  pub(crate) fn single(&self) -> Result<&Address, ComposeError> {
    match self {
      Self::Single(address) => Ok(address),
      Self::Multiple(_) => Err(ComposeError::MultipleDestinationsUnsupported),
    }
  }
}

impl From<Address> for Recipients {
  fn from(address: Address) -> Self {
    Self::Single(address)
  }
}
