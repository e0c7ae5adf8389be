use super::*;

/// A user supplied quantity of an asset.
///
/// Ledger arithmetic always works in satoshis, so `satoshis` scales by 10^8
/// regardless of divisibility. The protocol amount embedded in a message
/// only scales for divisible assets; indivisible assets are counted in whole
/// units.
#[derive(Debug, PartialEq, Copy, Clone, serde::Serialize, serde::Deserialize)]
pub struct Quantity {
  pub value: Decimal,
  pub divisible: bool,
}

impl Quantity {
  pub fn divisible(value: Decimal) -> Self {
    Self {
      value,
      divisible: true,
    }
  }

  pub fn indivisible(value: Decimal) -> Self {
    Self {
      value,
      divisible: false,
    }
  }

  pub fn satoshis(self) -> Result<u64> {
    self.value.to_integer(DIVISIBILITY)
  }

  pub fn protocol_amount(self) -> Result<u64> {
    if self.divisible {
      self.value.to_integer(DIVISIBILITY)
    } else {
      self.value.to_integer(0)
    }
  }
}

impl FromStr for Quantity {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::divisible(s.parse()?))
  }
}
