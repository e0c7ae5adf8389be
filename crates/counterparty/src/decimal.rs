use super::*;

/// An exact decimal number as typed by a user, `value / 10^scale`.
#[derive(Debug, PartialEq, Copy, Clone, Default, DeserializeFromStr, SerializeDisplay)]
pub struct Decimal {
  pub value: u128,
  pub scale: u8,
}

impl Decimal {
  pub fn to_integer(self, divisibility: u8) -> Result<u64> {
    let difference = divisibility
      .checked_sub(self.scale)
      .ok_or_else(|| Error::ExcessivePrecision(self.to_string()))?;

    10u128
      .checked_pow(u32::from(difference))
      .and_then(|magnitude| self.value.checked_mul(magnitude))
      .and_then(|value| u64::try_from(value).ok())
      .ok_or_else(|| Error::InvalidQuantity(self.to_string()))
  }
}

impl From<u64> for Decimal {
  fn from(value: u64) -> Self {
    Self {
      value: value.into(),
      scale: 0,
    }
  }
}

impl Display for Decimal {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let magnitude = 10u128.pow(self.scale.into());

    let integer = self.value / magnitude;
    let mut fraction = self.value % magnitude;

    write!(f, "{integer}")?;

    if fraction > 0 {
      let mut width = self.scale.into();

      while fraction % 10 == 0 {
        fraction /= 10;
        width -= 1;
      }

      write!(f, ".{fraction:0>width$}")?;
    }

    Ok(())
  }
}

impl FromStr for Decimal {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidQuantity(s.into());

    let digits = |digits: &str| -> Result<u128> {
      if digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse::<u128>().map_err(|_| invalid())
      } else {
        Err(invalid())
      }
    };

    let Some((integer, decimal)) = s.split_once('.') else {
      return Ok(Self {
        value: digits(s)?,
        scale: 0,
      });
    };

    if integer.is_empty() && decimal.is_empty() {
      return Err(invalid());
    }

    let integer = if integer.is_empty() {
      0
    } else {
      digits(integer)?
    };

    let decimal = decimal.trim_end_matches('0');

    let (fraction, scale) = if decimal.is_empty() {
      (0, 0)
    } else {
      (
        digits(decimal)?,
        u8::try_from(decimal.len()).map_err(|_| invalid())?,
      )
    };

    Ok(Self {
      value: 10u128
        .checked_pow(scale.into())
        .and_then(|magnitude| integer.checked_mul(magnitude))
        .and_then(|integer| integer.checked_add(fraction))
        .ok_or_else(invalid)?,
      scale,
    })
  }
}
