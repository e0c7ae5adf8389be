use super::*;

/// Numeric identifier of a Counterparty asset.
///
/// Alphabetic names are base-26 numbers with `A` as zero and the most
/// significant letter first, up to 26^12. Numeric assets are spelled `A`
/// followed by the decimal identifier, which must lie above 26^12.
#[derive(
  Debug,
  PartialEq,
  Copy,
  Clone,
  Hash,
  Eq,
  Ord,
  PartialOrd,
  Default,
  DeserializeFromStr,
  SerializeDisplay,
)]
pub struct AssetId(pub u64);

impl AssetId {
  pub const BTC: Self = Self(0);
  pub const XCP: Self = Self(1);

  const NUMERIC_PREFIX: char = 'A';

  pub fn n(self) -> u64 {
    self.0
  }

  pub fn is_reserved(self) -> bool {
    self == Self::BTC || self == Self::XCP
  }

  pub fn is_numeric(self) -> bool {
    BigUint::from(self.0) > Self::numeric_minimum()
  }

  pub fn to_be_bytes(self) -> [u8; 8] {
    self.0.to_be_bytes()
  }

  fn numeric_minimum() -> BigUint {
    BigUint::from(26u32).pow(12)
  }

  fn numeric(digits: &str, name: &str) -> Result<Self> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
      return Err(Error::InvalidAssetId(name.into()));
    }

    let id = digits
      .parse::<BigUint>()
      .map_err(|_| Error::InvalidAssetId(name.into()))?;

    if id <= Self::numeric_minimum() {
      return Err(Error::AssetIdOutOfRange(name.into()));
    }

    u64::try_from(&id)
      .map(Self)
      .map_err(|_| Error::AssetIdOutOfRange(name.into()))
  }

  fn alphabetic(name: &str) -> Result<Self> {
    if name.is_empty() {
      return Err(Error::InvalidAssetName(name.into()));
    }

    let mut n = BigUint::default();

    for c in name.chars() {
      let digit = match c {
        'A'..='Z' => u32::from(c) - u32::from('A'),
        _ => return Err(Error::InvalidAssetName(name.into())),
      };

      n = n * 26u32 + digit;
    }

    if n > Self::numeric_minimum() {
      return Err(Error::AssetIdOutOfRange(name.into()));
    }

    let id = u64::try_from(&n)
      .map(Self)
      .map_err(|_| Error::AssetIdOutOfRange(name.into()))?;

    if id.is_reserved() {
      return Err(Error::InvalidAssetName(name.into()));
    }

    Ok(id)
  }
}

impl Display for AssetId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match *self {
      Self::BTC => return write!(f, "BTC"),
      Self::XCP => return write!(f, "XCP"),
      id if id.is_numeric() => return write!(f, "{}{}", Self::NUMERIC_PREFIX, id.0),
      _ => {}
    }

    let mut n = self.0;
    let mut symbol = Vec::new();

    while n > 0 {
      symbol.push(char::from(b'A' + (n % 26) as u8));
      n /= 26;
    }

    for c in symbol.iter().rev() {
      write!(f, "{c}")?;
    }

    Ok(())
  }
}

impl FromStr for AssetId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "BTC" => Ok(Self::BTC),
      "XCP" => Ok(Self::XCP),
      _ => match s.strip_prefix(Self::NUMERIC_PREFIX) {
        Some(digits) => Self::numeric(digits, s),
        None => Self::alphabetic(s),
      },
    }
  }
}
