use super::*;

/// A Counterparty message, as carried in a transaction's `OP_RETURN` output.
///
/// Layout, all integers big-endian:
///
/// | field              | bytes | notes                      |
/// |--------------------|-------|----------------------------|
/// | prefix             | 8     | `CNTRPRTY`                 |
/// | type               | 4     | 0 = send, 20 = issuance    |
/// | asset              | 8     |                            |
/// | quantity           | 8     |                            |
/// | divisible          | 1     | issuance only              |
/// | call data          | 9     | issuance only, zero-filled |
/// | description length | 1     | issuance only              |
/// | description        | n     | issuance only              |
#[derive(Debug, PartialEq, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Message {
  Send {
    asset: AssetId,
    quantity: u64,
  },
  Issuance {
    asset: AssetId,
    quantity: u64,
    divisible: bool,
    description: String,
  },
}

impl Message {
  pub const PREFIX: &'static [u8; 8] = b"CNTRPRTY";
  pub const SEND: u32 = 0;
  pub const ISSUANCE: u32 = 20;
  pub const MAX_SIZE: usize = 80;

  const CALL_DATA: [u8; 9] = [0; 9];
  const ISSUANCE_HEADER_SIZE: usize = 8 + 4 + 8 + 8 + 1 + 9 + 1;

  /// Longest description that still fits in a standard `OP_RETURN` push.
  pub const MAX_DESCRIPTION_SIZE: usize = Self::MAX_SIZE - Self::ISSUANCE_HEADER_SIZE;

  pub fn message_type(&self) -> u32 {
    match self {
      Self::Send { .. } => Self::SEND,
      Self::Issuance { .. } => Self::ISSUANCE,
    }
  }

  pub fn encode(&self) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(Self::MAX_SIZE);

    payload.extend_from_slice(Self::PREFIX);
    payload.extend_from_slice(&self.message_type().to_be_bytes());

    match self {
      Self::Send { asset, quantity } => {
        payload.extend_from_slice(&asset.to_be_bytes());
        payload.extend_from_slice(&quantity.to_be_bytes());
      }
      Self::Issuance {
        asset,
        quantity,
        divisible,
        description,
      } => {
        let length = description.len();

        if length > Self::MAX_DESCRIPTION_SIZE {
          return Err(Error::DescriptionTooLong {
            length,
            maximum: Self::MAX_DESCRIPTION_SIZE,
          });
        }

        payload.extend_from_slice(&asset.to_be_bytes());
        payload.extend_from_slice(&quantity.to_be_bytes());
        payload.push((*divisible).into());
        payload.extend_from_slice(&Self::CALL_DATA);
        payload.push(length as u8);
        payload.extend_from_slice(description.as_bytes());
      }
    }

    Ok(payload)
  }

  pub fn decode(payload: &[u8]) -> Result<Self> {
    let mut reader = Reader(payload);

    if reader.take::<8>()? != *Self::PREFIX {
      return Err(Error::Prefix);
    }

    let message_type = u32::from_be_bytes(reader.take()?);
    let asset = AssetId(u64::from_be_bytes(reader.take()?));
    let quantity = u64::from_be_bytes(reader.take()?);

    match message_type {
      Self::SEND => Ok(Self::Send { asset, quantity }),
      Self::ISSUANCE => {
        let [divisible] = reader.take()?;
        reader.take::<9>()?;
        let [length] = reader.take()?;
        let description = reader.slice(length.into())?;

        Ok(Self::Issuance {
          asset,
          quantity,
          divisible: divisible != 0,
          description: String::from_utf8_lossy(description).into_owned(),
        })
      }
      other => Err(Error::MessageType(other)),
    }
  }

  /// Encodes the message and obfuscates it with `key`.
  pub fn encipher(&self, key: &[u8]) -> Result<Vec<u8>> {
    Ok(arc4::apply(key, &self.encode()?))
  }

  pub fn decipher(payload: &[u8], key: &[u8]) -> Result<Self> {
    Self::decode(&arc4::apply(key, payload))
  }
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
  fn slice(&mut self, n: usize) -> Result<&'a [u8]> {
    if self.0.len() < n {
      return Err(Error::Truncated);
    }

    let (head, tail) = self.0.split_at(n);
    self.0 = tail;
    Ok(head)
  }

  fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
    let mut array = [0; N];
    array.copy_from_slice(self.slice(N)?);
    Ok(array)
  }
}
