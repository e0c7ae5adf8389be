//! Types for encoding Counterparty messages carried in `OP_RETURN` outputs.

use {
  num_bigint::BigUint,
  serde_with::{DeserializeFromStr, SerializeDisplay},
  std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
  },
  thiserror::Error,
};

pub use {
  arc4::Arc4, asset_id::AssetId, decimal::Decimal, message::Message, quantity::Quantity,
};

pub mod arc4;
mod asset_id;
mod decimal;
pub mod message;
mod quantity;

/// Satoshis per whole unit of a divisible asset.
pub const COIN_VALUE: u64 = 100_000_000;

/// Number of decimal places carried by divisible assets.
pub const DIVISIBILITY: u8 = 8;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("asset id `{0}` out of range")]
  AssetIdOutOfRange(String),
  #[error("issuance description is {length} bytes, maximum is {maximum}")]
  DescriptionTooLong { length: usize, maximum: usize },
  #[error("excessive precision in quantity `{0}`")]
  ExcessivePrecision(String),
  #[error("invalid asset id `{0}`")]
  InvalidAssetId(String),
  #[error("invalid asset name `{0}`")]
  InvalidAssetName(String),
  #[error("invalid quantity `{0}`")]
  InvalidQuantity(String),
  #[error("unknown message type {0}")]
  MessageType(u32),
  #[error("payload does not begin with the Counterparty prefix")]
  Prefix,
  #[error("payload truncated")]
  Truncated,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
