use super::*;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum ComposeError {
  #[snafu(display("change of {amount} to {address} exceeds the {available} left to allocate"))]
  InsufficientChange {
    address: Address,
    amount: Amount,
    available: Amount,
  },
  #[snafu(display("insufficient funds: {available} available, {required} required"))]
  InsufficientFunds { available: Amount, required: Amount },
  #[snafu(display("destinations total {actual} but quantity is {expected}"))]
  InvalidDestinationTotal { expected: Amount, actual: Amount },
  #[snafu(display("signing key does not control the script of input {input}"))]
  KeyMismatch { input: usize },
  #[snafu(display("only one change entry may omit its amount"))]
  MultipleChangeRemainders,
  #[snafu(display("only BTC may be sent to more than one destination"))]
  MultipleDestinationsUnsupported,
  #[snafu(display("{remaining} left over but no change address was given"))]
  NoChangeAddress { remaining: Amount },
  #[snafu(display("no inputs to spend"))]
  NoInputs,
  #[snafu(display("payload of {length} bytes does not fit in a standard OP_RETURN output"))]
  OpReturn { length: usize },
  #[snafu(display("{source}"))]
  Protocol { source: counterparty::Error },
  #[snafu(display("{asset} is reserved and cannot be issued"))]
  ReservedAsset { asset: AssetId },
  #[snafu(display("failed to sign input {input}: {message}"))]
  Signing { input: usize, message: String },
  #[snafu(display("fee of {fee} reaches maximum of {maximum}"))]
  UnexpectedHighFee { fee: Amount, maximum: Amount },
  #[snafu(display("input {input} has unsupported script `{}`", hex::encode(script.as_bytes())))]
  UnsupportedScript { input: usize, script: ScriptBuf },
  #[snafu(display("value overflow"))]
  ValueOverflow,
}

/// `anyhow::Context` is in scope crate-wide for the command line interface,
/// which shadows `snafu::ResultExt::context`. This trait gives access to the
/// `snafu` version under another name.
pub(crate) trait ResultExt<T, E>: Sized {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
  fn snafu_context<C, E2>(self, context: C) -> Result<T, E2>
  where
    C: snafu::IntoError<E2, Source = E>,
    E2: std::error::Error + snafu::ErrorCompat,
  {
    use snafu::ResultExt;
    self.context(context)
  }
}
