#![allow(clippy::too_many_arguments)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    config::Config,
    error::ResultExt,
    options::Options,
    settings::Settings,
    subcommand::{OutputFormat, Subcommand, SubcommandResult},
  },
  anyhow::{anyhow, bail, Context, Error},
  bitcoin::{
    absolute::LockTime,
    address::NetworkUnchecked,
    amount::Denomination,
    consensus,
    hashes::Hash,
    script::{Builder, Instruction, PushBytesBuf},
    secp256k1::{self, Secp256k1},
    sighash::{EcdsaSighashType, SighashCache},
    transaction::Version,
    Address, Amount, Network, OutPoint, PrivateKey, Script, ScriptBuf, Sequence, Transaction,
    TxIn, TxOut, Txid, Witness,
  },
  clap::Parser,
  counterparty::{AssetId, Decimal, Message, Quantity},
  serde::{Deserialize, Serialize},
  snafu::{ensure, Snafu},
  std::{
    env,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    process,
    str::FromStr,
  },
};

pub use self::{
  chain::Chain,
  change::{Change, ChangeCalculator, ChangeEntry, ChangePolicy},
  composed_transaction::ComposedTransaction,
  composer::Composer,
  error::ComposeError,
  recipient::{Destination, Recipients},
  utxo::Utxo,
};


#[cfg(test)]
use self::test::*;

pub mod arguments;
pub mod chain;
mod change;
mod composed_transaction;
mod composer;
mod config;
mod error;
mod ledger;
pub mod options;
mod recipient;
pub mod settings;
pub mod subcommand;
mod utxo;

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Default miner fee for a composed transaction.
pub const DEFAULT_FEE: Amount = Amount::from_sat(10_000);

/// Default value paid to the destination of a Counterparty send.
pub const DEFAULT_DUST: Amount = Amount::from_sat(5_430);

/// Change below this value is added to the fee instead of creating an output.
pub const DEFAULT_MINIMUM_CHANGE: Amount = Amount::from_sat(5_000);

/// Unallocated change may not raise the fee to this value or beyond.
pub const DEFAULT_MAXIMUM_FEE: Amount = Amount::from_sat(100_000);

const MAX_STANDARD_OP_RETURN_SIZE: usize = 83;

pub fn main() {
  env_logger::init();

  let args = Arguments::parse();

  let format = args.options.format;

  match args.run() {
    Err(err) => {
      eprintln!("error: {err}");

      for (i, err) in err.chain().skip(1).enumerate() {
        if i == 0 {
          eprintln!();
          eprintln!("because:");
        }

        eprintln!("- {err}");
      }

      if env::var_os("RUST_BACKTRACE")
        .map(|val| val == "1")
        .unwrap_or_default()
      {
        eprintln!("{}", err.backtrace());
      }

      process::exit(1);
    }
    Ok(output) => {
      if let Some(output) = output {
        output.print(format.unwrap_or_default());
      }
    }
  }
}
