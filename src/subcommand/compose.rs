use {super::*, funding::{Funding, Payment}};

#[derive(Debug, Parser)]
#[command(group(
  clap::ArgGroup::new("recipients")
    .required(true)
    .args(&["destination", "pay"]),
))]
pub(crate) struct Compose {
  #[arg(long, help = "Send <ASSET>, either BTC or a Counterparty asset name or id.")]
  asset: AssetId,
  #[arg(long, help = "Send <QUANTITY> of asset, in whole units.")]
  quantity: Decimal,
  #[arg(long, help = "Treat asset as indivisible.")]
  indivisible: bool,
  #[arg(long, help = "Send to <DESTINATION>.")]
  destination: Option<Address<NetworkUnchecked>>,
  #[arg(
    long,
    value_name = "ADDRESS:AMOUNT",
    help = "Pay <AMOUNT> BTC to <ADDRESS>. May be repeated. Amounts must add up to quantity."
  )]
  pay: Vec<Payment>,
  #[command(flatten)]
  funding: Funding,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub txid: Txid,
  pub hex: String,
  pub signed: bool,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub fee: Amount,
  pub size: u64,
  pub fee_rate: u64,
  pub inputs: Vec<Utxo>,
  pub outputs: Vec<Utxo>,
}

impl From<ComposedTransaction> for Output {
  fn from(composed: ComposedTransaction) -> Self {
    Self {
      txid: composed.txid(),
      hex: composed.hex().into(),
      signed: composed.signed(),
      fee: composed.fee(),
      size: composed.size(),
      fee_rate: composed.fee_rate(),
      inputs: composed.inputs().to_vec(),
      outputs: composed.outputs().to_vec(),
    }
  }
}

impl Compose {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let chain = settings.chain();

    let recipients = match self.destination {
      Some(destination) => Recipients::Single(chain.check_address(destination)?),
      None => Recipients::Multiple(
        self
          .pay
          .iter()
          .map(|payment| payment.destination(chain))
          .collect::<Result<Vec<Destination>>>()?,
      ),
    };

    let quantity = Quantity {
      value: self.quantity,
      divisible: !self.indivisible,
    };

    let key = self.funding.key(chain)?;

    let composed = settings.composer()?.compose_send(
      self.asset,
      quantity,
      &recipients,
      key.as_ref(),
      &self.funding.utxos()?,
      &self.funding.change_policy(chain)?,
      None,
      None,
    )?;

    Ok(Some(Box::new(Output::from(composed))))
  }
}
