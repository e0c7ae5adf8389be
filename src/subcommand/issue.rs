use {super::*, compose::Output, funding::Funding};

#[derive(Debug, Parser)]
pub(crate) struct Issue {
  #[arg(long, help = "Issue <ASSET>, a Counterparty asset name or id.")]
  asset: AssetId,
  #[arg(long, help = "Issue <QUANTITY> of asset, in whole units.")]
  quantity: Decimal,
  #[arg(long, help = "Make asset indivisible.")]
  indivisible: bool,
  #[arg(
    long,
    default_value = "",
    help = "Describe asset with <DESCRIPTION>, at most 41 bytes."
  )]
  description: String,
  #[command(flatten)]
  funding: Funding,
}

impl Issue {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let chain = settings.chain();

    let quantity = Quantity {
      value: self.quantity,
      divisible: !self.indivisible,
    };

    let key = self.funding.key(chain)?;

    let composed = settings.composer()?.compose_issuance(
      self.asset,
      quantity,
      &self.description,
      key.as_ref(),
      &self.funding.utxos()?,
      &self.funding.change_policy(chain)?,
      None,
    )?;

    Ok(Some(Box::new(Output::from(composed))))
  }
}
