use super::*;

#[derive(Debug, Parser)]
#[command(version, about = "Compose Counterparty send and issuance transactions")]
pub(crate) struct Arguments {
  #[command(flatten)]
  pub(crate) options: Options,
  #[command(subcommand)]
  pub(crate) subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> SubcommandResult {
    let settings = Settings::new(self.options)?;
    self.subcommand.run(settings)
  }
}
