use {super::*, clap::ValueEnum};

pub mod asset;
pub mod compose;
pub mod decode;
mod funding;
pub mod issue;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Convert between asset names and ids")]
  Asset(asset::Asset),
  #[command(about = "Compose a send of BTC or a Counterparty asset")]
  Compose(compose::Compose),
  #[command(about = "Decipher the Counterparty message in a transaction")]
  Decode(decode::Decode),
  #[command(about = "Compose an issuance of a Counterparty asset")]
  Issue(issue::Issue),
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Asset(asset) => asset.run(),
      Self::Compose(compose) => compose.run(settings),
      Self::Decode(decode) => decode.run(),
      Self::Issue(issue) => issue.run(settings),
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Json,
  Yaml,
  Minify,
}

pub trait Output: Send {
  fn print(&self, format: OutputFormat);
}

impl<T> Output for T
where
  T: Serialize + Send,
{
  fn print(&self, format: OutputFormat) {
    match format {
      OutputFormat::Json => serde_json::to_writer_pretty(io::stdout(), self).ok(),
      OutputFormat::Yaml => serde_yaml::to_writer(io::stdout(), self).ok(),
      OutputFormat::Minify => serde_json::to_writer(io::stdout(), self).ok(),
    };
    println!();
  }
}

pub(crate) type SubcommandResult = Result<Option<Box<dyn Output>>>;
