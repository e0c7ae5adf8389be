use {super::*, clap::ArgGroup};

#[derive(Clone, Default, Debug, Parser)]
#[command(group(
  ArgGroup::new("chains")
    .required(false)
    .args(&["chain_argument", "signet", "regtest", "testnet"]),
))]
pub struct Options {
  #[arg(long = "chain", value_enum, help = "Use <CHAIN>. [default: mainnet]")]
  pub(crate) chain_argument: Option<Chain>,
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(
    long,
    help = "Pay <DUST> satoshis to the destination of an asset send. [default: 5430]"
  )]
  pub(crate) dust: Option<u64>,
  #[arg(long, help = "Pay a miner fee of <FEE> satoshis. [default: 10000]")]
  pub(crate) fee: Option<u64>,
  #[arg(long, short, help = "Specify output format. [default: json]")]
  pub(crate) format: Option<OutputFormat>,
  #[arg(
    long,
    help = "Refuse to compose when unallocated change raises the fee to <MAXIMUM_FEE> satoshis. [default: 100000]"
  )]
  pub(crate) maximum_fee: Option<u64>,
  #[arg(
    long,
    help = "Add change below <MINIMUM_CHANGE> satoshis to the fee. [default: 5000]"
  )]
  pub(crate) minimum_change: Option<u64>,
  #[arg(long, short, help = "Use regtest. Equivalent to `--chain regtest`.")]
  pub(crate) regtest: bool,
  #[arg(long, short, help = "Use signet. Equivalent to `--chain signet`.")]
  pub(crate) signet: bool,
  #[arg(long, short, help = "Use testnet. Equivalent to `--chain testnet`.")]
  pub(crate) testnet: bool,
}
