use super::*;

/// Contents of the YAML configuration file. Amounts are in satoshis.
#[derive(Deserialize, Default, PartialEq, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) chain: Option<Chain>,
  pub(crate) dust: Option<u64>,
  pub(crate) fee: Option<u64>,
  pub(crate) maximum_fee: Option<u64>,
  pub(crate) minimum_change: Option<u64>,
}

impl Config {
  pub(crate) fn load(path: &Path) -> Result<Self> {
    serde_yaml::from_reader(
      File::open(path).with_context(|| format!("failed to open config `{}`", path.display()))?,
    )
    .with_context(|| format!("failed to parse config `{}`", path.display()))
  }
}
