use super::*;

/// Resolved configuration. Each value comes from the first of: command line
/// option, `XCP_COMPOSER_*` environment variable, config file, default.
#[derive(Default, Debug, Clone)]
pub struct Settings {
  pub(crate) chain: Chain,
  pub(crate) config: Config,
  pub(crate) options: Options,
}

impl Settings {
  pub(crate) fn new(options: Options) -> Result<Self> {
    let config = match &options.config {
      Some(path) => Config::load(path)?,
      None => Config::default(),
    };

    let chain = Self::setting(
      options
        .signet
        .then_some(Chain::Signet)
        .or(options.regtest.then_some(Chain::Regtest))
        .or(options.testnet.then_some(Chain::Testnet))
        .or(options.chain_argument),
      Some("CHAIN"),
      config.chain,
      Chain::Mainnet,
    )?;

    Ok(Self {
      chain,
      config,
      options,
    })
  }

  pub(crate) fn chain(&self) -> Chain {
    self.chain
  }

  pub(crate) fn composer(&self) -> Result<Composer> {
    Ok(Composer::new(
      self.amount(self.options.fee, "FEE", self.config.fee, DEFAULT_FEE)?,
      self.amount(self.options.dust, "DUST", self.config.dust, DEFAULT_DUST)?,
      ChangeCalculator {
        minimum_change: self.amount(
          self.options.minimum_change,
          "MINIMUM_CHANGE",
          self.config.minimum_change,
          DEFAULT_MINIMUM_CHANGE,
        )?,
        maximum_fee: self.amount(
          self.options.maximum_fee,
          "MAXIMUM_FEE",
          self.config.maximum_fee,
          DEFAULT_MAXIMUM_FEE,
        )?,
      },
    ))
  }

  fn amount(
    &self,
    arg_value: Option<u64>,
    env_key: &str,
    config_value: Option<u64>,
    default_value: Amount,
  ) -> Result<Amount> {
    Self::setting(arg_value, Some(env_key), config_value, default_value.to_sat())
      .map(Amount::from_sat)
  }

  fn setting<T>(
    arg_value: Option<T>,
    env_key: Option<&str>,
    config_value: Option<T>,
    default_value: T,
  ) -> Result<T>
  where
    T: FromStr,
    T::Err: Display,
  {
    if let Some(arg_value) = arg_value {
      return Ok(arg_value);
    }

    if let Some(env_key) = env_key {
      let key = format!("XCP_COMPOSER_{env_key}");
      match env::var(&key) {
        Ok(env_value) => {
          return env_value
            .parse()
            .map_err(|err| anyhow!("failed to parse {key} `{env_value}`: {err}"))
        }
        Err(err @ env::VarError::NotUnicode(_)) => return Err(err.into()),
        Err(env::VarError::NotPresent) => {}
      }
    }

    if let Some(config_value) = config_value {
      return Ok(config_value);
    }

    Ok(default_value)
  }
}
