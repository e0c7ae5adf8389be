use super::*;

/// `ADDRESS[:AMOUNT]`, with the amount in BTC.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Payment {
  pub(crate) address: Address<NetworkUnchecked>,
  pub(crate) amount: Option<Decimal>,
}

impl Payment {
  fn amount(&self) -> Result<Option<Amount>> {
    self
      .amount
      .map(|amount| {
        amount
          .to_integer(counterparty::DIVISIBILITY)
          .map(Amount::from_sat)
          .with_context(|| format!("invalid amount for {}", self.address.assume_checked_ref()))
      })
      .transpose()
  }

  pub(crate) fn destination(&self, chain: Chain) -> Result<Destination> {
    Ok(Destination {
      address: chain.check_address(self.address.clone())?,
      amount: self.amount()?.ok_or_else(|| {
        anyhow!(
          "no amount given for {}",
          self.address.assume_checked_ref()
        )
      })?,
    })
  }

  fn change_entry(&self, chain: Chain) -> Result<ChangeEntry> {
    Ok(ChangeEntry {
      address: chain.check_address(self.address.clone())?,
      amount: self.amount()?,
    })
  }
}

impl FromStr for Payment {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (address, amount) = match s.split_once(':') {
      Some((address, amount)) => (address, Some(amount.parse()?)),
      None => (s, None),
    };

    Ok(Self {
      address: address.parse()?,
      amount,
    })
  }
}

/// Inputs, change and signing key shared by every composing subcommand.
#[derive(Debug, Parser)]
pub(crate) struct Funding {
  #[arg(
    long,
    help = "Spend every UTXO in JSON file <UTXOS>, a list of `{\"txid\", \"vout\", \"amount\", \"script_pubkey\"}` objects with amounts in satoshis."
  )]
  pub(crate) utxos: PathBuf,
  #[arg(long, conflicts_with = "change_entry", help = "Send change to <CHANGE>.")]
  pub(crate) change: Option<Address<NetworkUnchecked>>,
  #[arg(
    long,
    value_name = "ADDRESS[:AMOUNT]",
    help = "Send <AMOUNT> BTC of change to <ADDRESS>. May be repeated. At most one entry may omit <AMOUNT> to receive whatever is left over."
  )]
  pub(crate) change_entry: Vec<Payment>,
  #[arg(long, help = "Sign inputs with the WIF private key in <WIF_FILE>.")]
  pub(crate) wif_file: Option<PathBuf>,
}

impl Funding {
  pub(crate) fn utxos(&self) -> Result<Vec<Utxo>> {
    let file = File::open(&self.utxos)
      .with_context(|| format!("failed to open UTXO file `{}`", self.utxos.display()))?;

    serde_json::from_reader(file)
      .with_context(|| format!("failed to parse UTXO file `{}`", self.utxos.display()))
  }

  pub(crate) fn change_policy(&self, chain: Chain) -> Result<ChangePolicy> {
    if let Some(address) = &self.change {
      return Ok(ChangePolicy::Single(chain.check_address(address.clone())?));
    }

    if self.change_entry.is_empty() {
      return Ok(ChangePolicy::None);
    }

    Ok(ChangePolicy::List(
      self
        .change_entry
        .iter()
        .map(|entry| entry.change_entry(chain))
        .collect::<Result<Vec<ChangeEntry>>>()?,
    ))
  }

  pub(crate) fn key(&self, chain: Chain) -> Result<Option<PrivateKey>> {
    let Some(path) = &self.wif_file else {
      return Ok(None);
    };

    let wif = fs::read_to_string(path)
      .with_context(|| format!("failed to read WIF file `{}`", path.display()))?;

    let key = PrivateKey::from_wif(wif.trim()).context("failed to parse WIF private key")?;

    chain.check_key(&key)?;

    Ok(Some(key))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn payment(s: &str) -> Payment {
    s.parse().unwrap()
  }

  #[test]
  fn parse_payment() {
    assert_eq!(
      payment("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz:0.001"),
      Payment {
        address: recipient().as_unchecked().clone(),
        amount: Some("0.001".parse().unwrap()),
      },
    );

    assert_eq!(
      payment("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz"),
      Payment {
        address: recipient().as_unchecked().clone(),
        amount: None,
      },
    );

    assert!("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz:foo"
      .parse::<Payment>()
      .is_err());

    assert!("foo:1".parse::<Payment>().is_err());
  }

  #[test]
  fn payment_destination() {
    assert_eq!(
      payment("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz:0.001")
        .destination(Chain::Testnet)
        .unwrap(),
      Destination {
        address: recipient(),
        amount: Amount::from_sat(100_000),
      },
    );

    assert_eq!(
      payment("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz")
        .destination(Chain::Testnet)
        .unwrap_err()
        .to_string(),
      "no amount given for tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz",
    );

    assert_eq!(
      payment("tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz:0.000000001")
        .destination(Chain::Testnet)
        .unwrap_err()
        .to_string(),
      "invalid amount for tb1q6en7qjxgw4ev8xwx94pzdry6a6ky7wlfeqzunz",
    );
  }

  #[test]
  fn change_policy() {
    #[track_caller]
    fn case(args: &[&str], policy: ChangePolicy) {
      let funding = Funding::try_parse_from(
        ["funding", "--utxos", "utxos.json"]
          .iter()
          .chain(args),
      )
      .unwrap();

      assert_eq!(funding.change_policy(Chain::Testnet).unwrap(), policy);
    }

    case(&[], ChangePolicy::None);

    case(
      &["--change", "tb1qjsv26lap3ffssj6hfy8mzn0lg5vte6a42j75ww"],
      ChangePolicy::Single(change(0)),
    );

    case(
      &[
        "--change-entry",
        "tb1qjsv26lap3ffssj6hfy8mzn0lg5vte6a42j75ww:0.0001543",
        "--change-entry",
        "tb1qakxxzv9n7706kc3xdcycrtfv8cqv62hnwexc0l",
      ],
      ChangePolicy::List(vec![
        ChangeEntry {
          address: change(0),
          amount: Some(Amount::from_sat(15_430)),
        },
        ChangeEntry {
          address: change(1),
          amount: None,
        },
      ]),
    );
  }

  #[test]
  fn change_and_change_entry_conflict() {
    assert_matches!(
      Funding::try_parse_from([
        "funding",
        "--utxos",
        "utxos.json",
        "--change",
        "tb1qjsv26lap3ffssj6hfy8mzn0lg5vte6a42j75ww",
        "--change-entry",
        "tb1qakxxzv9n7706kc3xdcycrtfv8cqv62hnwexc0l",
      ])
      .unwrap_err()
      .kind(),
      clap::error::ErrorKind::ArgumentConflict
    );
  }

  #[test]
  fn key_from_wif_file() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let path = tempdir.path().join("key.wif");

    fs::write(&path, format!("{WIF}\n")).unwrap();

    let funding = Funding::try_parse_from([
      "funding",
      "--utxos",
      "utxos.json",
      "--wif-file",
      path.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(funding.key(Chain::Regtest).unwrap(), Some(private_key()));

    assert_eq!(
      funding.key(Chain::Mainnet).unwrap_err().to_string(),
      "private key is not valid on mainnet",
    );
  }
}
