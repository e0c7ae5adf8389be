use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Decode {
  #[arg(
    long,
    help = "Decipher with the txid of the first input, <TXID>. When given, <HEX> is the raw payload instead of a transaction."
  )]
  txid: Option<Txid>,
  #[arg(help = "Decode <HEX>, a serialized transaction or, with --txid, a payload.")]
  hex: String,
}

impl Decode {
  pub(crate) fn run(self) -> SubcommandResult {
    let bytes = hex::decode(self.hex.trim()).context("invalid hex")?;

    let message = match self.txid {
      Some(txid) => Message::decipher(&bytes, &ledger::obfuscation_key(txid))?,
      None => Self::decipher_transaction(&bytes)?,
    };

    Ok(Some(Box::new(message)))
  }

  fn decipher_transaction(bytes: &[u8]) -> Result<Message> {
    let transaction = consensus::encode::deserialize::<Transaction>(bytes)
      .context("failed to deserialize transaction")?;

    let first = transaction
      .input
      .first()
      .ok_or_else(|| anyhow!("transaction has no inputs"))?;

    let payload = transaction
      .output
      .iter()
      .find_map(|output| ledger::op_return_payload(&output.script_pubkey))
      .ok_or_else(|| anyhow!("transaction has no OP_RETURN output"))?;

    Ok(Message::decipher(
      payload,
      &ledger::obfuscation_key(first.previous_output.txid),
    )?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn composed() -> ComposedTransaction {
    Composer::default()
      .compose_send(
        AssetId(0x4fadf),
        "45".parse().unwrap(),
        &recipient().into(),
        None,
        &[utxo(1, 100_000)],
        &ChangePolicy::Single(change(0)),
        None,
        None,
      )
      .unwrap()
  }

  #[test]
  fn decipher_transaction() {
    assert_eq!(
      Decode::decipher_transaction(&hex::decode(composed().hex()).unwrap()).unwrap(),
      Message::Send {
        asset: AssetId(0x4fadf),
        quantity: 4_500_000_000,
      },
    );
  }

  #[test]
  fn transaction_without_payload() {
    let transaction = ledger::build(
      &[utxo(1, 100_000)],
      vec![TxOut {
        value: Amount::from_sat(90_000),
        script_pubkey: recipient().script_pubkey(),
      }],
    );

    assert_eq!(
      Decode::decipher_transaction(&consensus::encode::serialize(&transaction))
        .unwrap_err()
        .to_string(),
      "transaction has no OP_RETURN output",
    );
  }

  #[test]
  fn decipher_payload_with_txid() {
    let composed = composed();

    let payload =
      ledger::op_return_payload(&composed.transaction().output[1].script_pubkey).unwrap();

    assert_eq!(
      Message::decipher(payload, &ledger::obfuscation_key(txid(1))).unwrap(),
      Decode::decipher_transaction(&hex::decode(composed.hex()).unwrap()).unwrap(),
    );
  }
}
