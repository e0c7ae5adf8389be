use super::*;

/// A transaction output, either spendable by a composition or created by one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Utxo {
  pub txid: Txid,
  pub vout: u32,
  #[serde(with = "bitcoin::amount::serde::as_sat")]
  pub amount: Amount,
  pub script_pubkey: ScriptBuf,
}

impl Utxo {
  pub fn outpoint(&self) -> OutPoint {
    OutPoint {
      txid: self.txid,
      vout: self.vout,
    }
  }

  pub(crate) fn total(utxos: &[Self]) -> Result<Amount, ComposeError> {
    utxos
      .iter()
      .try_fold(Amount::ZERO, |total, utxo| total.checked_add(utxo.amount))
      .ok_or(ComposeError::ValueOverflow)
  }

  pub(crate) fn from_transaction(transaction: &Transaction) -> Vec<Self> {
    let txid = transaction.compute_txid();

    (0..)
      .zip(&transaction.output)
      .map(|(vout, output)| Self {
        txid,
        vout,
        amount: output.value,
        script_pubkey: output.script_pubkey.clone(),
      })
      .collect()
  }
}
