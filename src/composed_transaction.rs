use super::*;

/// A finished transaction together with the outputs it spends and creates.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedTransaction {
  hex: String,
  inputs: Vec<Utxo>,
  outputs: Vec<Utxo>,
  signed: bool,
  transaction: Transaction,
  txid: Txid,
}

impl ComposedTransaction {
  pub(crate) fn new(transaction: Transaction, inputs: Vec<Utxo>, signed: bool) -> Self {
    let outputs = Utxo::from_transaction(&transaction);

    let total_in = Self::total(&inputs);
    let total_out = Self::total(&outputs);

    assert!(
      total_out <= total_in,
      "invariant: outputs of {total_out} sat exceed inputs of {total_in} sat",
    );

    assert_eq!(
      inputs.len(),
      transaction.input.len(),
      "invariant: every input is spent",
    );

    Self {
      hex: consensus::encode::serialize_hex(&transaction),
      txid: transaction.compute_txid(),
      inputs,
      outputs,
      signed,
      transaction,
    }
  }

  fn total(utxos: &[Utxo]) -> u64 {
    utxos.iter().map(|utxo| utxo.amount.to_sat()).sum()
  }

  pub fn txid(&self) -> Txid {
    self.txid
  }

  pub fn hex(&self) -> &str {
    &self.hex
  }

  pub fn inputs(&self) -> &[Utxo] {
    &self.inputs
  }

  pub fn outputs(&self) -> &[Utxo] {
    &self.outputs
  }

  pub fn signed(&self) -> bool {
    self.signed
  }

  pub fn transaction(&self) -> &Transaction {
    &self.transaction
  }

  /// Inputs minus outputs.
  pub fn fee(&self) -> Amount {
    Amount::from_sat(Self::total(&self.inputs) - Self::total(&self.outputs))
  }

  pub fn fee_btc(&self) -> String {
    self.fee().to_string_in(Denomination::Bitcoin)
  }

  /// Serialized size in bytes.
  pub fn size(&self) -> u64 {
    (self.hex.len() / 2) as u64
  }

  /// Fee rate in satoshis per byte, rounded up.
  pub fn fee_rate(&self) -> u64 {
    self.fee().to_sat().div_ceil(self.size())
  }
}
