use super::*;

/// Composes transactions carrying Counterparty messages.
///
/// Every input handed to the composer is spent. Outputs appear in a fixed
/// order: payments, then the message, then change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composer {
  pub fee: Amount,
  pub dust: Amount,
  pub change: ChangeCalculator,
}

impl Default for Composer {
  fn default() -> Self {
    Self {
      fee: DEFAULT_FEE,
      dust: DEFAULT_DUST,
      change: ChangeCalculator::default(),
    }
  }
}

impl Composer {
  pub fn new(fee: Amount, dust: Amount, change: ChangeCalculator) -> Self {
    Self { fee, dust, change }
  }

  /// Sends `quantity` of `asset`.
  ///
  /// BTC is paid directly to `recipients`. Any other asset pays `dust` to a
  /// single recipient and carries an obfuscated send message. `fee` and
  /// `dust` override the composer's defaults for this call only.
  pub fn compose_send(
    &self,
    asset: AssetId,
    quantity: Quantity,
    recipients: &Recipients,
    key: Option<&PrivateKey>,
    utxos: &[Utxo],
    change: &ChangePolicy,
    fee: Option<Amount>,
    dust: Option<Amount>,
  ) -> Result<ComposedTransaction, ComposeError> {
    ensure!(!utxos.is_empty(), error::NoInputs);

    let (payments, message) = if asset == AssetId::BTC {
      let amount = Amount::from_sat(quantity.satoshis().snafu_context(error::Protocol)?);
      (recipients.payments(amount)?, None)
    } else {
      let destination = Destination {
        address: recipients.single()?.clone(),
        amount: dust.unwrap_or(self.dust),
      };

      let message = Message::Send {
        asset,
        quantity: quantity.protocol_amount().snafu_context(error::Protocol)?,
      };

      (vec![destination], Some(message))
    };

    log::info!(
      "Composing send of {} {asset} to {} destination(s)",
      quantity.value,
      payments.len(),
    );

    self.compose(payments, message, key, utxos, change, fee.unwrap_or(self.fee))
  }

  /// Issues `quantity` of `asset` with `description`.
  pub fn compose_issuance(
    &self,
    asset: AssetId,
    quantity: Quantity,
    description: &str,
    key: Option<&PrivateKey>,
    utxos: &[Utxo],
    change: &ChangePolicy,
    fee: Option<Amount>,
  ) -> Result<ComposedTransaction, ComposeError> {
    ensure!(!utxos.is_empty(), error::NoInputs);
    ensure!(!asset.is_reserved(), error::ReservedAsset { asset });

    let message = Message::Issuance {
      asset,
      quantity: quantity.protocol_amount().snafu_context(error::Protocol)?,
      divisible: quantity.divisible,
      description: description.into(),
    };

    log::info!("Composing issuance of {} {asset}", quantity.value);

    self.compose(
      Vec::new(),
      Some(message),
      key,
      utxos,
      change,
      fee.unwrap_or(self.fee),
    )
  }

  fn compose(
    &self,
    payments: Vec<Destination>,
    message: Option<Message>,
    key: Option<&PrivateKey>,
    utxos: &[Utxo],
    change: &ChangePolicy,
    fee: Amount,
  ) -> Result<ComposedTransaction, ComposeError> {
    let total_in = Utxo::total(utxos)?;

    let spent = payments
      .iter()
      .try_fold(Amount::ZERO, |total, payment| {
        total.checked_add(payment.amount)
      })
      .ok_or(ComposeError::ValueOverflow)?;

    let change = self.change.calculate(total_in, spent, fee, change)?;

    let mut outputs = payments
      .into_iter()
      .map(|payment| TxOut {
        value: payment.amount,
        script_pubkey: payment.address.script_pubkey(),
      })
      .collect::<Vec<TxOut>>();

    if let Some(message) = message {
      let payload = message
        .encipher(&ledger::obfuscation_key(utxos[0].txid))
        .snafu_context(error::Protocol)?;

      outputs.push(ledger::op_return(&payload)?);
    }

    outputs.extend(change.outputs.iter().map(|(address, amount)| TxOut {
      value: *amount,
      script_pubkey: address.script_pubkey(),
    }));

    let mut transaction = ledger::build(utxos, outputs);

    if let Some(key) = key {
      ledger::sign(&mut transaction, utxos, key)?;
    }

    let composed = ComposedTransaction::new(transaction, utxos.to_vec(), key.is_some());

    assert_eq!(
      composed.fee(),
      change.fee,
      "invariant: inputs equal outputs plus fee",
    );

    log::info!(
      "Composed transaction {} spending {total_in} with fee {}",
      composed.txid(),
      composed.fee(),
    );

    Ok(composed)
  }
}
