//! Transaction construction and signing on top of `bitcoin`.

use super::*;

pub(crate) fn build(inputs: &[Utxo], outputs: Vec<TxOut>) -> Transaction {
  Transaction {
    version: Version::ONE,
    lock_time: LockTime::ZERO,
    input: inputs
      .iter()
      .map(|utxo| TxIn {
        previous_output: utxo.outpoint(),
        script_sig: ScriptBuf::new(),
        sequence: Sequence::MAX,
        witness: Witness::new(),
      })
      .collect(),
    output: outputs,
  }
}

pub(crate) fn op_return(payload: &[u8]) -> Result<TxOut, ComposeError> {
  let length = payload.len();

  let push =
    PushBytesBuf::try_from(payload.to_vec()).map_err(|_| ComposeError::OpReturn { length })?;

  let script_pubkey = ScriptBuf::new_op_return(push);

  ensure!(
    script_pubkey.len() <= MAX_STANDARD_OP_RETURN_SIZE,
    error::OpReturn { length }
  );

  Ok(TxOut {
    value: Amount::ZERO,
    script_pubkey,
  })
}

/// Returns the data pushed by an `OP_RETURN` script.
pub(crate) fn op_return_payload(script: &Script) -> Option<&[u8]> {
  if !script.is_op_return() {
    return None;
  }

  match script.instructions().nth(1)? {
    Ok(Instruction::PushBytes(push)) => Some(push.as_bytes()),
    _ => None,
  }
}

/// The key used to obfuscate a payload: the txid of the first input, in the
/// byte order it is displayed in.
pub(crate) fn obfuscation_key(txid: Txid) -> [u8; 32] {
  let mut key = txid.to_byte_array();
  key.reverse();
  key
}

/// Signs every input of `transaction` against the script of the output it
/// spends. Nothing is modified unless all inputs can be signed.
pub(crate) fn sign(
  transaction: &mut Transaction,
  inputs: &[Utxo],
  key: &PrivateKey,
) -> Result<(), ComposeError> {
  let secp = Secp256k1::new();
  let public_key = key.public_key(&secp);
  let mut cache = SighashCache::new(&*transaction);

  let signature = |digest: [u8; 32]| bitcoin::ecdsa::Signature {
    signature: secp.sign_ecdsa(&secp256k1::Message::from_digest(digest), &key.inner),
    sighash_type: EcdsaSighashType::All,
  };

  let mut unlocks = Vec::with_capacity(inputs.len());

  for (input, utxo) in inputs.iter().enumerate() {
    let script = &utxo.script_pubkey;

    let unlock = if script.is_p2pkh() {
      ensure!(
        *script == ScriptBuf::new_p2pkh(&public_key.pubkey_hash()),
        error::KeyMismatch { input }
      );

      let sighash = cache
        .legacy_signature_hash(input, script, EcdsaSighashType::All.to_u32())
        .map_err(|err| ComposeError::Signing {
          input,
          message: err.to_string(),
        })?;

      let push = PushBytesBuf::try_from(signature(sighash.to_byte_array()).to_vec()).map_err(
        |err| ComposeError::Signing {
          input,
          message: err.to_string(),
        },
      )?;

      let script_sig = Builder::new()
        .push_slice(push)
        .push_key(&public_key)
        .into_script();

      (script_sig, Witness::new())
    } else if script.is_p2wpkh() {
      let wpubkey_hash = public_key
        .wpubkey_hash()
        .map_err(|_| ComposeError::KeyMismatch { input })?;

      ensure!(
        *script == ScriptBuf::new_p2wpkh(&wpubkey_hash),
        error::KeyMismatch { input }
      );

      let sighash = cache
        .p2wpkh_signature_hash(input, script, utxo.amount, EcdsaSighashType::All)
        .map_err(|err| ComposeError::Signing {
          input,
          message: err.to_string(),
        })?;

      let mut witness = Witness::new();
      witness.push(signature(sighash.to_byte_array()).to_vec());
      witness.push(public_key.to_bytes());

      (ScriptBuf::new(), witness)
    } else {
      return Err(ComposeError::UnsupportedScript {
        input,
        script: script.clone(),
      });
    };

    unlocks.push(unlock);
  }

  for (txin, (script_sig, witness)) in transaction.input.iter_mut().zip(unlocks) {
    txin.script_sig = script_sig;
    txin.witness = witness;
  }

  Ok(())
}
