//! ARC4 stream cipher.
//!
//! Counterparty obfuscates message payloads with ARC4 keyed by the txid of
//! the transaction's first input, with no initialization vector. The cipher
//! is its own inverse, so the same call enciphers and deciphers.

pub struct Arc4 {
  i: u8,
  j: u8,
  state: [u8; 256],
}

impl Arc4 {
  /// Runs the key-scheduling algorithm. Panics if `key` is empty.
  pub fn new(key: &[u8]) -> Self {
    assert!(!key.is_empty(), "ARC4 key must not be empty");

    let mut state = [0u8; 256];

    for (i, entry) in state.iter_mut().enumerate() {
      *entry = i as u8;
    }

    let mut j = 0u8;

    for i in 0..256 {
      j = j
        .wrapping_add(state[i])
        .wrapping_add(key[i % key.len()]);
      state.swap(i, j.into());
    }

    Self { i: 0, j: 0, state }
  }

  fn next_byte(&mut self) -> u8 {
    self.i = self.i.wrapping_add(1);
    self.j = self.j.wrapping_add(self.state[usize::from(self.i)]);
    self.state.swap(self.i.into(), self.j.into());
    let index = self.state[usize::from(self.i)].wrapping_add(self.state[usize::from(self.j)]);
    self.state[usize::from(index)]
  }

  pub fn apply_keystream(&mut self, data: &mut [u8]) {
    for byte in data {
      *byte ^= self.next_byte();
    }
  }
}

/// Enciphers or deciphers `data` with a fresh keystream derived from `key`.
pub fn apply(key: &[u8], data: &[u8]) -> Vec<u8> {
  let mut data = data.to_vec();
  Arc4::new(key).apply_keystream(&mut data);
  data
}
