//! OMAC (one-key CBC-MAC) over any 128-bit block cipher.
//!
//! This is the CMAC construction: a single cipher key, a derived subkey `B`
//! obtained by doubling the encryption of the zero block in GF(2^128), and
//! CBC chaining with lazy block absorption. It is used standalone to
//! authenticate stored data and as the internal primitive of
//! [`Eax`](crate::Eax), where domain-separated instances hash the nonce,
//! the associated data and the ciphertext.

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::Result;
use crate::utils::xor_in_place;
use zeroize::Zeroize;

/// Doubles a 16-byte value in GF(2^128), MSB-first convention.
///
/// Reduction polynomial x^128 + x^7 + x^2 + x + 1; the constant 0x87 is
/// folded into the last byte. The reduction mask is computed arithmetically
/// so the operation does not branch on secret data.
#[inline]
fn dbl(block: &mut [u8; BLOCK_SIZE]) {
    let mask = 0x87 & (block[0] >> 7).wrapping_neg();
    for i in 0..BLOCK_SIZE - 1 {
        block[i] = (block[i] << 1) | (block[i + 1] >> 7);
    }
    block[BLOCK_SIZE - 1] = (block[BLOCK_SIZE - 1] << 1) ^ mask;
}

/// A one-key MAC session over a block cipher it owns.
///
/// The running state is one 16-byte accumulator and a fill position. Input
/// is XORed into the accumulator; a block encryption happens only when the
/// accumulator is full *and* more input arrives, so the final (possibly
/// partial) block is still pending when [`finalize`](Omac::finalize) runs
/// and can receive the correct subkey.
///
/// `finalize` is destructive: one tag per [`init_next`](Omac::init_next)
/// (or per [`set_key`](Omac::set_key) for the plain, untagged domain).
///
/// # Example
///
/// ```rust
/// use mote_crypto::{Omac, Speck};
///
/// let mut mac = Omac::new(Speck::new());
/// mac.set_key(&[0u8; 16])?;
/// mac.update(b"reading: 21.5C");
/// let tag = mac.finalize();
/// assert_eq!(tag.len(), 16);
/// # Ok::<(), mote_crypto::Error>(())
/// ```
pub struct Omac<C: BlockCipher> {
    cipher: C,
    b: [u8; BLOCK_SIZE],
    block: [u8; BLOCK_SIZE],
    posn: usize,
}

impl<C: BlockCipher> Omac<C> {
    /// Wraps `cipher`; call [`set_key`](Omac::set_key) before use.
    pub fn new(cipher: C) -> Self {
        Self {
            cipher,
            b: [0u8; BLOCK_SIZE],
            block: [0u8; BLOCK_SIZE],
            posn: 0,
        }
    }

    /// Keys the underlying cipher and derives the subkey.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.cipher.set_key(key)?;
        self.init_first();
        Ok(())
    }

    /// Derives subkey `B = dbl(E(0^16))` and resets the accumulator.
    ///
    /// Called automatically by `set_key`; only needed directly when the
    /// wrapped cipher was keyed externally.
    pub fn init_first(&mut self) {
        self.b = [0u8; BLOCK_SIZE];
        self.cipher.encrypt_block(&mut self.b);
        dbl(&mut self.b);
        self.block = [0u8; BLOCK_SIZE];
        self.posn = 0;
    }

    /// Starts a new domain-separated computation over the same key.
    ///
    /// The accumulator becomes the block `[0, .., 0, domain]` with the fill
    /// position saturated, so the first `update` call encrypts the domain
    /// block before absorbing data.
    pub fn init_next(&mut self, domain: u8) {
        self.block = [0u8; BLOCK_SIZE];
        self.block[BLOCK_SIZE - 1] = domain;
        self.posn = BLOCK_SIZE;
    }

    /// Absorbs `data` into the running MAC.
    pub fn update(&mut self, data: &[u8]) {
        let mut offset = 0;
        while offset < data.len() {
            if self.posn == BLOCK_SIZE {
                self.cipher.encrypt_block(&mut self.block);
                self.posn = 0;
            }
            let n = (BLOCK_SIZE - self.posn).min(data.len() - offset);
            for i in 0..n {
                self.block[self.posn + i] ^= data[offset + i];
            }
            self.posn += n;
            offset += n;
        }
    }

    /// Completes the computation and returns the 16-byte tag.
    ///
    /// A full pending block is XORed with `B`; a partial or empty one is
    /// padded with `0x80` and XORed with `dbl(B)`.
    pub fn finalize(&mut self) -> [u8; BLOCK_SIZE] {
        if self.posn == BLOCK_SIZE {
            xor_in_place(&mut self.block, &self.b);
        } else {
            self.block[self.posn] ^= 0x80;
            let mut b2 = self.b;
            dbl(&mut b2);
            xor_in_place(&mut self.block, &b2);
            b2.zeroize();
        }
        self.cipher.encrypt_block(&mut self.block);
        self.posn = BLOCK_SIZE;
        self.block
    }

    /// Zeroizes the subkey, the accumulator and the owned cipher.
    pub fn clear(&mut self) {
        self.cipher.clear();
        self.b.zeroize();
        self.block.zeroize();
        self.posn = 0;
    }

    /// The wrapped cipher, for modes layering more than a MAC on one key.
    pub(crate) fn cipher(&self) -> &C {
        &self.cipher
    }
}

impl<C: BlockCipher> Drop for Omac<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speck::Speck;

    fn tag_of(key: &[u8], message: &[u8]) -> [u8; 16] {
        let mut mac = Omac::new(Speck::new());
        mac.set_key(key).unwrap();
        mac.update(message);
        mac.finalize()
    }

    #[test]
    fn test_dbl_known_values() {
        let mut block = [0u8; 16];
        block[15] = 1;
        dbl(&mut block);
        assert_eq!(block[15], 2);

        // Top bit set: shift then reduce.
        let mut block = [0u8; 16];
        block[0] = 0x80;
        dbl(&mut block);
        let mut expected = [0u8; 16];
        expected[15] = 0x87;
        assert_eq!(block, expected);
    }

    #[test]
    fn test_deterministic() {
        let key = [0x42u8; 16];
        let msg = b"temperature frame 0017";
        assert_eq!(tag_of(&key, msg), tag_of(&key, msg));
    }

    #[test]
    fn test_trailing_byte_diffusion() {
        let key = [0x42u8; 16];
        let mut msg = *b"temperature frame 0017";
        let a = tag_of(&key, &msg);
        *msg.last_mut().unwrap() ^= 1;
        let b = tag_of(&key, &msg);
        assert_ne!(a, b);
    }

    #[test]
    fn test_length_separation() {
        // Full-block, partial-block and empty messages take different
        // subkey paths; none of them may collide trivially.
        let key = [0x07u8; 32];
        let empty = tag_of(&key, b"");
        let fifteen = tag_of(&key, &[0u8; 15]);
        let sixteen = tag_of(&key, &[0u8; 16]);
        let seventeen = tag_of(&key, &[0u8; 17]);
        assert_ne!(empty, fifteen);
        assert_ne!(fifteen, sixteen);
        assert_ne!(sixteen, seventeen);
    }

    #[test]
    fn test_update_split_invariance() {
        // Absorbing in arbitrary chunks must equal one-shot absorption.
        let key = [0x99u8; 24];
        let msg: Vec<u8> = (0..64u8).collect();
        let expected = tag_of(&key, &msg);

        for split in [1usize, 7, 15, 16, 17, 33] {
            let mut mac = Omac::new(Speck::new());
            mac.set_key(&key).unwrap();
            for chunk in msg.chunks(split) {
                mac.update(chunk);
            }
            assert_eq!(mac.finalize(), expected, "split {split}");
        }
    }

    #[test]
    fn test_domain_separation() {
        let mut mac = Omac::new(Speck::new());
        mac.set_key(&[0x11u8; 16]).unwrap();

        mac.init_next(0);
        mac.update(b"same bytes");
        let d0 = mac.finalize();

        mac.init_next(1);
        mac.update(b"same bytes");
        let d1 = mac.finalize();

        assert_ne!(d0, d1);
    }
}
