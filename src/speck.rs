//! The Speck128 lightweight block cipher family.
//!
//! Speck is an ARX cipher with a 128-bit block and 128/192/256-bit keys
//! (32/33/34 rounds). Three variants trade memory for capability:
//!
//! - [`Speck`] precomputes the full round-key schedule in `set_key` and
//!   supports both directions. Fastest, largest state (~280 bytes).
//! - [`SpeckSmall`] keeps only the raw key words plus the schedule's tail
//!   state. It regenerates round keys forward while encrypting and backward
//!   from the tail while decrypting, at a per-block cost.
//! - [`SpeckTiny`] keeps only the raw key words and expands the schedule on
//!   the fly on every call. It has no decryption path at all: it does not
//!   implement [`BlockDecrypt`], which is enough for EAX in both directions
//!   and for OMAC.
//!
//! All three produce identical ciphertext for identical key and plaintext.
//! A block is packed as two big-endian `u64` halves: `x` from bytes 0..8,
//! `y` from bytes 8..16.

use crate::cipher::{BlockCipher, BlockDecrypt, BLOCK_SIZE};
use crate::error::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Rotation amounts for the 128-bit block variants.
const ALPHA: u32 = 8;
const BETA: u32 = 3;

/// Round count for the largest (256-bit) key; the schedule array is sized
/// for it.
const MAX_ROUNDS: usize = 34;

/// Key words for the largest key.
const MAX_KEY_WORDS: usize = 4;

#[inline(always)]
fn round(x: &mut u64, y: &mut u64, k: u64) {
    *x = x.rotate_right(ALPHA).wrapping_add(*y) ^ k;
    *y = y.rotate_left(BETA) ^ *x;
}

#[inline(always)]
fn inv_round(x: &mut u64, y: &mut u64, k: u64) {
    *y = (*y ^ *x).rotate_right(BETA);
    *x = (*x ^ k).wrapping_sub(*y).rotate_left(ALPHA);
}

#[inline]
fn be64(bytes: &[u8]) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(bytes);
    u64::from_be_bytes(word)
}

#[inline]
fn load_block(block: &[u8; BLOCK_SIZE]) -> (u64, u64) {
    (be64(&block[..8]), be64(&block[8..]))
}

#[inline]
fn store_block(block: &mut [u8; BLOCK_SIZE], x: u64, y: u64) {
    block[..8].copy_from_slice(&x.to_be_bytes());
    block[8..].copy_from_slice(&y.to_be_bytes());
}

/// Splits a raw key into schedule seed words.
///
/// Key bytes are big-endian with the most significant word first. The least
/// significant word seeds the running subkey `s` (slot 0); the remaining
/// words fill slots 1.. in the order the schedule recurrence consumes them.
fn load_key(key: &[u8]) -> Result<([u64; MAX_KEY_WORDS], usize, usize)> {
    let (words, rounds) = match key.len() {
        16 => (2, 32),
        24 => (3, 33),
        32 => (4, 34),
        _ => return Err(Error::InvalidKeyLength),
    };

    let mut k = [0u64; MAX_KEY_WORDS];
    for (i, chunk) in key.chunks_exact(8).enumerate() {
        let w = be64(chunk);
        if i == words - 1 {
            k[0] = w;
        } else {
            k[words - 1 - i] = w;
        }
    }
    Ok((k, words, rounds))
}

/// Encrypts one block while expanding the key schedule on the fly.
///
/// `k` is in [`load_key`] order. Shared by [`SpeckTiny`] and [`SpeckSmall`].
fn encrypt_on_the_fly(k: &[u64; MAX_KEY_WORDS], words: usize, rounds: usize, block: &mut [u8; BLOCK_SIZE]) {
    let (mut x, mut y) = load_block(block);
    let mut s = k[0];
    let mut l = [k[1], k[2], k[3]];
    let mut li = 0;
    for i in 0..rounds as u64 {
        round(&mut x, &mut y, s);
        let lt = s.wrapping_add(l[li].rotate_right(ALPHA)) ^ i;
        s = s.rotate_left(BETA) ^ lt;
        l[li] = lt;
        li += 1;
        if li == words - 1 {
            li = 0;
        }
    }
    store_block(block, x, y);
    l.zeroize();
    s.zeroize();
}

/// Speck128 with a precomputed key schedule.
///
/// # Example
///
/// ```rust
/// use mote_crypto::{BlockCipher, BlockDecrypt, Speck};
///
/// let mut cipher = Speck::new();
/// cipher.set_key(&[0u8; 16])?;
///
/// let mut block = *b"0123456789abcdef";
/// cipher.encrypt_block(&mut block);
/// cipher.decrypt_block(&mut block);
/// assert_eq!(&block, b"0123456789abcdef");
/// # Ok::<(), mote_crypto::Error>(())
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Speck {
    rk: [u64; MAX_ROUNDS],
    rounds: usize,
}

impl Speck {
    /// Creates an unkeyed instance; call `set_key` before use.
    pub fn new() -> Self {
        Self {
            rk: [0u64; MAX_ROUNDS],
            rounds: 0,
        }
    }
}

impl Default for Speck {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCipher for Speck {
    fn key_size(&self) -> usize {
        32
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        let (k, words, rounds) = load_key(key)?;
        let mut s = k[0];
        let mut l = [k[1], k[2], k[3]];
        let mut li = 0;
        for i in 0..rounds as u64 {
            self.rk[i as usize] = s;
            let lt = s.wrapping_add(l[li].rotate_right(ALPHA)) ^ i;
            s = s.rotate_left(BETA) ^ lt;
            l[li] = lt;
            li += 1;
            if li == words - 1 {
                li = 0;
            }
        }
        // Stale subkeys from a previous, longer key must not linger.
        for slot in &mut self.rk[rounds..] {
            *slot = 0;
        }
        self.rounds = rounds;
        l.zeroize();
        s.zeroize();
        Ok(())
    }

    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        debug_assert!(self.rounds > 0, "cipher used before set_key");
        let (mut x, mut y) = load_block(block);
        for &k in &self.rk[..self.rounds] {
            round(&mut x, &mut y, k);
        }
        store_block(block, x, y);
    }

    fn clear(&mut self) {
        self.rk.zeroize();
        self.rounds = 0;
    }
}

impl BlockDecrypt for Speck {
    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        debug_assert!(self.rounds > 0, "cipher used before set_key");
        let (mut x, mut y) = load_block(block);
        for &k in self.rk[..self.rounds].iter().rev() {
            inv_round(&mut x, &mut y, k);
        }
        store_block(block, x, y);
    }
}

/// Speck128 storing the raw key plus the schedule tail.
///
/// Encryption regenerates round keys forward from the raw key; decryption
/// regenerates them backward from the stored tail state. Both directions
/// work, each block costing one schedule pass.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SpeckSmall {
    k: [u64; MAX_KEY_WORDS],
    tail_l: [u64; MAX_KEY_WORDS - 1],
    tail_s: u64,
    words: usize,
    rounds: usize,
}

impl SpeckSmall {
    /// Creates an unkeyed instance; call `set_key` before use.
    pub fn new() -> Self {
        Self {
            k: [0u64; MAX_KEY_WORDS],
            tail_l: [0u64; MAX_KEY_WORDS - 1],
            tail_s: 0,
            words: 0,
            rounds: 0,
        }
    }
}

impl Default for SpeckSmall {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCipher for SpeckSmall {
    fn key_size(&self) -> usize {
        32
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        let (k, words, rounds) = load_key(key)?;

        // Run the schedule once to capture the tail state the backward
        // (decryption) pass starts from.
        let mut s = k[0];
        let mut l = [k[1], k[2], k[3]];
        let mut li = 0;
        for i in 0..rounds as u64 {
            let lt = s.wrapping_add(l[li].rotate_right(ALPHA)) ^ i;
            s = s.rotate_left(BETA) ^ lt;
            l[li] = lt;
            li += 1;
            if li == words - 1 {
                li = 0;
            }
        }

        self.k = k;
        self.tail_l.copy_from_slice(&l);
        self.tail_s = s;
        self.words = words;
        self.rounds = rounds;
        l.zeroize();
        s.zeroize();
        Ok(())
    }

    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        debug_assert!(self.rounds > 0, "cipher used before set_key");
        encrypt_on_the_fly(&self.k, self.words, self.rounds, block);
    }

    fn clear(&mut self) {
        self.k.zeroize();
        self.tail_l.zeroize();
        self.tail_s = 0;
        self.words = 0;
        self.rounds = 0;
    }
}

impl BlockDecrypt for SpeckSmall {
    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        debug_assert!(self.rounds > 0, "cipher used before set_key");
        let ring = self.words - 1;
        let mut l = self.tail_l;
        let mut s = self.tail_s;
        let mut li = self.rounds % ring;

        let (mut x, mut y) = load_block(block);
        for i in (0..self.rounds as u64).rev() {
            li = if li == 0 { ring - 1 } else { li - 1 };
            let lt = l[li];
            s = (s ^ lt).rotate_right(BETA);
            l[li] = (lt ^ i).wrapping_sub(s).rotate_left(ALPHA);
            inv_round(&mut x, &mut y, s);
        }
        store_block(block, x, y);
        l.zeroize();
        s.zeroize();
    }
}

/// Speck128 storing only the raw key words.
///
/// The schedule is expanded from scratch inside every `encrypt_block`.
/// There is no decryption path — the type does not implement
/// [`BlockDecrypt`], so asking it to decrypt a sector is a compile error
/// rather than silently wrong output. EAX works in both directions with
/// this variant, since EAX decryption only runs the forward permutation.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SpeckTiny {
    k: [u64; MAX_KEY_WORDS],
    words: usize,
    rounds: usize,
}

impl SpeckTiny {
    /// Creates an unkeyed instance; call `set_key` before use.
    pub fn new() -> Self {
        Self {
            k: [0u64; MAX_KEY_WORDS],
            words: 0,
            rounds: 0,
        }
    }
}

impl Default for SpeckTiny {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCipher for SpeckTiny {
    fn key_size(&self) -> usize {
        32
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        let (k, words, rounds) = load_key(key)?;
        self.k = k;
        self.words = words;
        self.rounds = rounds;
        Ok(())
    }

    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        debug_assert!(self.rounds > 0, "cipher used before set_key");
        encrypt_on_the_fly(&self.k, self.words, self.rounds, block);
    }

    fn clear(&mut self) {
        self.k.zeroize();
        self.words = 0;
        self.rounds = 0;
    }
}
