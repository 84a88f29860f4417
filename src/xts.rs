//! XTS tweakable sector encryption over any 128-bit block cipher.
//!
//! XTS encrypts fixed-size storage sectors: each 16-byte block is whitened
//! before and after the cipher with a per-block tweak, the tweak evolving by
//! GF(2^128) doubling across the sector. Sector sizes that are not a
//! multiple of 16 are handled with ciphertext stealing, so ciphertext is
//! always exactly as long as plaintext. [`Xts`] uses two cipher instances
//! (payload and tweak); [`XtsSingleKey`] drives both roles from one.
//!
//! Decrypting sectors needs the cipher's inverse permutation, so
//! `decrypt_sector` is only available when the cipher implements
//! [`BlockDecrypt`] — an encrypt-only cipher can still write sectors.

use crate::cipher::{BlockCipher, BlockDecrypt, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::utils::xor_in_place;
use zeroize::Zeroize;

/// Default sector size in bytes.
pub const DEFAULT_SECTOR_SIZE: usize = 512;

/// Doubles a tweak in GF(2^128), XTS convention.
///
/// Byte 0 is least significant: the carry runs toward higher byte indexes
/// and the reduction constant 0x87 folds into byte 0. The reduction mask is
/// computed arithmetically so the operation does not branch on secret data.
#[inline]
fn double_tweak(tweak: &mut [u8; BLOCK_SIZE]) {
    let mask = 0x87 & (tweak[BLOCK_SIZE - 1] >> 7).wrapping_neg();
    for i in (1..BLOCK_SIZE).rev() {
        tweak[i] = (tweak[i] << 1) | (tweak[i - 1] >> 7);
    }
    tweak[0] = (tweak[0] << 1) ^ mask;
}

fn encrypt_sector_impl<C: BlockCipher>(
    cipher: &C,
    start_tweak: &[u8; BLOCK_SIZE],
    output: &mut [u8],
    input: &[u8],
) {
    let mut t = *start_tweak;
    let partial = input.len() % BLOCK_SIZE;
    let whole = input.len() / BLOCK_SIZE - usize::from(partial > 0);

    for i in 0..whole {
        let start = i * BLOCK_SIZE;
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&input[start..start + BLOCK_SIZE]);
        xor_in_place(&mut block, &t);
        cipher.encrypt_block(&mut block);
        xor_in_place(&mut block, &t);
        output[start..start + BLOCK_SIZE].copy_from_slice(&block);
        double_tweak(&mut t);
    }

    if partial > 0 {
        let last = whole * BLOCK_SIZE;

        // The last whole block is encrypted under its own tweak; its
        // leading bytes are what the short tail will carry.
        let mut stolen = [0u8; BLOCK_SIZE];
        stolen.copy_from_slice(&input[last..last + BLOCK_SIZE]);
        xor_in_place(&mut stolen, &t);
        cipher.encrypt_block(&mut stolen);
        xor_in_place(&mut stolen, &t);
        output[last + BLOCK_SIZE..].copy_from_slice(&stolen[..partial]);

        // The tail plaintext merged with the leftover ciphertext goes back
        // to the last whole position, under the doubled tweak. The tail is
        // never encrypted under a tweak of its own.
        double_tweak(&mut t);
        let mut merged = [0u8; BLOCK_SIZE];
        merged[..partial].copy_from_slice(&input[last + BLOCK_SIZE..]);
        merged[partial..].copy_from_slice(&stolen[partial..]);
        xor_in_place(&mut merged, &t);
        cipher.encrypt_block(&mut merged);
        xor_in_place(&mut merged, &t);
        output[last..last + BLOCK_SIZE].copy_from_slice(&merged);
    }
}

fn decrypt_sector_impl<C: BlockDecrypt>(
    cipher: &C,
    start_tweak: &[u8; BLOCK_SIZE],
    output: &mut [u8],
    input: &[u8],
) {
    let mut t = *start_tweak;
    let partial = input.len() % BLOCK_SIZE;
    let whole = input.len() / BLOCK_SIZE - usize::from(partial > 0);

    for i in 0..whole {
        let start = i * BLOCK_SIZE;
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&input[start..start + BLOCK_SIZE]);
        xor_in_place(&mut block, &t);
        cipher.decrypt_block(&mut block);
        xor_in_place(&mut block, &t);
        output[start..start + BLOCK_SIZE].copy_from_slice(&block);
        double_tweak(&mut t);
    }

    if partial > 0 {
        let last = whole * BLOCK_SIZE;

        // Both tweak values are needed across the un-swap: the doubled one
        // for the block stored at the last whole position, the original one
        // for the reconstructed stolen block.
        let t1 = t;
        double_tweak(&mut t);

        let mut merged = [0u8; BLOCK_SIZE];
        merged.copy_from_slice(&input[last..last + BLOCK_SIZE]);
        xor_in_place(&mut merged, &t);
        cipher.decrypt_block(&mut merged);
        xor_in_place(&mut merged, &t);
        output[last + BLOCK_SIZE..].copy_from_slice(&merged[..partial]);

        let mut stolen = [0u8; BLOCK_SIZE];
        stolen[..partial].copy_from_slice(&input[last + BLOCK_SIZE..]);
        stolen[partial..].copy_from_slice(&merged[partial..]);
        xor_in_place(&mut stolen, &t1);
        cipher.decrypt_block(&mut stolen);
        xor_in_place(&mut stolen, &t1);
        output[last..last + BLOCK_SIZE].copy_from_slice(&stolen);
    }
}

/// Two-key XTS: one cipher for payload, one for tweak generation.
///
/// # Example
///
/// ```rust
/// use mote_crypto::{Speck, Xts};
///
/// let mut xts = Xts::new(Speck::new(), Speck::new());
/// xts.set_key(&[0u8; 64])?;
/// xts.set_sector_size(32)?;
///
/// let sector_index = 7u64;
/// xts.set_tweak(&sector_index.to_le_bytes())?;
///
/// let plaintext = [0x5au8; 32];
/// let mut ciphertext = [0u8; 32];
/// xts.encrypt_sector(&mut ciphertext, &plaintext);
///
/// let mut recovered = [0u8; 32];
/// xts.decrypt_sector(&mut recovered, &ciphertext);
/// assert_eq!(recovered, plaintext);
/// # Ok::<(), mote_crypto::Error>(())
/// ```
pub struct Xts<C: BlockCipher> {
    cipher1: C,
    cipher2: C,
    tweak: [u8; BLOCK_SIZE],
    sector_size: usize,
}

impl<C: BlockCipher> Xts<C> {
    /// Wraps the payload and tweak ciphers; call
    /// [`set_key`](Xts::set_key) before use.
    pub fn new(cipher1: C, cipher2: C) -> Self {
        Self {
            cipher1,
            cipher2,
            tweak: [0u8; BLOCK_SIZE],
            sector_size: DEFAULT_SECTOR_SIZE,
        }
    }

    /// Sets the sector size in bytes; must be at least one block (16).
    pub fn set_sector_size(&mut self, size: usize) -> Result<()> {
        if size < BLOCK_SIZE {
            return Err(Error::InvalidSectorSize);
        }
        self.sector_size = size;
        Ok(())
    }

    /// Installs a key of twice the cipher's key size, one half per cipher.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != 2 * self.cipher1.key_size() {
            return Err(Error::InvalidKeyLength);
        }
        let half = key.len() / 2;
        self.cipher1.set_key(&key[..half])?;
        self.cipher2.set_key(&key[half..])?;
        Ok(())
    }

    /// Derives the sector's starting tweak from `tweak` (at most 16 bytes,
    /// typically a little-endian sector index), zero-padded and encrypted
    /// with the tweak cipher. Call once per sector, before the sector
    /// operation; sector operations do not consume the stored value.
    pub fn set_tweak(&mut self, tweak: &[u8]) -> Result<()> {
        if tweak.len() > BLOCK_SIZE {
            return Err(Error::InvalidTweakLength);
        }
        self.tweak = [0u8; BLOCK_SIZE];
        self.tweak[..tweak.len()].copy_from_slice(tweak);
        self.cipher2.encrypt_block(&mut self.tweak);
        Ok(())
    }

    /// Encrypts one sector; both buffers must be exactly the configured
    /// sector size.
    pub fn encrypt_sector(&self, output: &mut [u8], input: &[u8]) {
        assert_eq!(input.len(), self.sector_size);
        assert_eq!(output.len(), input.len());
        encrypt_sector_impl(&self.cipher1, &self.tweak, output, input);
    }

    /// Zeroizes both key schedules and the tweak.
    pub fn clear(&mut self) {
        self.cipher1.clear();
        self.cipher2.clear();
        self.tweak.zeroize();
    }
}

impl<C: BlockDecrypt> Xts<C> {
    /// Decrypts one sector; both buffers must be exactly the configured
    /// sector size.
    pub fn decrypt_sector(&self, output: &mut [u8], input: &[u8]) {
        assert_eq!(input.len(), self.sector_size);
        assert_eq!(output.len(), input.len());
        decrypt_sector_impl(&self.cipher1, &self.tweak, output, input);
    }
}

impl<C: BlockCipher> Drop for Xts<C> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Single-key XTS: one cipher serves both the payload and tweak roles.
///
/// Halves the key material and key-schedule memory relative to [`Xts`], at
/// the cost of the two roles no longer being independently keyed.
pub struct XtsSingleKey<C: BlockCipher> {
    cipher: C,
    tweak: [u8; BLOCK_SIZE],
    sector_size: usize,
}

impl<C: BlockCipher> XtsSingleKey<C> {
    /// Wraps `cipher`; call [`set_key`](XtsSingleKey::set_key) before use.
    pub fn new(cipher: C) -> Self {
        Self {
            cipher,
            tweak: [0u8; BLOCK_SIZE],
            sector_size: DEFAULT_SECTOR_SIZE,
        }
    }

    /// Sets the sector size in bytes; must be at least one block (16).
    pub fn set_sector_size(&mut self, size: usize) -> Result<()> {
        if size < BLOCK_SIZE {
            return Err(Error::InvalidSectorSize);
        }
        self.sector_size = size;
        Ok(())
    }

    /// Installs a key of exactly the cipher's key size.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != self.cipher.key_size() {
            return Err(Error::InvalidKeyLength);
        }
        self.cipher.set_key(key)
    }

    /// Derives the sector's starting tweak; see [`Xts::set_tweak`].
    pub fn set_tweak(&mut self, tweak: &[u8]) -> Result<()> {
        if tweak.len() > BLOCK_SIZE {
            return Err(Error::InvalidTweakLength);
        }
        self.tweak = [0u8; BLOCK_SIZE];
        self.tweak[..tweak.len()].copy_from_slice(tweak);
        self.cipher.encrypt_block(&mut self.tweak);
        Ok(())
    }

    /// Encrypts one sector; both buffers must be exactly the configured
    /// sector size.
    pub fn encrypt_sector(&self, output: &mut [u8], input: &[u8]) {
        assert_eq!(input.len(), self.sector_size);
        assert_eq!(output.len(), input.len());
        encrypt_sector_impl(&self.cipher, &self.tweak, output, input);
    }

    /// Zeroizes the key schedule and the tweak.
    pub fn clear(&mut self) {
        self.cipher.clear();
        self.tweak.zeroize();
    }
}

impl<C: BlockDecrypt> XtsSingleKey<C> {
    /// Decrypts one sector; both buffers must be exactly the configured
    /// sector size.
    pub fn decrypt_sector(&self, output: &mut [u8], input: &[u8]) {
        assert_eq!(input.len(), self.sector_size);
        assert_eq!(output.len(), input.len());
        decrypt_sector_impl(&self.cipher, &self.tweak, output, input);
    }
}

impl<C: BlockCipher> Drop for XtsSingleKey<C> {
    fn drop(&mut self) {
        self.clear();
    }
}
