//! Block-cipher capability traits.
//!
//! Every construction in this crate is generic over a 128-bit block cipher.
//! The encrypt capability and the decrypt capability are separate traits:
//! modes that only ever run the forward permutation (OMAC, EAX, and XTS
//! encryption) accept any [`BlockCipher`], while operations that genuinely
//! need the inverse permutation, such as
//! [`Xts::decrypt_sector`](crate::Xts::decrypt_sector), additionally
//! require [`BlockDecrypt`]. An encrypt-only cipher such as
//! [`SpeckTiny`](crate::SpeckTiny) therefore cannot be asked to decrypt a
//! sector — the call does not compile.
//!
//! Platform crates with a hardware crypto peripheral plug in here: implement
//! [`BlockCipher`] (and [`BlockDecrypt`] if the engine has an inverse path)
//! for the peripheral driver and every mode in this crate uses it unchanged.

use crate::error::Result;

/// Block size, in bytes, shared by every cipher and mode in this crate.
pub const BLOCK_SIZE: usize = 16;

/// A 128-bit block cipher keyed for encryption.
pub trait BlockCipher {
    /// Returns the cipher's nominal key size in bytes.
    ///
    /// Ciphers accepting several key lengths report the largest; `set_key`
    /// is the authority on which lengths are valid.
    fn key_size(&self) -> usize;

    /// Installs `key`, rebuilding the key schedule.
    ///
    /// Returns [`Error::InvalidKeyLength`](crate::Error::InvalidKeyLength)
    /// for unsupported lengths, in which case any previously installed key
    /// remains in effect.
    fn set_key(&mut self, key: &[u8]) -> Result<()>;

    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]);

    /// Zeroizes the key schedule and returns the cipher to its unkeyed
    /// state.
    fn clear(&mut self);
}

/// The inverse-permutation capability of a [`BlockCipher`].
pub trait BlockDecrypt: BlockCipher {
    /// Decrypts one block in place.
    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]);
}
