//! EAX authenticated encryption over any 128-bit block cipher.
//!
//! EAX combines CTR-mode encryption with three domain-separated OMAC
//! computations: domain 0 hashes the nonce into the initial counter, domain
//! 1 hashes the associated data, domain 2 hashes the ciphertext. The final
//! tag is the XOR of the three. One [`Omac`] instance is reused serially for
//! all three domains, so a session costs a single cipher key schedule plus a
//! few blocks of state.
//!
//! A session is an explicit state machine; calls out of order are rejected
//! instead of silently ignored:
//!
//! ```text
//! Unkeyed -(set_key)-> Keyed -(set_iv)-> AcceptingAad
//!     -(first encrypt/decrypt)-> Crypting -(compute_tag/check_tag)-> Tagged
//! ```
//!
//! `set_iv` restarts a session from any keyed state. Decryption only uses
//! the cipher's forward permutation, so EAX works in both directions over
//! encrypt-only ciphers such as [`SpeckTiny`](crate::SpeckTiny).

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::omac::Omac;
use crate::utils::{ct_eq, inc_be, xor_in_place};
use zeroize::Zeroize;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unkeyed,
    Keyed,
    AcceptingAad,
    Crypting,
    Tagged,
}

/// An EAX session.
///
/// # Example
///
/// ```rust
/// use mote_crypto::{Eax, Speck};
///
/// let mut eax = Eax::new(Speck::new());
/// eax.set_key(&[0u8; 16])?;
///
/// eax.set_iv(b"frame-0001")?;
/// eax.add_auth_data(b"node 17")?;
/// let mut ciphertext = [0u8; 9];
/// eax.encrypt(&mut ciphertext, b"reading 4")?;
/// let mut tag = [0u8; 16];
/// eax.compute_tag(&mut tag)?;
///
/// eax.set_iv(b"frame-0001")?;
/// eax.add_auth_data(b"node 17")?;
/// let mut plaintext = [0u8; 9];
/// eax.decrypt(&mut plaintext, &ciphertext)?;
/// assert!(eax.check_tag(&tag));
/// assert_eq!(&plaintext, b"reading 4");
/// # Ok::<(), mote_crypto::Error>(())
/// ```
pub struct Eax<C: BlockCipher> {
    omac: Omac<C>,
    counter: [u8; BLOCK_SIZE],
    stream: [u8; BLOCK_SIZE],
    tag: [u8; BLOCK_SIZE],
    stream_posn: usize,
    phase: Phase,
}

impl<C: BlockCipher> Eax<C> {
    /// Wraps `cipher`; call [`set_key`](Eax::set_key) before use.
    pub fn new(cipher: C) -> Self {
        Self {
            omac: Omac::new(cipher),
            counter: [0u8; BLOCK_SIZE],
            stream: [0u8; BLOCK_SIZE],
            tag: [0u8; BLOCK_SIZE],
            stream_posn: 0,
            phase: Phase::Unkeyed,
        }
    }

    /// Keys the underlying cipher. Any session in progress is discarded.
    pub fn set_key(&mut self, key: &[u8]) -> Result<()> {
        self.omac.set_key(key)?;
        self.counter.zeroize();
        self.stream.zeroize();
        self.tag.zeroize();
        self.stream_posn = 0;
        self.phase = Phase::Keyed;
        Ok(())
    }

    /// Starts a session with `iv`, which must not be empty.
    ///
    /// The IV is hashed through OMAC domain 0, so any non-empty length is
    /// accepted; 16 bytes is conventional. Reusing an IV under the same key
    /// forfeits both confidentiality and authenticity.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<()> {
        if self.phase == Phase::Unkeyed {
            return Err(Error::InvalidState);
        }
        if iv.is_empty() {
            return Err(Error::InvalidIvLength);
        }

        self.omac.init_next(0);
        self.omac.update(iv);
        self.counter = self.omac.finalize();
        self.tag = self.counter;

        self.omac.init_next(1);
        self.stream_posn = BLOCK_SIZE;
        self.phase = Phase::AcceptingAad;
        Ok(())
    }

    /// Absorbs associated data; only valid before encryption or decryption
    /// has begun.
    pub fn add_auth_data(&mut self, data: &[u8]) -> Result<()> {
        if self.phase != Phase::AcceptingAad {
            return Err(Error::InvalidState);
        }
        self.omac.update(data);
        Ok(())
    }

    /// Encrypts `input` into `output` (equal lengths) and authenticates the
    /// produced ciphertext. May be called repeatedly to stream a message.
    pub fn encrypt(&mut self, output: &mut [u8], input: &[u8]) -> Result<()> {
        assert_eq!(output.len(), input.len());
        self.start_crypt()?;

        let mut offset = 0;
        while offset < input.len() {
            if self.stream_posn == BLOCK_SIZE {
                self.refill_keystream();
            }
            let n = (BLOCK_SIZE - self.stream_posn).min(input.len() - offset);
            for i in 0..n {
                output[offset + i] = input[offset + i] ^ self.stream[self.stream_posn + i];
            }
            self.omac.update(&output[offset..offset + n]);
            self.stream_posn += n;
            offset += n;
        }
        Ok(())
    }

    /// Decrypts `input` into `output` (equal lengths), authenticating the
    /// consumed ciphertext. May be called repeatedly to stream a message.
    ///
    /// The plaintext is produced before the tag is known; nothing derived
    /// from it may be acted upon until [`check_tag`](Eax::check_tag) passes.
    pub fn decrypt(&mut self, output: &mut [u8], input: &[u8]) -> Result<()> {
        assert_eq!(output.len(), input.len());
        self.start_crypt()?;

        let mut offset = 0;
        while offset < input.len() {
            if self.stream_posn == BLOCK_SIZE {
                self.refill_keystream();
            }
            let n = (BLOCK_SIZE - self.stream_posn).min(input.len() - offset);
            self.omac.update(&input[offset..offset + n]);
            for i in 0..n {
                output[offset + i] = input[offset + i] ^ self.stream[self.stream_posn + i];
            }
            self.stream_posn += n;
            offset += n;
        }
        Ok(())
    }

    /// Finalizes the session and copies out up to 16 tag bytes.
    ///
    /// Truncated tags weaken forgery resistance proportionally; lengths
    /// above 16 are rejected. The session moves to `Tagged` and needs a
    /// fresh [`set_iv`](Eax::set_iv) before further use.
    pub fn compute_tag(&mut self, tag: &mut [u8]) -> Result<()> {
        if tag.len() > BLOCK_SIZE {
            return Err(Error::InvalidTagLength);
        }
        self.finish_tag()?;
        tag.copy_from_slice(&self.tag[..tag.len()]);
        Ok(())
    }

    /// Finalizes the session and verifies `tag` in constant time.
    ///
    /// Fail-closed: tags longer than 16 bytes, un-keyed or un-IV'd sessions
    /// and already-finalized sessions all verify as `false`. The comparison
    /// covers every byte of `tag`; it does not stop at the first mismatch.
    /// `false` means the message must be discarded.
    pub fn check_tag(&mut self, tag: &[u8]) -> bool {
        if tag.len() > BLOCK_SIZE {
            return false;
        }
        if self.finish_tag().is_err() {
            return false;
        }
        ct_eq(tag, &self.tag[..tag.len()])
    }

    /// Zeroizes all session state, including the cipher key schedule.
    pub fn clear(&mut self) {
        self.omac.clear();
        self.counter.zeroize();
        self.stream.zeroize();
        self.tag.zeroize();
        self.stream_posn = 0;
        self.phase = Phase::Unkeyed;
    }

    /// Closes the associated-data phase and opens the ciphertext hash.
    fn start_crypt(&mut self) -> Result<()> {
        match self.phase {
            Phase::AcceptingAad => {
                let aad_hash = self.omac.finalize();
                xor_in_place(&mut self.tag, &aad_hash);
                self.omac.init_next(2);
                self.phase = Phase::Crypting;
                Ok(())
            }
            Phase::Crypting => Ok(()),
            _ => Err(Error::InvalidState),
        }
    }

    #[inline]
    fn refill_keystream(&mut self) {
        self.stream = self.counter;
        self.omac.cipher().encrypt_block(&mut self.stream);
        inc_be(&mut self.counter);
        self.stream_posn = 0;
    }

    fn finish_tag(&mut self) -> Result<()> {
        // A session with no payload at all is legal; the ciphertext hash
        // then covers the empty string.
        self.start_crypt()?;
        let ct_hash = self.omac.finalize();
        xor_in_place(&mut self.tag, &ct_hash);
        self.phase = Phase::Tagged;
        Ok(())
    }
}

impl<C: BlockCipher> Drop for Eax<C> {
    fn drop(&mut self) {
        self.clear();
    }
}
