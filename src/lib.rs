//! # mote-crypto - cipher modes for sensor-network firmware
//!
//! This crate is the mode-of-operation core of a sensor-network firmware
//! stack: everything above it (radio transports, routing, storage) moves
//! opaque byte blobs; everything below it is a 128-bit block cipher.
//!
//! ## Components
//!
//! - [`BlockCipher`] / [`BlockDecrypt`] - the pluggable cipher abstraction;
//!   hardware crypto peripherals slot in by implementing these traits
//! - [`Speck`], [`SpeckSmall`], [`SpeckTiny`] - the Speck128 cipher family,
//!   trading RAM for speed and decrypt capability
//! - [`Omac`] - a one-key MAC (CMAC construction) over any cipher
//! - [`Eax`] - authenticated encryption with associated data
//! - [`Xts`] / [`XtsSingleKey`] - tweakable sector encryption for
//!   non-volatile storage
//!
//! ## Properties
//!
//! - **No-std, no-alloc**: every operation works on caller-supplied slices
//! - **No unsafe code**: fully portable reference implementations
//! - **Keys are scrubbed**: key schedules and session state are zeroized on
//!   `clear()` and on drop
//! - **Misuse is rejected**: out-of-order AEAD calls return an error rather
//!   than silently corrupting the session
//! - **No hidden sharing**: sessions are plain owned state with no internal
//!   locking; concurrent use means one instance per context, which the
//!   borrow checker enforces
//!
//! ## Usage
//!
//! ```rust
//! use mote_crypto::{Eax, Speck};
//!
//! let mut eax = Eax::new(Speck::new());
//! eax.set_key(&[0u8; 16])?;
//!
//! // Seal a frame.
//! eax.set_iv(b"frame-00000001")?;
//! eax.add_auth_data(b"routing header")?;
//! let payload = b"temp=21.5;batt=3.1";
//! let mut ciphertext = [0u8; 18];
//! eax.encrypt(&mut ciphertext, payload)?;
//! let mut tag = [0u8; 16];
//! eax.compute_tag(&mut tag)?;
//!
//! // Open it again.
//! eax.set_iv(b"frame-00000001")?;
//! eax.add_auth_data(b"routing header")?;
//! let mut plaintext = [0u8; 18];
//! eax.decrypt(&mut plaintext, &ciphertext)?;
//! assert!(eax.check_tag(&tag));
//! assert_eq!(&plaintext, payload);
//! # Ok::<(), mote_crypto::Error>(())
//! ```
//!
//! A failed [`Eax::check_tag`] means the frame was tampered with or keys
//! are mismatched; discard it. It is an expected outcome, not an error.
//!
//! This crate deliberately stops at the mode layer: it does not decide
//! which traffic is encrypted, manage or rotate keys, or frame ciphertext
//! for a transport.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod cipher;
mod eax;
mod error;
mod omac;
mod speck;
mod utils;
mod xts;

#[cfg(test)]
mod tests;

pub use cipher::{BlockCipher, BlockDecrypt, BLOCK_SIZE};
pub use eax::Eax;
pub use error::{Error, Result};
pub use omac::Omac;
pub use speck::{Speck, SpeckSmall, SpeckTiny};
pub use xts::{Xts, XtsSingleKey, DEFAULT_SECTOR_SIZE};
