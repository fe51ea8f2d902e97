//! Low-level helpers shared by the index and query layers.
//!
//! - [`bits`] - positional bit packing into `u64` words and word decoding
//!
//! ```
//! use tagdb::utils::bits::{decode_word, set_bit};
//!
//! let mut words = Vec::new();
//! set_bit(&mut words, 64);
//! assert_eq!(words, vec![0, 1]);
//!
//! let mut positions = Vec::new();
//! decode_word(0b1001, &mut positions);
//! assert_eq!(positions, vec![0, 3]);
//! ```

pub mod bits;

pub use bits::*;
