//! # tagdb - In-memory tag bitset index
//!
//! tagdb keeps an append-only array of records and, for every tag a record
//! was added with, a bitset of the positions carrying that tag. Tags are
//! combined with AND / OR / AND-NOT into a query that is evaluated lazily and
//! decoded back into the records, in insertion order.
//!
//! ## Architecture
//!
//! - [`index`] - The record store, its tag bitsets and statistics
//! - [`query`] - Deferred query builder, evaluation and builder pooling
//! - [`utils`] - Bit packing and word decoding
//!
//! ## Quick Start
//!
//! ```
//! use tagdb::TagStore;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     id: u32,
//!     name: &'static str,
//! }
//!
//! const MALE: u32 = 1;
//! const FEMALE: u32 = 2;
//! const ADULT: u32 = 3;
//!
//! let store = TagStore::new();
//!
//! store.add_batch(
//!     [User { id: 1, name: "Andrew" }, User { id: 2, name: "John" }],
//!     &[MALE],
//! );
//! store
//!     .add(User { id: 27, name: "Bot" }, &[])
//!     .add(User { id: 3, name: "Mark" }, &[MALE, ADULT])
//!     .add(User { id: 5, name: "Mary" }, &[FEMALE])
//!     .add(User { id: 11, name: "Kate" }, &[FEMALE, ADULT]);
//!
//! let male_adult = store.query_by_tag(MALE).and(ADULT);
//! let names: Vec<_> = male_adult.get().unwrap().iter().map(|u| u.name).collect();
//! assert_eq!(names, ["Mark"]);
//! store.release_result(male_adult);
//!
//! let female_minor = store.query_by_tag(FEMALE).and_not(ADULT);
//! assert_eq!(female_minor.count(), Ok(1));
//! store.release_result(female_minor);
//!
//! // Every record, including the untagged one
//! assert_eq!(store.query_all().count(), Ok(6));
//! ```
//!
//! ## Concurrency
//!
//! A [`TagStore`] is shared by reference across threads. Writes (`add`,
//! `add_batch`, `reset`, `fill_from`) take its lock exclusively; a query
//! holds it shared for the whole evaluation, decoding included, so it
//! always sees one consistent state of every bitset it touches. To rebuild
//! without readers seeing partial data, build a second store and swap it in
//! with [`TagStore::fill_from`].

pub mod index;
pub mod query;
pub mod utils;

pub use index::{Bitset, MATCH_ALL, Op, Position, Step, StoreConfig, StoreStats, Tag, TagStore};
pub use query::{Query, QueryError, Result};
