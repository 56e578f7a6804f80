// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run-length attribute storage for text.
//!
//! A [`RunStore`] owns a block of text together with a sequence of [`Run`]s that partition it.
//! Every byte of the text belongs to exactly one run, and between batches no two neighbouring
//! runs carry equal attributes.
//!
//! Attributes are opaque to the store: it only clones, compares and [merges](Attributes::merge)
//! them. Writes happen inside a [`Batch`], which splits runs at the edges of each written range
//! and re-coalesces neighbours once the batch ends. Because the batch borrows the store mutably,
//! no reader can observe a half-applied multi-range edit.
//!
//! ## Indices
//!
//! All ranges are **byte indices** into UTF-8 text and must lie on character boundaries.
//! [`RunStore::len`] is the byte length; [`RunStore::char_len`] counts Unicode scalar values.
//!
//! ## Example
//!
//! ```
//! use text_runs::{Attributes, RunStore};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Style {
//!     size: Option<u32>,
//! }
//!
//! impl Attributes for Style {
//!     fn merge(&mut self, delta: &Self) -> bool {
//!         match delta.size {
//!             Some(size) if self.size != Some(size) => {
//!                 self.size = Some(size);
//!                 true
//!             }
//!             _ => false,
//!         }
//!     }
//! }
//!
//! let mut store = RunStore::new(String::from("Hello World"), Style { size: Some(12) });
//! let mut batch = store.begin_batch();
//! batch.mutate(0..5, &Style { size: Some(24) }).unwrap();
//! let summary = batch.end();
//! assert!(summary.changed());
//!
//! let ranges: Vec<_> = store.runs().iter().map(|run| run.range.clone()).collect();
//! assert_eq!(ranges, vec![0..5, 5..11]);
//! assert_eq!(store.attributes_at(7).unwrap().size, Some(12));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod attributes;
mod batch;
mod error;
mod run_store;
mod text_range;
mod text_storage;

pub use crate::attributes::Attributes;
pub use crate::batch::{Batch, BatchSummary};
pub use crate::error::{Error, ErrorKind, RangeFault};
pub use crate::run_store::{Run, RunStore};
pub use crate::text_range::TextRange;
pub use crate::text_storage::{EditableText, TextStorage};
