// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

/// A set of attributes that can be stored on a [`Run`](crate::Run).
///
/// The store never interprets attribute values. It needs to clone them when a run is split,
/// compare them when deciding whether neighbouring runs can be coalesced, and merge a partial
/// set (a "delta") into an existing one.
pub trait Attributes: Clone + Debug + PartialEq {
    /// Merges `delta` into `self`, key by key.
    ///
    /// Keys present in `delta` overwrite the corresponding keys of `self`. Keys absent from
    /// `delta` leave `self` untouched.
    ///
    /// Returns `true` if `self` changed.
    fn merge(&mut self, delta: &Self) -> bool;
}

impl Attributes for () {
    fn merge(&mut self, _delta: &Self) -> bool {
        false
    }
}
