// Copyright 2026 the Rich Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closest-face selection within a family, in the order of the CSS font matching algorithm.

use smallvec::SmallVec;

use super::FontMember;
use crate::{FontStyle, FontWeight};

/// Returns the index of the member of `set` closest to `style` and `weight`.
///
/// Style is narrowed first: italic falls back to oblique and then upright, oblique falls back
/// to italic and then upright, upright falls back to oblique and then italic. Among the
/// remaining faces, weight is chosen as CSS does: targets between 400 and 500 try heavier faces
/// up to 500 first, lighter targets prefer lighter faces, heavier targets prefer heavier faces.
///
/// Returns `None` only for an empty set.
pub fn match_member(set: &[FontMember], style: FontStyle, weight: FontWeight) -> Option<usize> {
    match set.len() {
        0 => return None,
        1 => return Some(0),
        _ => {}
    }

    let fallbacks = match style {
        FontStyle::Italic => [FontStyle::Italic, FontStyle::Oblique, FontStyle::Normal],
        FontStyle::Oblique => [FontStyle::Oblique, FontStyle::Italic, FontStyle::Normal],
        FontStyle::Normal => [FontStyle::Normal, FontStyle::Oblique, FontStyle::Italic],
    };
    let use_style = fallbacks
        .into_iter()
        .find(|candidate| set.iter().any(|f| f.style == *candidate))
        .unwrap_or(set[0].style);

    let candidates: SmallVec<[(usize, f32); 8]> = set
        .iter()
        .enumerate()
        .filter(|(_, f)| f.style == use_style)
        .map(|(ix, f)| (ix, f.weight.value()))
        .collect();

    let weight = weight.value();
    if let Some(&(ix, _)) = candidates.iter().find(|(_, w)| *w == weight) {
        return Some(ix);
    }

    let lighter = || {
        candidates
            .iter()
            .filter(|(_, w)| *w < weight)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|&(ix, _)| ix)
    };
    let heavier = |limit: f32| {
        candidates
            .iter()
            .filter(|(_, w)| *w > weight && *w <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|&(ix, _)| ix)
    };

    if (400.0..=500.0).contains(&weight) {
        heavier(500.0)
            .or_else(lighter)
            .or_else(|| heavier(f32::INFINITY))
    } else if weight < 400.0 {
        lighter().or_else(|| heavier(f32::INFINITY))
    } else {
        heavier(f32::INFINITY).or_else(lighter)
    }
}
