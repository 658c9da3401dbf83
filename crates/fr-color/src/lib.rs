// SPDX-License-Identifier: MIT
//
// fr-color — the color model underneath focus-rings.
//
// Reads colors the way computed styles report them (hex and functional
// CSS notation), answers the two questions ring selection cares about
// (how saturated? how luminous?), and composites translucent layers with
// the plain "over" operator. Values stay in 0–255 sRGB with f64 channels
// so a stack of layers folds without intermediate rounding.
//
// The `css` module holds the lenient numeric-token readers shared by the
// rest of the workspace.

pub mod color;
pub mod css;

pub use color::{Color, Hsla, mix};
