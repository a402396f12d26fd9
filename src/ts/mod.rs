// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qt Linguist `.ts` codec
//!
//! The reader accepts anything `lupdate` and Linguist produce (format
//! versions 1.1 through 2.1), skipping elements it does not model. The
//! writer emits `lupdate`'s own layout, so a catalog that was read and
//! written back diffs cleanly against the original.

mod encoding;
mod reader;
mod writer;

pub use encoding::decode;
pub use reader::read_catalog;
pub use writer::write_catalog;
