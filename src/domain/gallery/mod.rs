// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.

pub mod carousel;

pub use carousel::Carousel;
