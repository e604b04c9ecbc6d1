//! Test data shared between the layout-graph crate's test suites.
//!
//! The byte fixtures are hand-assembled from the subtable examples in the
//! OpenType specification chapters for GSUB, GPOS and the common layout
//! formats, with offsets recomputed for the trimmed-down layouts used here.

pub mod bebuffer;
pub mod gpos;
pub mod gsub;
pub mod layout;
