//! Tree rendering for deptrace.
//!
//! [`layout`] places every node of a tree on a 2-D canvas so that sibling
//! subtrees never overlap, [`svg`] turns one or more placed trees into a
//! self-contained SVG document, and [`text`] renders the box-drawn text
//! variant.

pub mod layout;
pub mod svg;
pub mod text;
