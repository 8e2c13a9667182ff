//! Bundling managed artifacts for distribution.
//!
//! Packaging runs in three steps:
//!
//! 1. [`unpack`] - extract each pre-built archive once into `<archive>.d`
//! 2. [`merge`] - index every artifact root and copy the union into the staging tree
//! 3. [`publish`] - run the archiver over the staging tree and move the bundle out

pub mod merge;
pub mod publish;
pub mod unpack;

pub use merge::{ArtifactIndex, Origin, materialize};
pub use publish::{install_binary, publish, relocate};
pub use unpack::{find_archives, memo_dir, unpack_archives};
