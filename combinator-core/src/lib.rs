//! Combinator Core
//!
//! Leaf value types shared by the interpreted and compiled execution modes
//! of the combinator framework.

pub mod checkpoint;
pub mod position;
pub mod text_slice;

pub use checkpoint::Checkpoint;
pub use position::Position;
pub use text_slice::TextSlice;
