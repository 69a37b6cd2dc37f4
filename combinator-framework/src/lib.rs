pub mod build;
pub mod compilation;
pub mod context;
pub mod cursor;
pub mod error;
pub mod oneof;
pub mod result;
pub mod traits;
pub mod units;

pub use combinator_core::{Checkpoint, Position, TextSlice};

pub use build::{build, CompiledParser};
pub use compilation::{CompilationContext, CompiledFragment, Flag, Slot, Stmt};
pub use context::{ActiveGuard, ParseContext, ParseOptions};
pub use cursor::Cursor;
pub use error::GrammarError;
pub use oneof::{any_of, one_of, OneOf};
pub use result::ParseResult;
pub use traits::{Compilable, Parser};
pub use units::{ident, keyword, literal, Ident, Keyword, Literal};
