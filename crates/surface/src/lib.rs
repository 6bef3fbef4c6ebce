//! Editing surface for fieldmirror.
//!
//! A surface owns an in-memory document seeded from a plain field's value,
//! along with cursor, selection, undo history, auto-indent, word completion,
//! and soft-wrap layout. Surfaces are created per binding target and never
//! shared.

mod buffer;
mod completion;
mod cursor;
mod history;
mod indent;
mod surface;
mod wrap;

pub use buffer::TextBuffer;
pub use completion::{completion_candidates, completion_prefix, is_word_char};
pub use cursor::{Cursor, Selection};
pub use history::{EditOp, History};
pub use indent::leading_whitespace;
pub use surface::{Surface, SurfaceOptions};
pub use wrap::{is_word_boundary, wrap_points};
