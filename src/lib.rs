//! fieldmirror binds rich editing surfaces to plain form fields.
//!
//! A page declares forms, containers, and plain text fields. Containers
//! flagged for mirroring get an editing surface attached over their field:
//! the surface seeds from the field's value, the field is hidden but kept as
//! the submission fallback, and at submission time the surface's text is
//! copied back into the field. Cursor offsets persist per page path and
//! target index, so reopening a page restores the caret.

pub mod command;
pub mod manager;
pub mod widget;

pub use command::{is_save_gesture, InputCommand};
pub use manager::{Binding, BindingManager, DiscoveredTarget, KeyOutcome};
pub use widget::SurfaceWidget;
