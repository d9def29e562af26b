//! Dynamic form engine
//!
//! The reusable pieces every entity form is assembled from: typed field
//! values, the page-level controller, the repeatable group editor, and the
//! async relation picker.

mod controller;
mod errors;
mod group;
mod picker;
mod value;

pub use controller::FormController;
pub use errors::FieldErrors;
pub use group::{update_row_field, GroupField, RowGroup};
pub use picker::{FetchOutcome, LoadState, PickerBinding, RelationOption, RelationPicker};
pub use value::{FieldValue, FormValues, RowDraft, RowId};
