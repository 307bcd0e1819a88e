//! Form domain model (formkit-model)
//!
//! Pure, synchronous building blocks of the form engine:
//! - **Identity kit**: opaque id newtypes, never interchangeable across kinds
//! - **Field-variant model**: a closed sum type of input kinds, each with its
//!   own focus/actionate state machine
//! - **Option engine**: selection, filtering and de-duplication for the
//!   option-list variant
//! - **Template/instance split**: immutable authored templates, live form
//!   instances derived from them
//! - **Step navigation**: wizard step availability and direction inference
//!
//! Everything here is total: transitions and the option engine never fail.
//! The asynchronous pipeline that reacts to edits lives in `formkit-engine`.

pub mod collection;
pub mod config;
pub mod field;
pub mod form;
pub mod identity;
pub mod options;
pub mod template;

pub use collection::Fields;
pub use config::{FieldConfig, Lockable, OptionsConfig};
pub use field::{
    BoolField, DateField, DateRange, Field, FieldVariant, Header, NumberField, OptionsField,
    RangeField, TextField,
};
pub use form::Form;
pub use identity::{FocusId, FormId, InputId, OptionId, ServiceId, Tag, TemplateId};
pub use options::{dedup_by_key, OptionItem, OptionList};
pub use template::{Direction, FormHeader, FormIcon, FormStyle, FormTemplate, Step};
