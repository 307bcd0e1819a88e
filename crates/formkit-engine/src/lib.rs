//! Asynchronous form event pipeline (formkit-engine)
//!
//! Reacts to edits of a live form without ever blocking the editing surface:
//! - **Events and tasks**: deferred mutations ([`FormEvent`]), cancellable
//!   memoized tasks ([`EventTask`]) and the three-way settled [`Outcome`]
//! - **Change rules**: typed per-variant rules with first-match dispatch
//! - **Integration contract**: the [`FormService`] trait, its load/send task
//!   builders and the [`Services`] registry
//! - **Stock rules**: debounced typing search over option fields
//! - **Sessions**: a [`FormSession`] owns a form, keeps one pending task per
//!   input and applies settled mutations in order
//!
//! The pure domain model lives in `formkit-model`; this crate adds the
//! runtime behavior on top of it.

pub mod config;
pub mod error;
pub mod event;
pub mod rule;
pub mod search;
pub mod service;
pub mod session;

pub use config::{PipelineConfig, DEFAULT_DEBOUNCE};
pub use error::{with_auth_mapping, ApiError, FormError};
pub use event::{ChangeTask, EventTask, FormEvent, LoadTask, Outcome, Reaction, SendTask};
pub use rule::{change_task, erase, require_by_tag, ChangeRule, FieldRule};
pub use search::TypingSearchRule;
pub use service::{
    build_change_task, build_load_task, build_send_task, FormService, Services,
};
pub use session::FormSession;
