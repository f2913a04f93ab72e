//! The application form workflow: reference option loading, the dependent
//! selection cascade, draft state with validation and visibility rules, and
//! multipart submission encoding.

pub mod cascade;
pub mod domain;
pub mod form;
pub mod loader;
pub mod submission;
pub mod validation;
pub mod visibility;

pub use cascade::{Cascade, CascadeLevel, CascadeTicket, OptionListState};
pub use domain::{
    ApplicationDraft, ApplicationRecord, Area, FileAttachment, QueryEntry, ReferenceEntry,
};
pub use form::{ApplicationForm, SubmitError};
pub use loader::ReferenceCatalog;
pub use submission::SubmissionBody;
pub use validation::{validate, FieldError};
pub use visibility::FieldVisibility;
