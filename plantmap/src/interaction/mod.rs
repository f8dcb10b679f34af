//! Pointer interaction for location selection.
//!
//! [`InteractionRouter`] turns renderer clicks into [`SelectionEvent`]s sent
//! over a channel; [`LocationForm`] is the consumer that merges them into
//! the record entry form.

mod event;
mod form;
mod preview;
mod router;

pub use event::{
    AdministrativeAttributes, FeatureHit, GestureId, PointerEvent, PointerTarget, SelectionEvent,
    SelectionMode,
};
pub use form::LocationForm;
pub use preview::{PreviewHandle, RevokeHook, TransientPreviews};
pub use router::{Dispatch, InteractionRouter, TransitionError};
