//! Pointer routing state machine.
//!
//! ```text
//!            start_selection
//!   Idle ─────────────────────► PointSelect
//!     ▲                              │
//!     └──────────────────────────────┘
//!       cancel_selection / commit_selection
//! ```
//!
//! In `Idle` every pointer event is ignored. In `PointSelect` a bare map
//! click emits [`SelectionEvent::PositionChosen`] and a boundary click emits
//! [`SelectionEvent::BoundaryAttributesExtracted`]. A gesture whose feature
//! click was handled never also produces a position: the map-level event
//! that follows it is suppressed.

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::event::{
    AdministrativeAttributes, FeatureHit, GestureId, PointerEvent, PointerTarget, SelectionEvent,
    SelectionMode,
};
use super::preview::{PreviewHandle, TransientPreviews};
use crate::composer::MapContext;
use crate::model::LatLng;

/// Transition not allowed from the current mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("A location selection is already in progress")]
    AlreadySelecting,

    #[error("Cannot {action} a selection while idle")]
    NotSelecting { action: &'static str },
}

/// What the router did with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Router idle or surface not ready; nothing emitted
    Ignored,
    /// Map click belonging to an already handled feature click
    Suppressed,
    /// A selection event was emitted
    Emitted,
}

/// Routes pointer events to selection events.
#[derive(Debug)]
pub struct InteractionRouter {
    mode: SelectionMode,
    /// Gesture whose feature click was handled
    consumed: Option<GestureId>,
    events: mpsc::UnboundedSender<SelectionEvent>,
    previews: TransientPreviews,
}

impl InteractionRouter {
    /// Create an idle router and the receiving end of its event stream.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        Self::with_previews(TransientPreviews::new())
    }

    /// Create an idle router using `previews` for the session's images.
    pub fn with_previews(
        previews: TransientPreviews,
    ) -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                mode: SelectionMode::Idle,
                consumed: None,
                events,
                previews,
            },
            rx,
        )
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// `Idle -> PointSelect`.
    pub fn start_selection(&mut self) -> Result<(), TransitionError> {
        if self.mode == SelectionMode::PointSelect {
            return Err(TransitionError::AlreadySelecting);
        }
        self.mode = SelectionMode::PointSelect;
        self.consumed = None;
        debug!(mode = %self.mode, "Selection started");
        Ok(())
    }

    /// `PointSelect -> Idle`, discarding the session.
    pub fn cancel_selection(&mut self) -> Result<(), TransitionError> {
        self.finish("cancel")
    }

    /// `PointSelect -> Idle` after the record was submitted.
    pub fn commit_selection(&mut self) -> Result<(), TransitionError> {
        self.finish("commit")
    }

    fn finish(&mut self, action: &'static str) -> Result<(), TransitionError> {
        if self.mode != SelectionMode::PointSelect {
            return Err(TransitionError::NotSelecting { action });
        }
        self.mode = SelectionMode::Idle;
        self.consumed = None;
        let revoked = self.previews.revoke_all();
        debug!(action, revoked, "Selection finished");
        Ok(())
    }

    /// Attach an image preview to the current session.
    pub fn attach_preview(
        &mut self,
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<PreviewHandle, TransitionError> {
        if self.mode != SelectionMode::PointSelect {
            return Err(TransitionError::NotSelecting { action: "attach to" });
        }
        Ok(self.previews.insert(name, data))
    }

    pub fn previews(&self) -> &TransientPreviews {
        &self.previews
    }

    pub fn previews_mut(&mut self) -> &mut TransientPreviews {
        &mut self.previews
    }

    /// Route one pointer event.
    pub fn handle(&mut self, context: &MapContext, event: PointerEvent) -> Dispatch {
        if self.mode == SelectionMode::Idle || !context.is_ready() {
            return Dispatch::Ignored;
        }

        match event.target {
            PointerTarget::Feature(hit) => {
                self.consumed = Some(event.gesture);
                let attributes = AdministrativeAttributes::from_hit(&hit);
                trace!(gesture = event.gesture.0, tier = %hit.tier, "Boundary clicked");
                self.emit(SelectionEvent::BoundaryAttributesExtracted {
                    tier: hit.tier,
                    attributes,
                });
                Dispatch::Emitted
            }
            PointerTarget::Map => {
                if self.consumed == Some(event.gesture) {
                    trace!(gesture = event.gesture.0, "Map click suppressed by feature click");
                    return Dispatch::Suppressed;
                }
                self.consumed = None;
                trace!(gesture = event.gesture.0, position = %event.position, "Position chosen");
                self.emit(SelectionEvent::PositionChosen(event.position));
                Dispatch::Emitted
            }
        }
    }

    /// Route a whole gesture given every feature under the pointer.
    ///
    /// The innermost tier wins, since it is drawn on top. The map-level event
    /// is delivered afterwards, as the renderer would.
    pub fn handle_gesture(
        &mut self,
        context: &MapContext,
        gesture: GestureId,
        position: LatLng,
        hits: Vec<FeatureHit>,
    ) -> Dispatch {
        let topmost = hits.into_iter().max_by_key(|hit| hit.tier);
        let first = match topmost {
            Some(hit) => self.handle(context, PointerEvent::feature_click(gesture, position, hit)),
            None => Dispatch::Ignored,
        };
        let map = self.handle(context, PointerEvent::map_click(gesture, position));
        match first {
            Dispatch::Emitted => first,
            _ => map,
        }
    }

    /// Drop the session when the view goes away.
    pub fn unmount(&mut self) {
        let revoked = self.previews.revoke_all();
        if self.mode != SelectionMode::Idle {
            debug!(revoked, "Selection abandoned on unmount");
        }
        self.mode = SelectionMode::Idle;
        self.consumed = None;
    }

    fn emit(&self, event: SelectionEvent) {
        if self.events.send(event).is_err() {
            debug!("Selection event dropped, receiver closed");
        }
    }
}
