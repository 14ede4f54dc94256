//! Pointer event routing.
//!
//! A mounted layer registers one [`LayerListener`] with its map engine for
//! clicks and pointer moves. On each event the listener hit-tests its layer,
//! maps the hit features back to children and calls their handlers. Pointer
//! moves also go through a [`HoverTracker`] so children hear when the
//! pointer leaves them.

mod hover;
mod pointer;
mod router;

pub use hover::{HoverSet, HoverTracker, HoverTransition};
pub use pointer::{FeatureEvent, PointerEvent, PointerEventKind, ScreenPoint};
pub use router::{feature_id, hit_ids, route_click, route_hover, LayerListener};
