//! Canvas rendering subsystem.
//!
//! The interactive side of the editor: handle gestures and visual state,
//! orthogonal edge routing, and the canvas pane that composes them.
//!
//! # Interaction model
//!
//! All state transitions are driven by discrete input events and complete
//! synchronously within the frame. The shared gesture context lives on
//! the graph store; every handle re-derives its own view of it per frame
//! and the frame-global cleanup guarantees a drag can never leave the
//! context stuck.

pub mod editor;
pub mod handle;
pub mod routing;

pub use editor::CanvasEditorState;
pub use handle::{
    accessible_label, derive_visual, end_frame_cleanup, handle_phase, handle_status,
    show_handle, update_handle, FlashTracker, HandleEvent, HandleInput, HandlePhase,
    HandleStatus, HandleVisual, FLASH_DURATION, HANDLE_RADIUS,
};
pub use routing::{is_orthogonal, preview, rounded, route, Side};
