//! Services carousel: paginated multi-card slider.
//!
//! - `layout`: breakpoint, max index and pixel offset math
//! - `drag`: pointer gesture state machine
//! - `slider`: the controller tying navigation, drag, auto-play and resize together

pub mod drag;
pub mod layout;
pub mod slider;

pub use drag::{classify, DragState, Swipe};
pub use layout::{cards_per_view, max_index, parse_gap, Viewport};
pub use slider::{
    ArrowKey, Cursor, DotState, ServicesEffect, ServicesEvent, ServicesSlider, TrackRender,
};
