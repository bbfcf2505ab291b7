//! Session state management.

mod view;

pub use view::{Spread, ViewerState};
