//! Public site content.
//!
//! Banners, popups and the site status, plus the rules deciding which of
//! them a visitor sees at a given moment:
//! - Banners: every active banner inside its publication window, by position
//! - Popups: at most one, the newest active one inside its window
//! - Status: maintenance and coming-soon screens are skipped for staff

pub mod queries;
pub mod selection;
pub mod types;

pub use queries::*;
pub use selection::{effective_status, select_popup, visible_banners};
pub use types::*;
