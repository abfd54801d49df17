//! Gallery presentation logic without a browser.
//!
//! [`GalleryState`] is changed only through [`Action`]s, [`GalleryView`] is a
//! pure projection of it, and [`GalleryController`] pushes the projection
//! into any [`RenderPort`] implementation.

mod controller;
mod state;
mod view;

pub use controller::{GalleryController, Panel, RenderPort};
pub use state::{Action, GalleryState};
pub use view::{
    count_label, filter_buttons, Card, FilterButton, GalleryView, CARD_TAG_LIMIT, EMPTY_MESSAGE,
    LOAD_ERROR_MESSAGE,
};
