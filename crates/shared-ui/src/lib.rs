use dioxus::prelude::*;

pub mod components;

pub use components::*;

/// Stylesheet for every component in this crate. Link it once at the app root.
pub const STYLESHEET: Asset = asset!("/assets/shared-ui.css");
