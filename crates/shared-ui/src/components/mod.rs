pub mod background_image;
pub mod greeting_banner;
pub mod loading;
pub mod nav_progress;

pub use background_image::*;
pub use greeting_banner::*;
pub use loading::*;
pub use nav_progress::*;
