pub mod error;
pub mod feature_flags;
pub mod models;
pub mod requests;

// Access control
pub mod access;
pub mod redirect;
pub mod role;
pub mod session;

pub mod text;

pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use requests::*;

pub use access::*;
pub use redirect::{division_index_decision, landing_decision, paths, sign_in_redirect};
pub use role::*;
pub use session::*;
