mod menu;
mod principal;
mod role;
mod status;
mod user;

pub use menu::*;
pub use principal::*;
pub use role::*;
pub use status::*;
pub use user::*;
