mod music;
mod reminder;
mod shared;
mod status;

pub mod dtos {
    pub use crate::shared::dtos::*;
}

pub use crate::music::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
