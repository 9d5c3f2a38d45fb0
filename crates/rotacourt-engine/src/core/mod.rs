pub use self::{game::*, lineup::*, period::*, player::*, settings::*};

pub(crate) mod game;
pub(crate) mod lineup;
pub(crate) mod period;
pub(crate) mod player;
pub(crate) mod settings;
