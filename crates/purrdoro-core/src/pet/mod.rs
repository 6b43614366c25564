mod companion;
mod engine;
mod state;

pub use companion::CompanionId;
pub use engine::SatietyEngine;
pub use state::{food_value, HungerLevel, PetState, DECAY_PER_MINUTE, SATIETY_MAX};
