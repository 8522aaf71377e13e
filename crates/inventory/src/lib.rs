//! Potion inventory domain.
//!
//! Business rules for the shop's stock, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod plan;
pub mod potion;
pub mod state;

pub use plan::{plan_bottles, BottlePlan, ML_PER_POTION};
pub use potion::{PotionComposition, PotionType};
pub use state::{Color, InventoryState};
