use serde::{Deserialize, Serialize};

/// Potion liquid colors, in potion-type order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Dark,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Dark];

    /// Position of this color inside a `potion_type` tuple.
    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Dark => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Dark => "dark",
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the shop's single global inventory row.
///
/// Unsigned fields carry the non-negativity invariant in the type; stores must
/// reject rows that do not fit rather than clamp them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryState {
    pub num_red_ml: u32,
    pub num_green_ml: u32,
    pub num_blue_ml: u32,
    pub num_dark_ml: u32,

    pub num_red_potion: u32,
    pub num_green_potion: u32,
    pub num_blue_potion: u32,
    pub num_dark_potion: u32,

    pub gold: u32,
}

impl InventoryState {
    /// Raw liquid on hand for `color`.
    pub fn ml(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.num_red_ml,
            Color::Green => self.num_green_ml,
            Color::Blue => self.num_blue_ml,
            Color::Dark => self.num_dark_ml,
        }
    }

    /// Bottled potions on hand for `color`.
    pub fn potions(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.num_red_potion,
            Color::Green => self.num_green_potion,
            Color::Blue => self.num_blue_potion,
            Color::Dark => self.num_dark_potion,
        }
    }

    pub(crate) fn ml_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::Red => &mut self.num_red_ml,
            Color::Green => &mut self.num_green_ml,
            Color::Blue => &mut self.num_blue_ml,
            Color::Dark => &mut self.num_dark_ml,
        }
    }

    pub(crate) fn potions_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::Red => &mut self.num_red_potion,
            Color::Green => &mut self.num_green_potion,
            Color::Blue => &mut self.num_blue_potion,
            Color::Dark => &mut self.num_dark_potion,
        }
    }
}
