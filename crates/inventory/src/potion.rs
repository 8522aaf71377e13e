use serde::{Deserialize, Serialize};

use potionshop_core::{DomainError, DomainResult};

use crate::state::Color;

/// Percentage mix of a potion across `[red, green, blue, dark]`.
///
/// Kept signed so malformed caller input survives deserialization and is
/// reported by [`PotionType::validate`] instead of a generic parse failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PotionType(pub [i32; 4]);

impl PotionType {
    /// Sentinel used when nothing is bottled. Not a valid mix.
    pub const NONE: PotionType = PotionType([0, 0, 0, 0]);

    /// A potion made of a single color.
    pub fn pure(color: Color) -> Self {
        let mut mix = [0; 4];
        mix[color.index()] = 100;
        Self(mix)
    }

    pub fn proportion(&self, color: Color) -> i32 {
        self.0[color.index()]
    }

    pub fn validate(&self) -> DomainResult<()> {
        for color in Color::ALL {
            let p = self.proportion(color);
            if !(0..=100).contains(&p) {
                return Err(DomainError::validation(format!(
                    "{color} proportion {p} is outside 0..=100"
                )));
            }
        }

        let total: i32 = self.0.iter().sum();
        if total != 100 {
            return Err(DomainError::validation(format!(
                "proportions must sum to 100, got {total}"
            )));
        }
        Ok(())
    }
}

/// A quantity of bottles sharing one potion type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionComposition {
    pub potion_type: PotionType,
    pub quantity: i64,
}

impl PotionComposition {
    pub fn new(potion_type: PotionType, quantity: i64) -> Self {
        Self {
            potion_type,
            quantity,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.potion_type.validate()?;
        if self.quantity < 0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative, got {}",
                self.quantity
            )));
        }
        Ok(())
    }
}
