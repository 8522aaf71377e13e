//! Barrel-to-bottle conversion rules.
//!
//! Pure arithmetic over an [`InventoryState`] snapshot. Reading and writing the
//! snapshot transactionally is the caller's job.

use potionshop_core::{DomainError, DomainResult};

use crate::potion::{PotionComposition, PotionType};
use crate::state::{Color, InventoryState};

/// Liquid consumed by one bottle.
pub const ML_PER_POTION: u32 = 100;

/// Outcome of planning against one inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottlePlan {
    /// What the caller should bottle, in response order.
    pub compositions: Vec<PotionComposition>,
    /// State to persist, or `None` when the snapshot stays as it is.
    pub next_state: Option<InventoryState>,
}

impl BottlePlan {
    /// Total bottles across all compositions.
    pub fn bottles(&self) -> i64 {
        self.compositions.iter().map(|c| c.quantity).sum()
    }
}

/// Plan the next bottling run.
///
/// Only red liquid is converted. Green, blue and dark stock is left alone and
/// never reported; multi-color planning is not part of the current rule set.
pub fn plan_bottles(state: &InventoryState) -> DomainResult<BottlePlan> {
    if state.num_red_ml == 0 {
        return Ok(BottlePlan {
            compositions: vec![PotionComposition::new(PotionType::NONE, 0)],
            next_state: None,
        });
    }

    let mut next = *state;
    let made = bottle(&mut next, Color::Red)?;

    Ok(BottlePlan {
        compositions: vec![PotionComposition::new(
            PotionType::pure(Color::Red),
            i64::from(made),
        )],
        next_state: (made > 0).then_some(next),
    })
}

/// Convert as much of one color's liquid as fits into whole bottles.
///
/// Returns the number of bottles made; the remainder below
/// [`ML_PER_POTION`] stays as liquid.
fn bottle(state: &mut InventoryState, color: Color) -> DomainResult<u32> {
    let ml = state.ml(color);
    let made = ml / ML_PER_POTION;

    let potions = state
        .potions(color)
        .checked_add(made)
        .ok_or_else(|| DomainError::invariant(format!("{color} potion count overflow")))?;

    *state.potions_mut(color) = potions;
    *state.ml_mut(color) = ml - made * ML_PER_POTION;
    Ok(made)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_red(ml: u32) -> InventoryState {
        InventoryState {
            num_red_ml: ml,
            ..InventoryState::default()
        }
    }

    #[test]
    fn zero_red_stock_yields_empty_plan_without_mutation() {
        let plan = plan_bottles(&with_red(0)).unwrap();
        assert_eq!(
            plan.compositions,
            vec![PotionComposition::new(PotionType([0, 0, 0, 0]), 0)]
        );
        assert_eq!(plan.next_state, None);
        assert_eq!(plan.bottles(), 0);
    }

    #[test]
    fn converts_whole_bottles_and_keeps_remainder() {
        let state = InventoryState {
            num_red_ml: 250,
            num_red_potion: 3,
            gold: 100,
            ..InventoryState::default()
        };

        let plan = plan_bottles(&state).unwrap();
        assert_eq!(
            plan.compositions,
            vec![PotionComposition::new(PotionType([100, 0, 0, 0]), 2)]
        );

        let next = plan.next_state.unwrap();
        assert_eq!(next.num_red_ml, 50);
        assert_eq!(next.num_red_potion, 5);
        assert_eq!(next.gold, 100);
    }

    #[test]
    fn below_one_bottle_reports_red_with_zero_quantity() {
        let plan = plan_bottles(&with_red(99)).unwrap();
        assert_eq!(
            plan.compositions,
            vec![PotionComposition::new(PotionType([100, 0, 0, 0]), 0)]
        );
        assert_eq!(plan.next_state, None);
    }

    #[test]
    fn other_colors_are_ignored() {
        let state = InventoryState {
            num_green_ml: 500,
            num_blue_ml: 300,
            num_dark_ml: 100,
            ..InventoryState::default()
        };

        let plan = plan_bottles(&state).unwrap();
        assert_eq!(plan.compositions[0].potion_type, PotionType::NONE);
        assert_eq!(plan.next_state, None);
    }

    #[test]
    fn potion_overflow_is_an_invariant_violation() {
        let state = InventoryState {
            num_red_ml: 1_000,
            num_red_potion: u32::MAX,
            ..InventoryState::default()
        };

        match plan_bottles(&state) {
            Err(DomainError::InvariantViolation(msg)) if msg.contains("red potion count overflow") => {}
            other => panic!("expected overflow violation, got {other:?}"),
        }
    }

    fn arb_state() -> impl Strategy<Value = InventoryState> {
        (
            prop::array::uniform4(0u32..100_000),
            prop::array::uniform4(0u32..100_000),
            0u32..1_000_000,
        )
            .prop_map(|(ml, potions, gold)| InventoryState {
                num_red_ml: ml[0],
                num_green_ml: ml[1],
                num_blue_ml: ml[2],
                num_dark_ml: ml[3],
                num_red_potion: potions[0],
                num_green_potion: potions[1],
                num_blue_potion: potions[2],
                num_dark_potion: potions[3],
                gold,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Bottles made equal `R / 100`; liquid plus bottled volume is conserved.
        #[test]
        fn conversion_conserves_red_volume(state in arb_state()) {
            let plan = plan_bottles(&state).unwrap();
            let r = state.num_red_ml;
            let next = plan.next_state.unwrap_or(state);

            prop_assert_eq!(next.num_red_ml, r % ML_PER_POTION);
            prop_assert_eq!(next.num_red_potion, state.num_red_potion + r / ML_PER_POTION);
            prop_assert_eq!(plan.bottles(), i64::from(r / ML_PER_POTION));
        }

        /// Gold and every non-red column survive planning unchanged.
        #[test]
        fn planning_touches_only_red_columns(state in arb_state()) {
            let plan = plan_bottles(&state).unwrap();
            let next = plan.next_state.unwrap_or(state);

            prop_assert_eq!(next.gold, state.gold);
            for color in [Color::Green, Color::Blue, Color::Dark] {
                prop_assert_eq!(next.ml(color), state.ml(color));
                prop_assert_eq!(next.potions(color), state.potions(color));
            }
        }

        /// Re-planning right after a plan never bottles anything more.
        #[test]
        fn planning_twice_converts_once(state in arb_state()) {
            let first = plan_bottles(&state).unwrap();
            let after = first.next_state.unwrap_or(state);
            let second = plan_bottles(&after).unwrap();

            prop_assert_eq!(second.bottles(), 0);
            prop_assert_eq!(second.next_state, None);
        }
    }
}
