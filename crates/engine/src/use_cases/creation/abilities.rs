//! Ability score generation and point-buy adjustment.

use sheetsmith_domain::rules::{
    point_buy_total, roll_for_method, BudgetError, BASE13_MAX, BASE13_MIN, POINT_BUY_BUDGET,
    POINT_BUY_STEP_MAX, POINT_BUY_STEP_MIN,
};
use sheetsmith_domain::aggregates::DEFAULT_ABILITY_SCORE;
use sheetsmith_domain::{Ability, AbilityMethod, AbilityScores, RandomPort};

use super::CreationError;
use crate::stores::CharacterStore;

pub fn set_ability_method(store: &mut CharacterStore, method: AbilityMethod) {
    tracing::debug!(%method, "Set ability method");
    store.update(|c| c.ability_method = method);
}

/// Steps one score by `delta` within `[8, 14]` and returns the points left.
///
/// Rejected, leaving the character unchanged, when the new total would
/// exceed the point-buy budget.
pub fn adjust_point_buy(
    store: &mut CharacterStore,
    ability: Ability,
    delta: i32,
) -> Result<i32, CreationError> {
    let current = store.get();
    let base = if current.abilities.contains(ability) {
        current.abilities.get(ability)
    } else {
        DEFAULT_ABILITY_SCORE
    };
    let score = (base + delta).clamp(POINT_BUY_STEP_MIN, POINT_BUY_STEP_MAX);
    let prospective = current.abilities.clone().with(ability, score);

    let spent = point_buy_total(&prospective)?;
    if spent > POINT_BUY_BUDGET {
        tracing::warn!(%ability, score, spent, "Point-buy adjustment over budget");
        return Err(BudgetError::PointBuyExceeded {
            spent,
            budget: POINT_BUY_BUDGET,
        }
        .into());
    }

    store.set_ability(ability, score);
    Ok(POINT_BUY_BUDGET - spent)
}

/// Enters a rolled score by hand, clamped into `[3, 20]`.
pub fn set_rolled_score(store: &mut CharacterStore, ability: Ability, value: i32) -> i32 {
    let score = value.clamp(BASE13_MIN, BASE13_MAX);
    store.set_ability(ability, score);
    score
}

/// Rolls a fresh set for the current random method.
pub fn roll_abilities<R: RandomPort + ?Sized>(
    store: &mut CharacterStore,
    rng: &R,
) -> Result<AbilityScores, CreationError> {
    let method = store.get().ability_method;
    let Some(scores) = roll_for_method(method, rng) else {
        tracing::warn!(%method, "Roll requested for a non-random method");
        return Err(CreationError::NotRollable(method));
    };
    tracing::debug!(%method, ?scores, "Rolled abilities");
    let rolled = scores.clone();
    store.update(|c| c.abilities = scores);
    Ok(rolled)
}
