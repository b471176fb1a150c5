//! Random ability score generation
//!
//! Two methods: 4d6 drop lowest per ability, and the cyclic base-13 spread.
//! The pure helpers take already-rolled dice; the `roll_*` wrappers draw the
//! dice from a [`RandomPort`].

use crate::aggregates::AbilityMethod;
use crate::value_objects::{Ability, AbilityScores, Die, RandomPort};

pub const BASE13_CENTER: i32 = 13;
pub const BASE13_MIN: i32 = 3;
pub const BASE13_MAX: i32 = 20;
/// Sum of the six unclamped base-13 scores for any roll.
pub const BASE13_RAW_TOTAL: i32 = 78;

pub const FOUR_DROP_LOWEST_MIN: i32 = 3;
pub const FOUR_DROP_LOWEST_MAX: i32 = 18;

/// Sum of the three highest of four d6.
pub fn four_drop_lowest(rolls: [i32; 4]) -> i32 {
    let faces = rolls.map(|r| r.clamp(1, 6));
    let lowest = faces.iter().copied().min().unwrap_or(1);
    faces.iter().sum::<i32>() - lowest
}

pub fn roll_four_drop_lowest<R: RandomPort + ?Sized>(rng: &R) -> i32 {
    four_drop_lowest(std::array::from_fn(|_| Die::D6.roll(rng)))
}

/// One independent 4d6-drop-lowest score per ability.
pub fn roll_all_abilities<R: RandomPort + ?Sized>(rng: &R) -> AbilityScores {
    Ability::ALL
        .into_iter()
        .map(|ability| (ability, roll_four_drop_lowest(rng)))
        .collect()
}

/// `13 + dice[i] - dice[(i + 1) % 6]` for each position, unclamped.
pub fn base13_raw(dice: [i32; 6]) -> [i32; 6] {
    std::array::from_fn(|i| BASE13_CENTER + dice[i] - dice[(i + 1) % dice.len()])
}

/// Base-13 scores clamped into `[3, 20]`, in [`Ability::ALL`] order.
///
/// Clamping can move the total away from [`BASE13_RAW_TOTAL`] at extreme rolls.
pub fn base13_scores(dice: [i32; 6]) -> AbilityScores {
    let raw = base13_raw(dice);
    Ability::ALL
        .into_iter()
        .zip(raw)
        .map(|(ability, score)| (ability, score.clamp(BASE13_MIN, BASE13_MAX)))
        .collect()
}

pub fn roll_base13<R: RandomPort + ?Sized>(rng: &R) -> AbilityScores {
    base13_scores(std::array::from_fn(|_| Die::D6.roll(rng)))
}

/// A full rolled set for the random methods; `None` under point-buy.
pub fn roll_for_method<R: RandomPort + ?Sized>(
    method: AbilityMethod,
    rng: &R,
) -> Option<AbilityScores> {
    match method {
        AbilityMethod::PointBuy => None,
        AbilityMethod::Roll => Some(roll_all_abilities(rng)),
        AbilityMethod::Base13 => Some(roll_base13(rng)),
    }
}
