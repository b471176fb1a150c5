//! Point budgets: ability point-buy, backgrounds, icon relationships
//!
//! Validators are advisory. They report totals, remaining points and
//! violations; deciding whether to reject a mutation belongs to the caller.

use std::collections::HashSet;
use thiserror::Error;

use crate::value_objects::{Ability, AbilityScores, Background, IconRelationship};

/// Total point-buy budget.
pub const POINT_BUY_BUDGET: i32 = 28;
/// Range the point-buy stepper allows.
pub const POINT_BUY_STEP_MIN: i32 = 8;
pub const POINT_BUY_STEP_MAX: i32 = 14;
/// Domain of the cost table.
pub const POINT_BUY_TABLE_MIN: i32 = 8;
pub const POINT_BUY_TABLE_MAX: i32 = 18;
/// Display value for a score the table does not cover.
pub const INVALID_POINT_BUY_COST: i32 = -1;

pub const BACKGROUND_POINT_CAP: i32 = 8;
pub const BACKGROUND_ENTRY_CAP: i32 = 5;
/// Both the aggregate cap and the per-relationship maximum.
pub const ICON_POINT_CAP: i32 = 3;
pub const ICON_ENTRY_MIN: i32 = 1;

/// Costs for scores 8 through 18.
const POINT_BUY_COSTS: [i32; 11] = [0, 1, 2, 3, 4, 5, 7, 8, 10, 13, 16];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("{ability} score {score} cannot be bought with points")]
    Unpurchasable { ability: Ability, score: i32 },

    #[error("Point-buy spends {spent} of {budget} points")]
    PointBuyExceeded { spent: i32, budget: i32 },

    #[error("Background {index} has {points} points, allowed 0..={max}")]
    BackgroundEntryOutOfRange { index: usize, points: i32, max: i32 },

    #[error("Backgrounds total {total} points, cap is {cap}")]
    BackgroundTotalExceeded { total: i32, cap: i32 },

    #[error("Icon {icon_id} has {points} points, allowed {min}..={max}")]
    IconEntryOutOfRange {
        icon_id: String,
        points: i32,
        min: i32,
        max: i32,
    },

    #[error("Icon relationships total {total} points, cap is {cap}")]
    IconTotalExceeded { total: i32, cap: i32 },

    #[error("Icon {icon_id} has more than one relationship")]
    DuplicateIcon { icon_id: String },

    #[error("Racial and class bonus both target {0}")]
    DuplicateAbilityBonus(Ability),
}

// =============================================================================
// Ability point-buy
// =============================================================================

/// Cost of one score, or `None` when the table does not cover it.
pub fn point_buy_cost(score: i32) -> Option<i32> {
    if !(POINT_BUY_TABLE_MIN..=POINT_BUY_TABLE_MAX).contains(&score) {
        return None;
    }
    usize::try_from(score - POINT_BUY_TABLE_MIN)
        .ok()
        .and_then(|i| POINT_BUY_COSTS.get(i).copied())
}

/// [`point_buy_cost`] with [`INVALID_POINT_BUY_COST`] for uncovered scores.
pub fn point_buy_cost_or_sentinel(score: i32) -> i32 {
    point_buy_cost(score).unwrap_or(INVALID_POINT_BUY_COST)
}

/// Sum of costs of the base (pre-bonus) scores present in the mapping.
pub fn point_buy_total(abilities: &AbilityScores) -> Result<i32, BudgetError> {
    abilities.iter().try_fold(0, |sum, (ability, score)| {
        point_buy_cost(score)
            .map(|cost| sum + cost)
            .ok_or(BudgetError::Unpurchasable { ability, score })
    })
}

pub fn point_buy_remaining(abilities: &AbilityScores) -> Result<i32, BudgetError> {
    point_buy_total(abilities).map(|spent| POINT_BUY_BUDGET - spent)
}

/// False for an unpurchasable score as well as for overspending.
pub fn is_point_buy_within_budget(abilities: &AbilityScores) -> bool {
    matches!(point_buy_total(abilities), Ok(spent) if spent <= POINT_BUY_BUDGET)
}

pub fn validate_point_buy(abilities: &AbilityScores) -> Result<(), BudgetError> {
    let spent = point_buy_total(abilities)?;
    if spent > POINT_BUY_BUDGET {
        return Err(BudgetError::PointBuyExceeded {
            spent,
            budget: POINT_BUY_BUDGET,
        });
    }
    Ok(())
}

// =============================================================================
// Backgrounds
// =============================================================================

pub fn background_total(backgrounds: &[Background]) -> i32 {
    backgrounds.iter().map(|b| b.points).sum()
}

pub fn background_remaining(backgrounds: &[Background]) -> i32 {
    BACKGROUND_POINT_CAP - background_total(backgrounds)
}

/// Whether setting entry `index` to `points` keeps every background cap.
///
/// An `index` past the end is treated as a new entry.
pub fn can_set_background_points(backgrounds: &[Background], index: usize, points: i32) -> bool {
    if !(0..=BACKGROUND_ENTRY_CAP).contains(&points) {
        return false;
    }
    let others: i32 = backgrounds
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, b)| b.points)
        .sum();
    others + points <= BACKGROUND_POINT_CAP
}

pub fn validate_backgrounds(backgrounds: &[Background]) -> Result<(), BudgetError> {
    for (index, bg) in backgrounds.iter().enumerate() {
        if !(0..=BACKGROUND_ENTRY_CAP).contains(&bg.points) {
            return Err(BudgetError::BackgroundEntryOutOfRange {
                index,
                points: bg.points,
                max: BACKGROUND_ENTRY_CAP,
            });
        }
    }
    let total = background_total(backgrounds);
    if total > BACKGROUND_POINT_CAP {
        return Err(BudgetError::BackgroundTotalExceeded {
            total,
            cap: BACKGROUND_POINT_CAP,
        });
    }
    Ok(())
}

// =============================================================================
// Icon relationships
// =============================================================================

pub fn icon_total(relationships: &[IconRelationship]) -> i32 {
    relationships.iter().map(|r| r.points).sum()
}

pub fn icon_remaining(relationships: &[IconRelationship]) -> i32 {
    ICON_POINT_CAP - icon_total(relationships)
}

/// Whether giving `icon_id` exactly `points` keeps the icon caps, replacing
/// any existing relationship with that icon.
pub fn can_set_icon_points(relationships: &[IconRelationship], icon_id: &str, points: i32) -> bool {
    if !(ICON_ENTRY_MIN..=ICON_POINT_CAP).contains(&points) {
        return false;
    }
    let others: i32 = relationships
        .iter()
        .filter(|r| r.icon_id != icon_id)
        .map(|r| r.points)
        .sum();
    others + points <= ICON_POINT_CAP
}

pub fn validate_icon_relationships(relationships: &[IconRelationship]) -> Result<(), BudgetError> {
    let mut seen = HashSet::new();
    for rel in relationships {
        if !seen.insert(rel.icon_id.as_str()) {
            return Err(BudgetError::DuplicateIcon {
                icon_id: rel.icon_id.clone(),
            });
        }
        if !(ICON_ENTRY_MIN..=ICON_POINT_CAP).contains(&rel.points) {
            return Err(BudgetError::IconEntryOutOfRange {
                icon_id: rel.icon_id.clone(),
                points: rel.points,
                min: ICON_ENTRY_MIN,
                max: ICON_POINT_CAP,
            });
        }
    }
    let total = icon_total(relationships);
    if total > ICON_POINT_CAP {
        return Err(BudgetError::IconTotalExceeded {
            total,
            cap: ICON_POINT_CAP,
        });
    }
    Ok(())
}

/// Racial and class bonuses must name different abilities when both are set.
pub fn validate_ability_bonuses(
    racial: Option<Ability>,
    class: Option<Ability>,
) -> Result<(), BudgetError> {
    match (racial, class) {
        (Some(r), Some(c)) if r == c => Err(BudgetError::DuplicateAbilityBonus(r)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::RelationshipType;

    #[test]
    fn cost_table() {
        assert_eq!(point_buy_cost(8), Some(0));
        assert_eq!(point_buy_cost(14), Some(7));
        assert_eq!(point_buy_cost(15), Some(8));
        assert_eq!(point_buy_cost(18), Some(16));
        assert_eq!(point_buy_cost(7), None);
        assert_eq!(point_buy_cost_or_sentinel(19), INVALID_POINT_BUY_COST);
    }

    #[test]
    fn point_buy_totals() {
        assert_eq!(point_buy_total(&AbilityScores::uniform(10)), Ok(12));
        assert_eq!(point_buy_total(&AbilityScores::uniform(8)), Ok(0));
        assert_eq!(point_buy_remaining(&AbilityScores::uniform(10)), Ok(16));
    }

    #[test]
    fn unpurchasable_score_is_never_summed() {
        let scores = AbilityScores::uniform(8).with(Ability::Wisdom, 19);
        assert_eq!(
            point_buy_total(&scores),
            Err(BudgetError::Unpurchasable {
                ability: Ability::Wisdom,
                score: 19
            })
        );
        assert!(!is_point_buy_within_budget(&scores));
    }

    #[test]
    fn budget_boundary() {
        // 14,14,14,14 = 28
        let at_cap = AbilityScores::uniform(8)
            .with(Ability::Strength, 14)
            .with(Ability::Constitution, 14)
            .with(Ability::Dexterity, 14)
            .with(Ability::Intelligence, 14);
        assert!(is_point_buy_within_budget(&at_cap));
        assert_eq!(validate_point_buy(&at_cap), Ok(()));

        let over = at_cap.with(Ability::Wisdom, 9);
        assert_eq!(
            validate_point_buy(&over),
            Err(BudgetError::PointBuyExceeded {
                spent: 29,
                budget: POINT_BUY_BUDGET
            })
        );
    }

    fn bgs(points: &[i32]) -> Vec<Background> {
        points.iter().map(|p| Background::new("bg", *p)).collect()
    }

    #[test]
    fn background_caps() {
        let current = bgs(&[4, 3, 0]);
        assert_eq!(background_total(&current), 7);
        assert_eq!(background_remaining(&current), 1);
        assert!(can_set_background_points(&current, 2, 1));
        assert!(!can_set_background_points(&current, 2, 2));
        assert!(can_set_background_points(&current, 0, 5));
        assert!(!can_set_background_points(&current, 1, 6));
        assert!(!can_set_background_points(&current, 1, -1));
    }

    #[test]
    fn validate_backgrounds_reports_first_violation() {
        assert_eq!(validate_backgrounds(&bgs(&[5, 3])), Ok(()));
        assert_eq!(
            validate_backgrounds(&bgs(&[6, 0])),
            Err(BudgetError::BackgroundEntryOutOfRange {
                index: 0,
                points: 6,
                max: 5
            })
        );
        assert_eq!(
            validate_backgrounds(&bgs(&[5, 4])),
            Err(BudgetError::BackgroundTotalExceeded { total: 9, cap: 8 })
        );
    }

    fn rel(icon: &str, points: i32) -> IconRelationship {
        IconRelationship::new(icon, RelationshipType::Positive, points)
    }

    #[test]
    fn icon_caps() {
        let current = vec![rel("archmage", 2)];
        assert_eq!(icon_remaining(&current), 1);
        assert!(can_set_icon_points(&current, "lich-king", 1));
        assert!(!can_set_icon_points(&current, "lich-king", 2));
        assert!(can_set_icon_points(&current, "archmage", 3));
        assert!(!can_set_icon_points(&current, "archmage", 0));
        assert!(!can_set_icon_points(&current, "archmage", 4));
    }

    #[test]
    fn validate_icons() {
        assert_eq!(
            validate_icon_relationships(&[rel("archmage", 1), rel("emperor", 2)]),
            Ok(())
        );
        assert!(matches!(
            validate_icon_relationships(&[rel("archmage", 1), rel("archmage", 1)]),
            Err(BudgetError::DuplicateIcon { .. })
        ));
        assert!(matches!(
            validate_icon_relationships(&[rel("archmage", 0)]),
            Err(BudgetError::IconEntryOutOfRange { .. })
        ));
        assert_eq!(
            validate_icon_relationships(&[rel("a", 2), rel("b", 2)]),
            Err(BudgetError::IconTotalExceeded { total: 4, cap: 3 })
        );
    }

    #[test]
    fn ability_bonuses_must_differ() {
        assert!(validate_ability_bonuses(Some(Ability::Strength), Some(Ability::Dexterity)).is_ok());
        assert!(validate_ability_bonuses(Some(Ability::Strength), None).is_ok());
        assert_eq!(
            validate_ability_bonuses(Some(Ability::Wisdom), Some(Ability::Wisdom)),
            Err(BudgetError::DuplicateAbilityBonus(Ability::Wisdom))
        );
    }
}
