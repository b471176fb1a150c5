//! 13th Age character rules
//!
//! Pure functions only. `modifiers` and `generation` stand alone; `budget`
//! and `derived` build on the modifier arithmetic.

pub mod budget;
pub mod derived;
pub mod generation;
pub mod modifiers;

pub use budget::{
    background_remaining, background_total, can_set_background_points, can_set_icon_points,
    icon_remaining, icon_total, is_point_buy_within_budget, point_buy_cost,
    point_buy_cost_or_sentinel, point_buy_remaining, point_buy_total, validate_ability_bonuses,
    validate_backgrounds, validate_icon_relationships, validate_point_buy, BudgetError,
    BACKGROUND_ENTRY_CAP, BACKGROUND_POINT_CAP, ICON_ENTRY_MIN, ICON_POINT_CAP,
    INVALID_POINT_BUY_COST, POINT_BUY_BUDGET, POINT_BUY_STEP_MAX, POINT_BUY_STEP_MIN,
};
pub use derived::{
    calculate_ac, calculate_all, calculate_hp, calculate_initiative, calculate_md, calculate_pd,
    calculate_recoveries, hp_multiplier, median_value, melee_attack_bonus, ranged_attack_bonus,
    recovery_dice_display, resolve_base_ac, resolve_recovery_die, DerivedStats,
    DEFAULT_RECOVERIES, PLACEHOLDER,
};
pub use generation::{
    base13_raw, base13_scores, four_drop_lowest, roll_all_abilities, roll_base13,
    roll_for_method, roll_four_drop_lowest, BASE13_MAX, BASE13_MIN,
};
pub use modifiers::{
    all_modifiers, effective_abilities, format_modifier, modifier_for, modifier_of, ABILITY_BONUS,
};
