//! Background points, icon relationships and class talents.

use sheetsmith_domain::rules::{
    background_total, can_set_background_points, can_set_icon_points, icon_total, BudgetError,
    BACKGROUND_ENTRY_CAP, BACKGROUND_POINT_CAP, ICON_ENTRY_MIN, ICON_POINT_CAP,
};
use sheetsmith_domain::{ClassDefinition, IconRelationshipChange, RelationshipType, ToggleOutcome};

use super::CreationError;
use crate::stores::{CharacterStore, StoreError};

/// Steps background `index` by `delta`, clamped to `[0, 5]`, and returns the
/// new points. Rejected when the total would pass 8.
pub fn adjust_background_points(
    store: &mut CharacterStore,
    index: usize,
    delta: i32,
) -> Result<i32, CreationError> {
    let current = store.get();
    let bg = current
        .backgrounds
        .get(index)
        .ok_or(StoreError::BackgroundIndex {
            index,
            len: current.backgrounds.len(),
        })?;
    let points = (bg.points + delta).clamp(0, BACKGROUND_ENTRY_CAP);

    if !can_set_background_points(&current.backgrounds, index, points) {
        let total = background_total(&current.backgrounds) - bg.points + points;
        tracing::warn!(index, points, total, "Background points over cap");
        return Err(BudgetError::BackgroundTotalExceeded {
            total,
            cap: BACKGROUND_POINT_CAP,
        }
        .into());
    }

    store.update_background(index, bg.name.clone(), points)?;
    Ok(points)
}

/// Renames a background, keeping its points.
pub fn rename_background(
    store: &mut CharacterStore,
    index: usize,
    name: &str,
) -> Result<(), CreationError> {
    let points = store
        .get()
        .backgrounds
        .get(index)
        .map(|b| b.points)
        .unwrap_or(0);
    store.update_background(index, name, points)?;
    Ok(())
}

/// Picks a relationship type with an icon.
///
/// Choosing the type already held clears the relationship. Otherwise the
/// existing points carry over (1 for a new relationship), subject to the
/// icon point cap.
pub fn choose_icon_relationship(
    store: &mut CharacterStore,
    icon_id: &str,
    relationship: RelationshipType,
) -> Result<IconRelationshipChange, CreationError> {
    let current = store.get();
    let existing = current.icon_relationship(icon_id);

    if existing.is_some_and(|r| r.relationship == relationship) {
        return Ok(store.set_icon_relationship(icon_id, None, 0));
    }

    let points = existing
        .map(|r| r.points)
        .filter(|p| *p > 0)
        .unwrap_or(ICON_ENTRY_MIN);
    if !can_set_icon_points(&current.icon_relationships, icon_id, points) {
        return Err(icon_overflow(&current.icon_relationships, existing.map(|r| r.points), points));
    }
    Ok(store.set_icon_relationship(icon_id, Some(relationship), points))
}

/// Steps an existing relationship's points by `delta`, clamped to `[1, 3]`.
pub fn adjust_icon_points(
    store: &mut CharacterStore,
    icon_id: &str,
    delta: i32,
) -> Result<i32, CreationError> {
    let current = store.get();
    let existing = current
        .icon_relationship(icon_id)
        .ok_or_else(|| CreationError::NoRelationship(icon_id.to_string()))?;
    let points = (existing.points + delta).clamp(ICON_ENTRY_MIN, ICON_POINT_CAP);

    if !can_set_icon_points(&current.icon_relationships, icon_id, points) {
        return Err(icon_overflow(&current.icon_relationships, Some(existing.points), points));
    }
    store.set_icon_relationship(icon_id, Some(existing.relationship), points);
    Ok(points)
}

fn icon_overflow(
    relationships: &[sheetsmith_domain::IconRelationship],
    replaced: Option<i32>,
    points: i32,
) -> CreationError {
    let total = icon_total(relationships) - replaced.unwrap_or(0) + points;
    tracing::warn!(total, cap = ICON_POINT_CAP, "Icon points over cap");
    BudgetError::IconTotalExceeded {
        total,
        cap: ICON_POINT_CAP,
    }
    .into()
}

/// Toggles a talent with the class's talent count as the cap.
pub fn toggle_talent_for_class(
    store: &mut CharacterStore,
    class: &ClassDefinition,
    talent_id: &str,
) -> Result<ToggleOutcome, CreationError> {
    let max = usize::try_from(class.talent_limit()).unwrap_or(usize::MAX);
    store.toggle_talent(talent_id, max).map_err(|err| {
        tracing::warn!(talent_id, max, "Talent selection full");
        err.into()
    })
}
