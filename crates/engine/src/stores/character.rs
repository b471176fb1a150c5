//! Character store - owns the in-progress character.
//!
//! Every mutation builds a new snapshot, swaps it in, then calls subscribers
//! synchronously in registration order with the new snapshot. A failed
//! mutation leaves the previous snapshot in place and notifies nobody.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use sheetsmith_domain::rules::{calculate_all, BudgetError};
use sheetsmith_domain::{
    Ability, Background, Character, CreationStep, DerivedStats, IconRelationship,
    IconRelationshipChange, RelationshipType, SelectionKind, StepCompletion, ToggleOutcome,
};
use thiserror::Error;

use crate::infrastructure::ports::ClassSource;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot select more than {max} {kind}s")]
    SelectionFull { kind: SelectionKind, max: usize },

    #[error("Unknown character field path: {0}")]
    UnknownPath(String),

    #[error("Invalid value at {path}: {message}")]
    InvalidValue { path: String, message: String },

    #[error("Background index {index} out of range (have {len})")]
    BackgroundIndex { index: usize, len: usize },

    #[error("Invalid character: {0}")]
    InvalidSnapshot(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Handle returned by [`CharacterStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Arc<Character>)>;

pub struct CharacterStore {
    current: Arc<Character>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for CharacterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterStore")
            .field("current", &self.current)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStore {
    pub fn new() -> Self {
        Self::with_character(Character::default())
    }

    pub fn with_character(character: Character) -> Self {
        Self {
            current: Arc::new(character),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot. Later mutations never change a snapshot already handed out.
    pub fn get(&self) -> Arc<Character> {
        Arc::clone(&self.current)
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<Character>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn replace(&mut self, next: Character) {
        self.current = Arc::new(next);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.current);
        }
    }

    // =========================================================================
    // Generic updates
    // =========================================================================

    /// Applies `f` to a copy of the current character and swaps it in.
    pub fn update(&mut self, f: impl FnOnce(&mut Character)) {
        let mut next = Character::clone(&self.current);
        f(&mut next);
        self.replace(next);
    }

    /// Like [`CharacterStore::update`], but an `Err` from `f` discards the copy.
    pub fn try_update<T, E>(
        &mut self,
        f: impl FnOnce(&mut Character) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut next = Character::clone(&self.current);
        let out = f(&mut next)?;
        self.replace(next);
        Ok(out)
    }

    /// Shallow merge of top-level snapshot fields, e.g. `{"name": "Vex", "level": 2}`.
    pub fn merge(&mut self, patch: &Value) -> Result<(), StoreError> {
        let fields = patch.as_object().ok_or_else(|| StoreError::InvalidValue {
            path: String::new(),
            message: "expected a JSON object".to_string(),
        })?;
        let next = merge_fields(&self.current, fields, true)?;
        validate_snapshot(&next)?;
        tracing::debug!(fields = fields.len(), "Merged character fields");
        self.replace(next);
        Ok(())
    }

    /// Sets one nested field by dotted path, e.g. `equipment.armor` or
    /// `backgrounds.1.name`. Every segment must already exist.
    pub fn update_path(&mut self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut doc = serde_json::to_value(self.current.as_ref())?;
        let slot = locate_mut(&mut doc, path)
            .ok_or_else(|| StoreError::UnknownPath(path.to_string()))?;
        *slot = value;
        let next: Character =
            serde_json::from_value(doc).map_err(|e| StoreError::InvalidValue {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        validate_snapshot(&next)?;
        tracing::debug!(path, "Updated character path");
        self.replace(next);
        Ok(())
    }

    // =========================================================================
    // Abilities and selections
    // =========================================================================

    /// Replaces one base ability score; other scores are untouched.
    pub fn set_ability(&mut self, ability: Ability, score: i32) {
        tracing::debug!(ability = ability.key(), score, "Set ability");
        self.update(|c| c.abilities.set(ability, score));
    }

    fn toggle(
        &mut self,
        kind: SelectionKind,
        id: &str,
        max: Option<usize>,
    ) -> Result<ToggleOutcome, StoreError> {
        let outcome = self.try_update(|c| {
            let selection = c.selection_mut(kind);
            if let Some(pos) = selection.iter().position(|s| s == id) {
                selection.remove(pos);
                return Ok(ToggleOutcome::Removed { id: id.to_string() });
            }
            if let Some(max) = max {
                if selection.len() >= max {
                    return Err(StoreError::SelectionFull { kind, max });
                }
            }
            selection.push(id.to_string());
            Ok(ToggleOutcome::Added { id: id.to_string() })
        })?;
        tracing::debug!(%kind, id, added = outcome.is_added(), "Toggled selection");
        Ok(outcome)
    }

    pub fn toggle_talent(&mut self, talent_id: &str, max: usize) -> Result<ToggleOutcome, StoreError> {
        self.toggle(SelectionKind::Talent, talent_id, Some(max))
    }

    /// Spells have no cap.
    pub fn toggle_spell(&mut self, spell_id: &str) -> ToggleOutcome {
        let mut outcome = ToggleOutcome::Removed {
            id: spell_id.to_string(),
        };
        self.update(|c| {
            let spells = c.selection_mut(SelectionKind::Spell);
            match spells.iter().position(|s| s == spell_id) {
                Some(pos) => {
                    spells.remove(pos);
                }
                None => {
                    spells.push(spell_id.to_string());
                    outcome = ToggleOutcome::Added {
                        id: spell_id.to_string(),
                    };
                }
            }
        });
        tracing::debug!(spell_id, added = outcome.is_added(), "Toggled spell");
        outcome
    }

    pub fn toggle_maneuver(
        &mut self,
        maneuver_id: &str,
        max: usize,
    ) -> Result<ToggleOutcome, StoreError> {
        self.toggle(SelectionKind::Maneuver, maneuver_id, Some(max))
    }

    // =========================================================================
    // Icons and backgrounds
    // =========================================================================

    /// Drops any relationship with `icon_id`, then re-adds it when a type is
    /// given and `points > 0`.
    pub fn set_icon_relationship(
        &mut self,
        icon_id: &str,
        relationship: Option<RelationshipType>,
        points: i32,
    ) -> IconRelationshipChange {
        let mut change = IconRelationshipChange::Cleared {
            icon_id: icon_id.to_string(),
            previous: None,
        };
        self.update(|c| {
            let previous = c
                .icon_relationships
                .iter()
                .position(|r| r.icon_id == icon_id)
                .map(|pos| c.icon_relationships.remove(pos));
            change = match relationship {
                Some(kind) if points > 0 => {
                    let rel = IconRelationship::new(icon_id, kind, points);
                    c.icon_relationships.push(rel.clone());
                    IconRelationshipChange::Set(rel)
                }
                _ => IconRelationshipChange::Cleared {
                    icon_id: icon_id.to_string(),
                    previous,
                },
            };
        });
        tracing::debug!(icon_id, ?relationship, points, "Set icon relationship");
        change
    }

    pub fn update_background(
        &mut self,
        index: usize,
        name: impl Into<String>,
        points: i32,
    ) -> Result<(), StoreError> {
        let name = name.into();
        self.try_update(|c| {
            let len = c.backgrounds.len();
            let slot = c
                .backgrounds
                .get_mut(index)
                .ok_or(StoreError::BackgroundIndex { index, len })?;
            *slot = Background::new(name, points);
            Ok::<(), StoreError>(())
        })?;
        tracing::debug!(index, points, "Updated background");
        Ok(())
    }

    /// Appends an empty background and returns its index.
    pub fn add_background(&mut self) -> usize {
        let index = self.current.backgrounds.len();
        self.update(|c| c.backgrounds.push(Background::default()));
        tracing::debug!(index, "Added background");
        index
    }

    /// Removes one background; later entries shift down.
    pub fn remove_background(&mut self, index: usize) -> Result<Background, StoreError> {
        let removed = self.try_update(|c| {
            let len = c.backgrounds.len();
            if index >= len {
                return Err(StoreError::BackgroundIndex { index, len });
            }
            Ok(c.backgrounds.remove(index))
        })?;
        tracing::debug!(index, "Removed background");
        Ok(removed)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Idempotent; subscribers hear nothing when the step was already marked.
    pub fn mark_step_completed(&mut self, step: CreationStep) -> StepCompletion {
        let number = step.number();
        if self.current.is_step_completed(number) {
            return StepCompletion::AlreadyCompleted;
        }
        self.update(|c| c.completed_steps.push(number));
        tracing::debug!(step = number, "Marked step completed");
        StepCompletion::Marked
    }

    pub fn reset(&mut self) {
        tracing::debug!("Reset character");
        self.replace(Character::default());
    }

    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self.current.as_ref())?)
    }

    /// `{name}_13thage.json`, or `character_13thage.json` for an unnamed character.
    pub fn export_file_name(&self) -> String {
        let name = if self.current.name.is_empty() {
            "character"
        } else {
            self.current.name.as_str()
        };
        format!("{}_13thage.json", name)
    }

    /// Replaces the character with `json` merged onto defaults.
    ///
    /// Unknown fields are ignored. On failure the current snapshot is kept.
    pub fn import_json(&mut self, json: &str) -> Result<(), StoreError> {
        match parse_import(json) {
            Ok(next) => {
                tracing::info!(name = %next.name, "Imported character");
                self.replace(next);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Character import rejected");
                Err(err)
            }
        }
    }

    /// Derived sheet using the class resolved through `classes`.
    pub fn derived_stats(&self, classes: &dyn ClassSource) -> DerivedStats {
        let class = self
            .current
            .class
            .as_deref()
            .and_then(|id| classes.class_definition(id));
        if class.is_none() {
            tracing::debug!(class = ?self.current.class, "No class definition; derived stats degrade");
        }
        calculate_all(&self.current, class.as_ref())
    }
}

fn parse_import(json: &str) -> Result<Character, StoreError> {
    let doc: Value = serde_json::from_str(json).map_err(|e| StoreError::Import(e.to_string()))?;
    let fields = doc
        .as_object()
        .ok_or_else(|| StoreError::Import("expected a JSON object".to_string()))?;
    let next = merge_fields(&Character::default(), fields, false)
        .map_err(|e| StoreError::Import(e.to_string()))?;
    validate_snapshot(&next).map_err(|e| StoreError::Import(e.to_string()))?;
    Ok(next)
}

/// Whole-snapshot checks for paths that replace fields wholesale: a positive
/// level, unique selection ids, and one relationship per icon.
fn validate_snapshot(character: &Character) -> Result<(), StoreError> {
    if character.level < 1 {
        return Err(StoreError::InvalidSnapshot(
            "level must be at least 1".to_string(),
        ));
    }
    for kind in SelectionKind::ALL {
        let mut seen = HashSet::new();
        if let Some(dup) = character.selection(kind).iter().find(|id| !seen.insert(id.as_str())) {
            return Err(StoreError::InvalidSnapshot(format!(
                "{kind} {dup} selected more than once"
            )));
        }
    }
    let mut icons = HashSet::new();
    if let Some(dup) = character
        .icon_relationships
        .iter()
        .find(|r| !icons.insert(r.icon_id.as_str()))
    {
        let err = BudgetError::DuplicateIcon {
            icon_id: dup.icon_id.clone(),
        };
        return Err(StoreError::InvalidSnapshot(err.to_string()));
    }
    Ok(())
}

/// Overlays top-level `fields` onto `base`. With `strict`, a field the
/// character does not have is an error; otherwise it is dropped.
fn merge_fields(
    base: &Character,
    fields: &Map<String, Value>,
    strict: bool,
) -> Result<Character, StoreError> {
    let mut doc = serde_json::to_value(base)?;
    let target = doc
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidValue {
            path: String::new(),
            message: "character did not serialize to an object".to_string(),
        })?;
    for (key, value) in fields {
        if !target.contains_key(key) {
            if strict {
                return Err(StoreError::UnknownPath(key.clone()));
            }
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
    serde_json::from_value(doc).map_err(|e| StoreError::InvalidValue {
        path: String::new(),
        message: e.to_string(),
    })
}

fn locate_mut<'a>(doc: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(doc, |node, segment| match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    })
}
