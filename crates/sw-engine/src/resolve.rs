//! Scope-limited operand name resolution with fuzzy matching.
//!
//! Typed operand names resolve exact-first (case-insensitive), then
//! fuzzily, against only the entities in the acting character's scope.
//! Discovery always generates exact names, so fuzziness only widens what
//! a human may type; it never changes what is legal.

use strsim::jaro_winkler;
use sw_core::World;

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Where a visible item currently sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPlace {
    /// Carried by the acting character.
    Inventory,
    /// Lying loose at the character's location.
    Floor,
    /// Inside the named open container prop.
    Container(String),
}

/// A visible item resolved to its canonical name and holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundItem {
    /// The item's canonical name.
    pub name: String,
    /// The holder the item was found in.
    pub place: ItemPlace,
}

fn best_match<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    // Exact (case-insensitive) wins outright.
    if let Some(hit) = candidates
        .clone()
        .into_iter()
        .find(|c| c.eq_ignore_ascii_case(input))
    {
        return Some(hit);
    }

    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let score = jaro_winkler(&input_lower, &candidate.to_lowercase());
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(name, _)| name)
}

/// Resolve an item visible to the actor: inventory first, then the
/// location floor, then open containers.
pub fn find_visible_item(world: &World, actor: &str, input: &str) -> Option<FoundItem> {
    let character = world.character(actor)?;
    let location = world.location(&character.location)?;

    let mut candidates: Vec<(String, ItemPlace)> = Vec::new();
    for name in character.inventory.keys() {
        candidates.push((name.clone(), ItemPlace::Inventory));
    }
    for name in location.items.keys() {
        candidates.push((name.clone(), ItemPlace::Floor));
    }
    for prop in location.props.values().filter(|p| p.container_accessible()) {
        if let Some(container) = &prop.capabilities.container {
            for name in container.items.keys() {
                candidates.push((name.clone(), ItemPlace::Container(prop.name().to_string())));
            }
        }
    }

    let names: Vec<&str> = candidates.iter().map(|(n, _)| n.as_str()).collect();
    let hit = best_match(input, names.iter().copied())?;
    candidates
        .iter()
        .find(|(n, _)| n == hit)
        .map(|(name, place)| FoundItem {
            name: name.clone(),
            place: place.clone(),
        })
}

/// Resolve a prop at the actor's location to its canonical name.
pub fn find_prop(world: &World, actor: &str, input: &str) -> Option<String> {
    let location = world.location_of(actor).ok()?;
    let names: Vec<&str> = location.props.keys().map(String::as_str).collect();
    best_match(input, names.iter().copied()).map(str::to_string)
}

/// Resolve another character present at the actor's location. The actor
/// is never a candidate.
pub fn find_present_character(world: &World, actor: &str, input: &str) -> Option<String> {
    let location = world.location_of(actor).ok()?;
    let present: Vec<&str> = world
        .characters_at(location.name())
        .into_iter()
        .map(|c| c.name())
        .filter(|n| !n.eq_ignore_ascii_case(actor))
        .collect();
    best_match(input, present.iter().copied()).map(str::to_string)
}

/// Resolve any examinable thing in scope: item, prop, present character,
/// or the location itself.
pub fn find_examinable(world: &World, actor: &str, input: &str) -> Option<String> {
    if let Some(item) = find_visible_item(world, actor, input) {
        return Some(item.name);
    }
    if let Some(prop) = find_prop(world, actor, input) {
        return Some(prop);
    }
    if let Some(character) = find_present_character(world, actor, input) {
        return Some(character);
    }
    let location = world.location_of(actor).ok()?;
    if location.name().eq_ignore_ascii_case(input) {
        return Some(location.name().to_string());
    }
    None
}
