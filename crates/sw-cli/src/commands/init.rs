use std::path::Path;

use sw_core::{
    Character, ConsumableState, ConsumeKind, ExitBlock, Item, Location, Prop, World, WorldMeta,
    WorldResult,
};
use sw_engine::Game;

/// Build the demo homestead world and write it as a save file.
pub fn run(file: &Path) -> Result<(), String> {
    if file.exists() {
        return Err(format!("{} already exists", file.display()));
    }

    let world = build_world().map_err(|e| e.to_string())?;
    let game = Game::new(world, vec!["alice".to_string(), "bob".to_string()])
        .map_err(|e| e.to_string())?;
    super::save_game(file, &game)?;

    println!("Created demo world in {}", file.display());
    println!();
    println!("Try it:");
    println!("  sw actions {}            # see what alice can do", file.display());
    println!("  sw play {}               # play as alice", file.display());
    println!("  sw run {} --steps 6      # let the agents play", file.display());
    Ok(())
}

fn build_world() -> WorldResult<World> {
    let mut meta = WorldMeta::new("Homestead");
    meta.description = "A small house with a stocked pantry and a walled garden.".to_string();
    let mut world = World::new(meta);

    let mut kitchen = Location::new("kitchen");
    kitchen.thing.description = "A warm kitchen smelling of fresh bread.".to_string();
    kitchen.connect("north", "pantry");
    kitchen.connect("east", "garden");
    kitchen.block_exit("east", ExitBlock::new("The garden door is bolted shut."));
    world.add_location(kitchen)?;

    let mut pantry = Location::new("pantry");
    pantry.thing.description = "Narrow shelves crowded with jars.".to_string();
    pantry.connect("south", "kitchen");
    world.add_location(pantry)?;

    let mut garden = Location::new("garden");
    garden.thing.description = "A walled kitchen garden.".to_string();
    garden.connect("west", "kitchen");
    world.add_location(garden)?;

    world.add_character(Character::new("alice", "kitchen"))?;
    world.add_character(Character::new("bob", "pantry"))?;

    world.add_item(
        "kitchen",
        Item::new("apple")
            .with_examine_text("A crisp red apple.")
            .with_consumable(ConsumableState::new(ConsumeKind::Eat)),
    )?;
    world.add_item(
        "pantry",
        Item::new("cider")
            .with_examine_text("A corked bottle of cloudy cider.")
            .with_consumable(ConsumableState::new(ConsumeKind::Drink)),
    )?;
    world.add_prop(
        "kitchen",
        Prop::new("closet")
            .with_description("A tall larder closet.")
            .with_openable()
            .with_container(),
    )?;
    world.add_item_to_container("kitchen", "closet", Item::new("broom"))?;
    world.add_prop(
        "kitchen",
        Prop::new("stove")
            .with_description("A cast-iron stove.")
            .with_activatable(),
    )?;
    world.add_prop(
        "garden",
        Prop::new("bench")
            .with_description("A weathered bench.")
            .with_usable(),
    )?;
    world.add_prop(
        "pantry",
        Prop::new("strongbox")
            .with_openable()
            .with_lockable(Some("brass key".to_string()))
            .with_container(),
    )?;
    world.add_item("pantry", Item::new("brass key"))?;

    Ok(world)
}
