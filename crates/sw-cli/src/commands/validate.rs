use std::path::Path;

use colored::Colorize;

/// Load a save file and report what it contains.
pub fn run(file: &Path) -> Result<(), String> {
    let game = super::load_game(file)?;
    let world = game.world();

    println!("{} {}", "ok".green().bold(), file.display());
    println!("  world: {}", world.meta.name);
    if !world.meta.description.is_empty() {
        println!("  {}", world.meta.description);
    }
    println!("  locations: {}", world.locations().count());
    println!("  characters: {}", world.characters().count());
    println!("  actors: {}", game.actors().join(", "));
    Ok(())
}
