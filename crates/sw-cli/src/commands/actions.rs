use std::path::Path;

use comfy_table::{ContentArrangement, Table};

/// Print the discovered action menu for an actor.
pub fn run(file: &Path, actor: Option<&str>) -> Result<(), String> {
    let game = super::load_game(file)?;
    let actor = super::pick_actor(&game, actor)?;

    let available = game
        .enumerate_actions(&actor)
        .map_err(|e| e.to_string())?;
    if available.is_empty() {
        println!("  {actor} has nothing to do.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Command", "Description"]);
    for action in &available {
        table.add_row(vec![&action.command, &action.description]);
    }

    println!("{table}");
    println!();
    println!("  {} actions for {actor}", available.len());
    Ok(())
}
