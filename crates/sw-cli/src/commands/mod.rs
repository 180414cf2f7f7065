pub mod actions;
pub mod init;
pub mod play;
pub mod run;
pub mod validate;

use std::fs;
use std::path::Path;

use sw_engine::{from_primitive, to_primitive, Game};

/// Load a game from a save file.
pub fn load_game(file: &Path) -> Result<Game, String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("{}: {e}", file.display()))?;
    from_primitive(value).map_err(|e| format!("{}: {e}", file.display()))
}

/// Write a game back to a save file.
pub fn save_game(file: &Path, game: &Game) -> Result<(), String> {
    let value = to_primitive(game).map_err(|e| e.to_string())?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?;
    fs::write(file, text).map_err(|e| format!("cannot write {}: {e}", file.display()))
}

/// Pick the acting character: the one asked for, or the first actor.
pub fn pick_actor(game: &Game, actor: Option<&str>) -> Result<String, String> {
    match actor {
        Some(name) => {
            if game.actors().iter().any(|a| a.eq_ignore_ascii_case(name)) {
                Ok(name.to_string())
            } else {
                Err(format!("no such actor: {name}"))
            }
        }
        None => game
            .actors()
            .first()
            .cloned()
            .ok_or_else(|| "the save has no actors".to_string()),
    }
}
