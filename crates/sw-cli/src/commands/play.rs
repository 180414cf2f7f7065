use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

/// Play a world interactively. The save file is rewritten on quit.
pub fn run(file: &Path, actor: Option<&str>) -> Result<(), String> {
    let mut game = super::load_game(file)?;
    let actor = super::pick_actor(&game, actor)?;

    println!(
        "Playing {} as {}. Type commands, {} for the menu, {} to stop.",
        game.world().meta.name.bold(),
        actor.bold(),
        "actions".cyan(),
        "quit".cyan()
    );
    let opening = game
        .resolve_and_execute(&actor, "look")
        .map_err(|e| e.to_string())?;
    println!("{}", opening.description);

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".bold());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        if input.eq_ignore_ascii_case("actions") {
            for action in game.enumerate_actions(&actor).map_err(|e| e.to_string())? {
                println!("  {}  {}", action.command.cyan(), action.description);
            }
            continue;
        }

        match game.resolve_and_execute(&actor, input) {
            Ok(result) if result.success => println!("{}", result.description),
            Ok(result) => println!("{}", result.description.yellow()),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }

    super::save_game(file, &game)?;
    println!("Saved to {}.", file.display());
    Ok(())
}
