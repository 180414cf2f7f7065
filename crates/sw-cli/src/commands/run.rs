use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use sw_agents::{FirstActionProvider, SchedulerConfig, TurnScheduler};

/// Let deterministic agents drive the world for a number of turn steps,
/// then write the result back to the save file.
pub fn run(file: &Path, steps: usize) -> Result<(), String> {
    let game = super::load_game(file)?;

    let config = SchedulerConfig::new().with_decision_timeout(Duration::from_secs(5));
    let mut scheduler = TurnScheduler::new(game, config);
    for actor in scheduler.game().actors().to_vec() {
        scheduler.set_provider(actor, FirstActionProvider);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| e.to_string())?;

    runtime.block_on(async {
        for step in 1..=steps {
            let report = scheduler.step().await.map_err(|e| e.to_string())?;
            let marker = if report.result.success {
                "·".green()
            } else {
                "!".yellow()
            };
            println!(
                "{marker} [{step:>3}] {}: {} — {}",
                report.actor.bold(),
                report.command.cyan(),
                first_line(&report.result.description)
            );
        }
        Ok::<(), String>(())
    })?;

    let game = scheduler.into_game();
    super::save_game(file, &game)?;
    println!("Saved to {}.", file.display());
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
