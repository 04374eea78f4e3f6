//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, MatchArgs, OutputFormat, PlayerArg, load_layout, player_kinds};
use ctfgrid::runner::build_players;
use ctfgrid::{Universe, run_game};
use std::path::Path;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the layout or config cannot be loaded, or the game
/// fails.
pub(crate) fn execute(
    layout_path: &Path,
    players: &[PlayerArg],
    settings: &MatchArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let layout = load_layout(layout_path)?;
    let config = settings.match_config()?;
    let team_names = settings.team_names();
    let universe = Universe::from_layout(&layout, &team_names)?;

    let kinds = player_kinds(players);
    let mut players = build_players(&kinds, config.seed);
    let labels: Vec<&str> = players.iter().map(|player| player.name()).collect();

    if !quiet && format == OutputFormat::Text {
        println!("Running game with seed {}...", config.seed);
        println!("Layout: {}", layout_path.display());
        for (name, label) in team_names.iter().zip(&labels) {
            println!("  {name}: {label}");
        }
        println!();
        println!("{universe}");
        println!();
    }

    let result = run_game(universe, &mut players, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result, &team_names));
            if !quiet {
                println!();
                println!("{}", result.final_grid);
            }
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result, &team_names);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
    }

    Ok(())
}
