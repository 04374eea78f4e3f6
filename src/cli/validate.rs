//! Layout validation command implementation.

use super::{CliError, load_layout, team_names};
use ctfgrid::Universe;
use ctfgrid::game::check_invariants;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the layout cannot be read, does not build a
/// universe, or the universe violates an invariant.
pub(crate) fn execute(layout_path: &Path, names: Option<&[String]>) -> Result<(), CliError> {
    println!("Validating: {}", layout_path.display());
    println!();

    let layout = load_layout(layout_path);
    print_check("Layout parses", layout.is_ok());
    let layout = layout?;

    let names = team_names(names);
    let universe = Universe::from_layout(&layout, &names);
    print_check("Universe builds", universe.is_ok());
    let universe = universe?;

    let violations = check_invariants(&universe);
    print_check("Invariants hold", violations.is_empty());
    if let Some(first) = violations.first() {
        return Err(CliError::new(first.to_string()));
    }

    println!();
    println!("Summary:");
    println!(
        "  Size:         {}x{}",
        universe.maze().width(),
        universe.maze().height()
    );
    println!("  Bots:         {}", universe.bots().len());
    for team in universe.teams() {
        println!(
            "  Team {} ({}): {} bots, {} items to defend",
            team.id,
            team.name,
            team.bots.len(),
            universe.team_item_positions(team.id).map_or(0, |items| items.len())
        );
    }
    println!();
    println!("{universe}");
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
