//! Series command implementation.

use super::output::{JsonSeriesResult, format_series_csv, format_series_text};
use super::{CliError, MatchArgs, PlayerArg, SeriesFormat, load_layout, player_kinds};
use ctfgrid::runner::run_series_with;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Execute the series command.
///
/// # Errors
///
/// Returns an error if the layout or config cannot be loaded, or any game
/// fails.
pub(crate) fn execute(
    layout_path: &Path,
    players: &[PlayerArg],
    games: u64,
    threads: Option<usize>,
    settings: &MatchArgs,
    format: SeriesFormat,
    progress: bool,
) -> Result<(), CliError> {
    let layout = load_layout(layout_path)?;
    let config = settings.match_config()?;
    let team_names = settings.team_names();
    let kinds = player_kinds(players);
    let labels: Vec<String> = kinds.iter().map(|kind| kind.name().to_string()).collect();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
            )
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    let stats = run_series_with(&layout, &team_names, &kinds, games, &config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    // Calculate games per second
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    // Output based on format
    match format {
        SeriesFormat::Text => {
            println!();
            print!("{}", format_series_text(&stats, &team_names, &labels));
            println!();
            println!(
                "Duration: {:.2}s ({:.0} games/sec)",
                duration.as_secs_f64(),
                games_per_sec
            );
        }
        SeriesFormat::Json => {
            let json_result = JsonSeriesResult::from_stats(&stats, &team_names, &labels);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
        SeriesFormat::Csv => {
            print!("{}", format_series_csv(&stats, &team_names, &labels));
        }
    }

    Ok(())
}
