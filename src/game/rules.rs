//! The turn engine: applies one bot's move and reports what happened.
//!
//! Sequence for a legal move:
//! 1. Move the bot to the resolved destination (`BotMoved`).
//! 2. Resolve contact with every enemy bot on the same cell, in ascending
//!    bot order (`BotEaten`). Each enemy is compared against the mover's
//!    position at that point of the scan, so a mover that was just eaten
//!    stands on its spawn for the remaining enemies.
//! 3. If the mover ends up as a harvester on an item outside its own
//!    territory, collect it (`BotScored`).
//! 4. If that emptied the opponent's territory of items, the mover's team
//!    wins (`TeamWon`).
//!
//! An illegal request fails before step 1 and mutates nothing.

use tracing::{debug, info};

use crate::error::MoveError;
use crate::game::{BotId, Bot, Direction, Event, EventLog, Maze, Role, Team, legal_moves};

/// Apply a move for `bot_id` to the given game parts.
///
/// `teams` is indexed by team id and `bots` by bot id.
///
/// # Errors
///
/// Returns [`MoveError::UnknownBot`] if `bot_id` is out of range and
/// [`MoveError::IllegalMove`] if `direction` leads into a wall or off the
/// maze. State is unchanged in both cases.
pub(crate) fn apply_move(
    maze: &mut Maze,
    teams: &mut [Team],
    bots: &mut [Bot],
    bot_id: BotId,
    direction: Direction,
) -> Result<EventLog, MoveError> {
    let Some(bot) = bots.get(bot_id) else {
        debug!(target: "ctfgrid::rules", bot = bot_id, "move.rejected=unknown_bot");
        return Err(MoveError::UnknownBot {
            bot: bot_id,
            count: bots.len(),
        });
    };

    let from = bot.current();
    let Some(target) = legal_moves(maze, from).get(direction) else {
        debug!(
            target: "ctfgrid::rules",
            bot = bot_id,
            %direction,
            x = from.x,
            y = from.y,
            "move.rejected=illegal"
        );
        return Err(MoveError::IllegalMove {
            bot: bot_id,
            from,
            direction,
        });
    };

    let mut events = vec![Event::BotMoved { bot: bot_id }];
    bots[bot_id].move_to(target);
    debug!(
        target: "ctfgrid::rules",
        bot = bot_id,
        %direction,
        x = target.x,
        y = target.y,
        role = %bots[bot_id].role(),
        "bot.moved"
    );

    resolve_contacts(bots, bot_id, &mut events);
    collect_item(maze, teams, &bots[bot_id], &mut events);

    Ok(events)
}

/// Eliminate harvesters sharing a cell with an enemy destroyer.
fn resolve_contacts(bots: &mut [Bot], mover_id: BotId, events: &mut EventLog) {
    let team = bots[mover_id].team;

    for enemy_id in 0..bots.len() {
        if enemy_id == mover_id || bots[enemy_id].team == team {
            continue;
        }
        if bots[enemy_id].current() != bots[mover_id].current() {
            continue;
        }

        let (harvester, destroyer) = match (bots[mover_id].role(), bots[enemy_id].role()) {
            (Role::Harvester, Role::Destroyer) => (mover_id, enemy_id),
            (Role::Destroyer, Role::Harvester) => (enemy_id, mover_id),
            // Same-role contact is neutral.
            _ => continue,
        };

        bots[harvester].reset();
        events.push(Event::BotEaten {
            harvester,
            destroyer,
        });
        debug!(
            target: "ctfgrid::rules",
            bot = harvester,
            destroyer,
            x = bots[harvester].spawn.x,
            y = bots[harvester].spawn.y,
            "bot.eaten"
        );
    }
}

/// Score for the mover if it stands as a harvester on an enemy item.
fn collect_item(maze: &mut Maze, teams: &mut [Team], mover: &Bot, events: &mut EventLog) {
    let pos = mover.current();
    let team = &mut teams[usize::from(mover.team)];

    if !mover.is_harvester() || team.in_territory(pos) || !maze.has_item(pos) {
        return;
    }

    maze.remove_item(pos);
    team.score_point();
    events.push(Event::BotScored { bot: mover.id });
    debug!(
        target: "ctfgrid::rules",
        bot = mover.id,
        team = team.id,
        score = team.score(),
        x = pos.x,
        y = pos.y,
        "bot.scored"
    );

    let remaining = maze
        .item_positions()
        .filter(|&coord| !team.in_territory(coord))
        .count();
    if remaining == 0 {
        events.push(Event::TeamWon { team: team.id });
        info!(
            target: "ctfgrid::rules",
            team = team.id,
            name = %team.name,
            score = team.score(),
            "team.won"
        );
    }
}
