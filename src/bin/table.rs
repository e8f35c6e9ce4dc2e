//! Sandbox table in the terminal.
//!
//! Seats you with a few bots at an in-memory table and plays hands through
//! the same polling, countdown and HUD paths the browser apps use. Without
//! an interactive terminal your seat is played automatically.

use anyhow::Context;
use clap::Parser;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use zkpoker::canister::*;
use zkpoker::cli;
use zkpoker::context::*;
use zkpoker::hud::*;
use zkpoker::modal::Modal;
use zkpoker::poll::Poller;
use zkpoker::table::*;
use zkpoker::timer::*;
use zkpoker::*;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bet-limit rule, e.g. NoLimit:1 or FixedLimit:2:4
    #[arg(long, env = "ZKPOKER_GAME", default_value = "NoLimit:1", value_parser = game)]
    game: GameType,
    /// Chairs at the table
    #[arg(long, env = "ZKPOKER_SEATS", default_value_t = 6)]
    seats: u8,
    /// Bot opponents
    #[arg(long, env = "ZKPOKER_BOTS", default_value_t = 3)]
    bots: usize,
    /// Starting stack of every player
    #[arg(long, env = "ZKPOKER_STACK", default_value_t = 200)]
    stack: Chips,
    /// Seconds per turn
    #[arg(long, env = "ZKPOKER_TURN_SECONDS", default_value_t = TURN_SECONDS)]
    turn: u16,
    /// Hands to play before leaving
    #[arg(long, env = "ZKPOKER_HANDS", default_value_t = 10)]
    hands: usize,
    /// Snapshot refresh in milliseconds
    #[arg(long, env = "ZKPOKER_POLL_MS", default_value_t = 500)]
    poll: u64,
}

fn game(s: &str) -> anyhow::Result<GameType> {
    GameType::try_from(s)
}

fn fallback(hud: &HudContext) -> Choice {
    match hud.choices().contains(&Choice::Check) {
        true => Choice::Check,
        false => Choice::Fold,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let args = Args::parse();
    anyhow::ensure!(
        (2..=MAX_SEATS).contains(&(args.seats as usize)),
        "seats must be between 2 and {}",
        MAX_SEATS
    );
    anyhow::ensure!(
        (1..args.seats as usize).contains(&args.bots),
        "bots must leave a seat for you"
    );
    let sandbox = Arc::new(Sandbox::new(PublicTable {
        id: Principal::from("sandbox-table"),
        config: TableConfig {
            name: String::from("sandbox"),
            game_type: args.game,
            seats: args.seats,
            timer_duration: args.turn,
            ..TableConfig::default()
        },
        seats: vec![SeatStatus::Empty; args.seats as usize],
        small_blind: args.game.small_blind(),
        big_blind: args.game.big_blind(),
        ..PublicTable::default()
    }));

    let me = Principal::from("you");
    let players = std::iter::once(me.clone())
        .chain((1..=args.bots).map(|i| Principal::from(format!("bot-{}", i))))
        .collect::<Vec<Principal>>();
    let directory = players
        .iter()
        .map(|p| User {
            principal_id: p.clone(),
            users_canister_id: Principal::from("sandbox-users"),
            user_name: p.to_string(),
            ..User::default()
        })
        .collect::<Directory>();
    let (modal, mut notices) = Modal::channel();
    let mut betting = HashMap::new();
    for player in players.iter() {
        sandbox
            .seat(player, args.stack)
            .with_context(|| format!("seating {}", player))?;
        betting.insert(player.clone(), Betting::new(player.clone(), modal.clone()));
    }
    tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            log::warn!("{}", notice);
        }
    });

    let poller = Poller::table(sandbox.clone(), Duration::from_millis(args.poll));
    let countdown = TurnTimer::drive(poller.watch(), Arc::new(SystemClock));
    let prompt = cli::Prompt::new();
    log::info!(
        "{} at {} with {} bots, {}",
        match prompt.is_interactive() {
            true => "playing",
            false => "watching",
        },
        args.game,
        args.bots,
        "ctrl-c to leave"
    );

    for hand in 1..=args.hands {
        if let Err(e) = sandbox.deal() {
            log::info!("table stopped: {}", e);
            break;
        }
        log::info!("hand {}", hand);
        let dealt = sandbox.snapshot().action_logs.len();
        let mut acted = None;
        loop {
            tokio::time::sleep(Duration::from_millis(args.poll)).await;
            let Some(snapshot) = poller.latest() else {
                continue;
            };
            if snapshot.action_logs.len() < dealt || acted.as_ref() == Some(&snapshot) {
                continue;
            }
            let view = TableContext::new(snapshot.clone(), Some(me.clone()), &directory);
            println!("\n{}", cli::table(&view, countdown.latest()));
            if !view.is_ongoing() {
                break;
            }
            let Some(actor) = snapshot.actor().cloned() else {
                break;
            };
            let Some(seat) = betting.get(&actor) else {
                break;
            };
            let context = TableContext::new(snapshot.clone(), Some(actor.clone()), &directory);
            let hud = HudContext::new(&context);
            let choice = match actor == me && prompt.is_interactive() {
                true => prompt
                    .choose(&hud)
                    .inspect_err(|e| log::warn!("prompt failed: {}", e))
                    .ok(),
                false => cli::autoplay(&hud),
            }
            .unwrap_or_else(|| fallback(&hud));
            log::info!("{} {}", actor.short(), choice);
            let submitted = match seat.submit(&*sandbox, &hud, choice).await {
                Ok(Some(_)) => true,
                Ok(None) => seat
                    .submit(&*sandbox, &hud, fallback(&hud))
                    .await
                    .is_ok_and(|t| t.is_some()),
                Err(e) => {
                    log::warn!("{}: {}", actor.short(), e);
                    seat.submit(&*sandbox, &hud, fallback(&hud))
                        .await
                        .is_ok_and(|t| t.is_some())
                }
            };
            anyhow::ensure!(submitted, "{} is stuck", actor.short());
            acted = Some(snapshot);
        }
    }

    let table = sandbox.snapshot();
    for player in players.iter() {
        let stack = table.data(player).map(|d| d.balance).unwrap_or_default();
        log::info!("{:<8} {:>7}", player.short(), stack);
    }
    Ok(())
}
