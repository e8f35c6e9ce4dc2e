//! Client-side derived state for the Pure Poker and zkPoker apps.
//!
//! Every authoritative poker rule lives behind remote table and tournament
//! actors. This crate turns their immutable snapshots into the view state a
//! table screen needs: seat metadata, turn countdowns, legal HUD actions,
//! quick-raise presets and tournament join options.
pub mod canister;
pub mod cards;
pub mod chat;
pub mod context;
pub mod error;
pub mod hud;
pub mod modal;
pub mod poll;
pub mod seating;
pub mod table;
pub mod timer;
pub mod tournament;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "client")]
pub mod wasm;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Token amounts in the smallest ledger unit (e8s / sats).
pub type Chips = u64;
/// Seat index around the table.
pub type Position = usize;
/// Canister timestamps, nanoseconds since the unix epoch.
pub type Nanos = u64;
/// Fraction of the turn timer already elapsed, in [0, 1].
pub type Progress = f64;

// ============================================================================
// CADENCES
// ============================================================================
/// Recompute cadence of the turn countdown.
pub const TURN_TICK: std::time::Duration = std::time::Duration::from_millis(200);
/// Recompute cadence of tournament join options.
pub const JOIN_TICK: std::time::Duration = std::time::Duration::from_secs(1);
/// Table snapshot refresh while seated.
pub const TABLE_POLL: std::time::Duration = std::time::Duration::from_secs(2);
/// Table snapshot refresh from the lobby.
pub const LOBBY_POLL: std::time::Duration = std::time::Duration::from_secs(10);
/// Tournament snapshot refresh.
pub const TOURNAMENT_POLL: std::time::Duration = std::time::Duration::from_secs(5);

// ============================================================================
// TABLE DEFAULTS
// ============================================================================
/// Per-turn duration used when a table config carries none.
pub const TURN_SECONDS: u16 = 30;
/// Maximum seats a table can hold.
pub const MAX_SEATS: usize = 9;
/// Chat messages fetched per refresh.
pub const CHAT_PAGE: usize = 50;
/// Chat messages kept in memory per table.
pub const CHAT_HISTORY: usize = CHAT_PAGE * 4;
/// Longest chat message accepted by the input box.
pub const CHAT_MAX_LEN: usize = 280;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "cli")]
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        println!();
        log::warn!("interrupt received, leaving the table");
        std::process::exit(0);
    });
}
