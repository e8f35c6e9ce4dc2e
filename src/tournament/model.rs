use crate::Chips;
use crate::Nanos;
use crate::canister::Principal;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TournamentState {
    #[default]
    Registration,
    Running,
    FinalTable,
    Completed,
    Cancelled,
}

impl TournamentState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running | Self::FinalTable)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RebuyOptions {
    pub enabled: bool,
    pub rebuy_chips: Chips,
    pub rebuy_price: Chips,
    pub max_rebuys: u32,
    /// Measured from the tournament start.
    pub rebuy_window: Nanos,
    /// Stacks at or below this may rebuy.
    pub min_chips_for_rebuy: Chips,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ReentryOptions {
    pub enabled: bool,
    pub reentry_chips: Chips,
    pub reentry_price: Chips,
    pub max_reentries: u32,
    /// Absolute deadline.
    pub reentry_end: Nanos,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BuyInOptions {
    pub freezeout: bool,
    pub rebuy: RebuyOptions,
    pub reentry: ReentryOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TournamentType {
    BuyIn(BuyInOptions),
    SitAndGo(BuyInOptions),
    Freeroll,
}

impl TournamentType {
    pub fn options(&self) -> Option<&BuyInOptions> {
        match self {
            Self::BuyIn(o) | Self::SitAndGo(o) => Some(o),
            Self::Freeroll => None,
        }
    }
    /// Freeroll and freezeout formats never sell extra chips.
    pub fn rebuy(&self) -> Option<&RebuyOptions> {
        self.options()
            .filter(|o| !o.freezeout)
            .map(|o| &o.rebuy)
            .filter(|r| r.enabled)
    }
    pub fn reentry(&self) -> Option<&ReentryOptions> {
        self.options()
            .filter(|o| !o.freezeout)
            .map(|o| &o.reentry)
            .filter(|r| r.enabled)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TournamentPlayer {
    pub chips: Chips,
    pub rebuys: u32,
    pub table: Option<Principal>,
}

/// Tournament snapshot as returned by `get_tournament`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TournamentData {
    pub id: Principal,
    pub name: String,
    pub state: TournamentState,
    pub tournament_type: TournamentType,
    pub start_time: Nanos,
    pub buy_in: Chips,
    pub starting_chips: Chips,
    /// Late registration stays open this long after the start.
    pub late_registration: Option<Nanos>,
    pub max_players: u32,
    pub current_players: BTreeMap<Principal, TournamentPlayer>,
}

impl TournamentData {
    pub fn player(&self, user: &Principal) -> Option<&TournamentPlayer> {
        self.current_players.get(user)
    }
    pub fn has_room(&self) -> bool {
        (self.current_players.len() as u32) < self.max_players
    }
}

/// Elimination order. A user who re-entered appears once per bust.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Leaderboard(pub Vec<Principal>);

impl Leaderboard {
    pub fn busts(&self, user: &Principal) -> u32 {
        self.0.iter().filter(|p| *p == user).count() as u32
    }
    pub fn contains(&self, user: &Principal) -> bool {
        self.0.contains(user)
    }
}
