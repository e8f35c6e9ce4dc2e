use super::*;
use crate::Chips;
use crate::Nanos;
use crate::canister::Principal;
use crate::timer::Clock;
use crate::timer::Ticker;
use std::sync::Arc;
use tokio::sync::watch;

/// How the local user can buy into a tournament right now, and for how much.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum JoinType {
    Join(Chips),
    Late(Chips),
    Reentry(Chips),
    Rebuy(Chips),
}

impl JoinType {
    /// Option open to `user` at `now`, if any.
    ///
    /// Registered players may rebuy, eliminated players may re-enter and
    /// everybody else may register, on time or late. Every path also needs
    /// its window open and its allowance left.
    pub fn derive(
        data: &TournamentData,
        leaderboard: &Leaderboard,
        user: &Principal,
        now: Nanos,
    ) -> Option<Self> {
        let since = |window: Nanos| data.start_time.saturating_add(window);
        match (data.state, data.player(user), leaderboard.busts(user)) {
            (TournamentState::Registration, None, 0) => Some(Self::Join(data.buy_in))
                .filter(|_| now < data.start_time)
                .filter(|_| data.has_room()),
            (state, Some(player), _) if state.is_running() => data
                .tournament_type
                .rebuy()
                .filter(|r| player.chips <= r.min_chips_for_rebuy)
                .filter(|r| player.rebuys < r.max_rebuys)
                .filter(|r| now <= since(r.rebuy_window))
                .map(|r| Self::Rebuy(r.rebuy_price)),
            (state, None, 0) if state.is_running() => data
                .late_registration
                .filter(|window| now <= since(*window))
                .filter(|_| data.has_room())
                .map(|_| Self::Late(data.buy_in)),
            (state, None, busts) if state.is_running() => data
                .tournament_type
                .reentry()
                .filter(|r| busts - 1 < r.max_reentries)
                .filter(|r| now <= r.reentry_end)
                .map(|r| Self::Reentry(r.reentry_price)),
            _ => None,
        }
    }

    pub fn cost(&self) -> Chips {
        match self {
            Self::Join(c) | Self::Late(c) | Self::Reentry(c) | Self::Rebuy(c) => *c,
        }
    }

    /// Keeps the option current as snapshots arrive and windows close.
    pub fn drive(
        tournament: watch::Receiver<Option<TournamentData>>,
        leaderboard: watch::Receiver<Option<Leaderboard>>,
        user: Principal,
        clock: Arc<dyn Clock>,
    ) -> Ticker<Option<Self>> {
        Ticker::spawn(crate::JOIN_TICK, move || {
            let data = tournament.borrow();
            let standings = leaderboard.borrow();
            let empty = Leaderboard::default();
            data.as_ref().and_then(|data| {
                Self::derive(data, standings.as_ref().unwrap_or(&empty), &user, clock.now())
            })
        })
    }
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Join(c) => write!(f, "Join for {}", c),
            Self::Late(c) => write!(f, "Late register for {}", c),
            Self::Reentry(c) => write!(f, "Re-enter for {}", c),
            Self::Rebuy(c) => write!(f, "Rebuy for {}", c),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const START: Nanos = 1_000_000;
    pub const HOUR: Nanos = 3_600_000_000_000;

    pub fn options() -> BuyInOptions {
        BuyInOptions {
            freezeout: false,
            rebuy: RebuyOptions {
                enabled: true,
                rebuy_chips: 1_000,
                rebuy_price: 50,
                max_rebuys: 2,
                rebuy_window: HOUR,
                min_chips_for_rebuy: 500,
            },
            reentry: ReentryOptions {
                enabled: true,
                reentry_chips: 1_500,
                reentry_price: 80,
                max_reentries: 1,
                reentry_end: START + 2 * HOUR,
            },
        }
    }

    pub fn tournament(state: TournamentState) -> TournamentData {
        TournamentData {
            id: Principal::from("tournament-1"),
            name: String::from("Sunday"),
            state,
            tournament_type: TournamentType::BuyIn(options()),
            start_time: START,
            buy_in: 100,
            starting_chips: 1_500,
            late_registration: Some(HOUR / 2),
            max_players: 3,
            current_players: Default::default(),
        }
    }

    pub fn with(mut data: TournamentData, user: &str, chips: Chips, rebuys: u32) -> TournamentData {
        data.current_players.insert(
            Principal::from(user),
            TournamentPlayer {
                chips,
                rebuys,
                table: None,
            },
        );
        data
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::timer::ManualClock;

    fn me() -> Principal {
        Principal::from("me")
    }

    fn derive(data: &TournamentData, busts: usize, now: Nanos) -> Option<JoinType> {
        let leaderboard = Leaderboard(vec![me(); busts]);
        JoinType::derive(data, &leaderboard, &me(), now)
    }

    #[test]
    fn registration() {
        let data = tournament(TournamentState::Registration);
        assert_eq!(derive(&data, 0, 0), Some(JoinType::Join(100)));
        assert_eq!(derive(&data, 0, START), None);
        let full = ["a", "b", "c"]
            .into_iter()
            .fold(data.clone(), |d, who| with(d, who, 1_500, 0));
        assert_eq!(derive(&full, 0, 0), None);
        assert_eq!(derive(&with(data, "me", 1_500, 0), 0, 0), None);
    }

    #[test]
    fn late_registration() {
        let data = tournament(TournamentState::Running);
        assert_eq!(derive(&data, 0, START + HOUR / 4), Some(JoinType::Late(100)));
        assert_eq!(derive(&data, 0, START + HOUR), None);
        let closed = TournamentData {
            late_registration: None,
            ..data
        };
        assert_eq!(derive(&closed, 0, START), None);
    }

    #[test]
    fn rebuy() {
        let data = tournament(TournamentState::Running);
        let short = with(data.clone(), "me", 400, 0);
        assert_eq!(derive(&short, 0, START + 1), Some(JoinType::Rebuy(50)));
        assert_eq!(derive(&short, 0, START + 2 * HOUR), None);
        assert_eq!(derive(&with(data.clone(), "me", 900, 0), 0, START), None);
        assert_eq!(derive(&with(data.clone(), "me", 400, 2), 0, START), None);
        let freezeout = TournamentData {
            tournament_type: TournamentType::BuyIn(BuyInOptions {
                freezeout: true,
                ..options()
            }),
            ..short
        };
        assert_eq!(derive(&freezeout, 0, START), None);
    }

    #[test]
    fn reentry() {
        let data = tournament(TournamentState::Running);
        assert_eq!(derive(&data, 1, START + HOUR), Some(JoinType::Reentry(80)));
        assert_eq!(derive(&data, 2, START + HOUR), None);
        assert_eq!(derive(&data, 1, START + 3 * HOUR), None);
        let freeroll = TournamentData {
            tournament_type: TournamentType::Freeroll,
            ..data
        };
        assert_eq!(derive(&freeroll, 1, START), None);
    }

    #[test]
    fn finished_tournaments_take_nobody() {
        for state in [TournamentState::Completed, TournamentState::Cancelled] {
            assert_eq!(derive(&tournament(state), 0, 0), None);
            assert_eq!(derive(&tournament(state), 1, START), None);
        }
    }

    #[test]
    fn costs() {
        assert_eq!(JoinType::Join(100).cost(), 100);
        assert_eq!(JoinType::Reentry(80).cost(), 80);
        assert_eq!(JoinType::Late(7).to_string(), "Late register for 7");
    }

    #[tokio::test(start_paused = true)]
    async fn window_closes_while_watching() {
        let clock = ManualClock::at(START);
        let (_tournament, tournament_rx) =
            watch::channel(Some(tournament(TournamentState::Running)));
        let (_leaderboard, leaderboard_rx) = watch::channel(None);
        let option = JoinType::drive(tournament_rx, leaderboard_rx, me(), Arc::new(clock.clone()));
        assert_eq!(option.latest(), Some(JoinType::Late(100)));
        clock.advance(std::time::Duration::from_secs(3_600));
        tokio::time::sleep(crate::JOIN_TICK * 2).await;
        assert_eq!(option.latest(), None);
    }
}
