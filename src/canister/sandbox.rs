use super::*;
use crate::Chips;
use crate::Nanos;
use crate::Position;
use crate::cards::Card;
use crate::cards::Deck;
use crate::chat::ChatMessage;
use crate::error::TableError;
use crate::table::*;
use crate::timer::Clock;
use crate::timer::SystemClock;
use crate::tournament::*;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// Injected failures shared by both sandboxes.
#[derive(Debug, Default)]
struct Faults {
    queue: VecDeque<TableError>,
    gone: bool,
    calls: usize,
}

impl Faults {
    fn enter(&mut self, missing: TableError) -> Result<(), TableError> {
        self.calls += 1;
        if self.gone {
            return Err(missing);
        }
        match self.queue.pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory table canister.
///
/// Deals, posts blinds and moves the action around so views and demos have
/// something live to look at. Showdowns go to the highest hole card: this
/// is a fixture, not a rules engine. Blinds are dealt straight into the
/// flop, so a fresh hand is immediately ongoing.
pub struct Sandbox {
    state: Mutex<Dealer>,
    clock: Arc<dyn Clock>,
}

impl Sandbox {
    pub fn new(table: PublicTable) -> Self {
        Self::with_clock(table, Arc::new(SystemClock))
    }
    pub fn with_clock(table: PublicTable, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(Dealer {
                table,
                deck: Deck::new(),
                chat: Vec::new(),
                faults: Faults::default(),
            }),
            clock,
        }
    }

    /// Next remote call fails with `error`. Calls queue up in order.
    pub fn fail_next(&self, error: TableError) {
        lock(&self.state).faults.queue.push_back(error);
    }
    /// Every later call answers `TableNotFound`, as if the table was closed.
    pub fn vanish(&self) {
        lock(&self.state).faults.gone = true;
    }
    /// Remote calls received so far, failed ones included.
    pub fn calls(&self) -> usize {
        lock(&self.state).faults.calls
    }
    pub fn snapshot(&self) -> PublicTable {
        lock(&self.state).table.clone()
    }

    /// Takes the first empty chair. Joining mid-hand waits for the next deal.
    pub fn seat(&self, user: &Principal, balance: Chips) -> Result<Position, TableError> {
        let mut dealer = lock(&self.state);
        let ongoing = dealer.is_ongoing();
        let table = &mut dealer.table;
        if table.users.contains_key(user) {
            return Err(TableError::UserAlreadyInGame);
        }
        let position = table
            .seats
            .iter()
            .position(SeatStatus::is_empty)
            .ok_or(TableError::TableFull)?;
        table.seats[position] = match ongoing {
            true => SeatStatus::QueuedForNextRound(user.clone()),
            false => SeatStatus::Occupied(user.clone()),
        };
        table.users.insert(
            user.clone(),
            UserTableData {
                balance,
                player_action: match ongoing {
                    true => PlayerAction::Joining,
                    false => PlayerAction::None,
                },
                ..UserTableData::default()
            },
        );
        dealer.record(Some(user), ActionType::Join, self.clock.now());
        log::debug!("[sandbox] {} sits at {}", user.short(), position);
        Ok(position)
    }

    /// Starts the next hand.
    pub fn deal(&self) -> Result<(), TableError> {
        lock(&self.state).commence(self.clock.now())
    }
}

/// Mutable state behind the sandbox lock.
struct Dealer {
    table: PublicTable,
    deck: Deck,
    chat: Vec<ChatMessage>,
    faults: Faults,
}

impl Dealer {
    fn is_ongoing(&self) -> bool {
        crate::context::ongoing(&self.table)
    }
    fn record(&mut self, user: Option<&Principal>, action: ActionType, now: Nanos) {
        self.table.action_logs.push(ActionLog {
            user: user.cloned(),
            action,
            timestamp: now,
        });
    }
    fn data(&self, user: &Principal) -> Result<&UserTableData, TableError> {
        self.table.users.get(user).ok_or(TableError::UserNotFound)
    }
    fn data_mut(&mut self, user: &Principal) -> Result<&mut UserTableData, TableError> {
        self.table.users.get_mut(user).ok_or(TableError::UserNotFound)
    }
    fn occupant(&self, position: Position) -> Option<&Principal> {
        self.table.seats.get(position).and_then(SeatStatus::occupant)
    }
    fn seated(&self, position: Position) -> Option<&UserTableData> {
        self.occupant(position).and_then(|p| self.table.data(p))
    }
    /// Seats still contesting the pot.
    fn contenders(&self) -> Vec<Position> {
        (0..self.table.seats.len())
            .filter(|i| self.table.seats[*i].is_playing())
            .filter(|i| self.seated(*i).is_some_and(|d| d.player_action.is_live()))
            .collect()
    }
    /// Contenders who can still put chips in.
    fn bettors(&self) -> Vec<Position> {
        self.contenders()
            .into_iter()
            .filter(|i| {
                self.seated(*i)
                    .is_some_and(|d| d.balance > 0 && d.player_action != PlayerAction::AllIn)
            })
            .collect()
    }
    /// Live inside the current hand, so changes must wait for the next one.
    fn is_in_hand(&self, user: &Principal) -> bool {
        self.is_ongoing()
            && self.table.position(user).is_some_and(|i| self.contenders().contains(&i))
    }
    fn is_everyone_folding(&self) -> bool {
        self.contenders().len() <= 1
    }
    /// Bettors who still owe an action this round.
    fn waiting(&self) -> Vec<Position> {
        let highest = self.table.highest_bet;
        let bettors = self.bettors();
        let alone = bettors.len() < 2;
        bettors
            .into_iter()
            .filter(|i| {
                self.seated(*i).is_some_and(|d| {
                    d.current_total_bet < highest
                        || (!alone && d.player_action == PlayerAction::None)
                })
            })
            .collect()
    }

    fn enter(&mut self) -> Result<(), TableError> {
        self.faults.enter(TableError::TableNotFound)
    }
    fn acting(&self, user: &Principal) -> Result<(), TableError> {
        if !self.is_ongoing() {
            return Err(TableError::InvalidRequest(String::from("no hand in progress")));
        }
        match self.table.actor() == Some(user) {
            true => Ok(()),
            false => Err(TableError::NotYourTurn),
        }
    }

    fn commence(&mut self, now: Nanos) -> Result<(), TableError> {
        if self.is_ongoing() {
            return Err(TableError::InvalidRequest(String::from("hand in progress")));
        }
        for item in std::mem::take(&mut self.table.queue) {
            self.apply(item);
        }
        self.seat_queued();
        let players = (0..self.table.seats.len())
            .filter(|i| self.table.seats[*i].is_playing())
            .filter(|i| {
                self.seated(*i).is_some_and(|d| {
                    d.balance > 0 && d.player_action != PlayerAction::SittingOut
                })
            })
            .collect::<Vec<Position>>();
        if players.len() < 2 {
            return Err(TableError::InvalidRequest(String::from(
                "need two players with chips",
            )));
        }
        self.wipe_board();
        self.deal_cards(&players);
        self.move_button(&players);
        self.table.deal_stage = DealStage::Opening;
        self.record(None, ActionType::Stage(DealStage::Opening), now);
        let sb = self.after(self.table.dealer_position, &players);
        let bb = self.after(sb, &players);
        let small = self.commit(sb, self.table.small_blind);
        let user = self.occupant(sb).cloned();
        self.record(user.as_ref(), ActionType::SmallBlind(small), now);
        let big = self.commit(bb, self.table.big_blind);
        let user = self.occupant(bb).cloned();
        self.record(user.as_ref(), ActionType::BigBlind(big), now);
        self.table.highest_bet = small.max(big);
        self.table.last_raise = self.table.big_blind;
        self.reveal(3, DealStage::Flop, now);
        self.table.current_player_index = bb;
        self.next_player(now);
        log::debug!("[sandbox] dealt hand with {} players", players.len());
        Ok(())
    }
    fn apply(&mut self, item: QueueItem) {
        match item {
            QueueItem::Deposit { user, amount } => {
                if let Ok(data) = self.data_mut(&user) {
                    data.balance += amount;
                }
            }
            QueueItem::SittingOut(user) => {
                if let Ok(data) = self.data_mut(&user) {
                    data.player_action = PlayerAction::SittingOut;
                }
            }
            QueueItem::SittingIn(user) | QueueItem::Join(user) => {
                if let Ok(data) = self.data_mut(&user) {
                    data.player_action = PlayerAction::None;
                }
            }
            QueueItem::Leave(user) => {
                self.table.users.remove(&user);
                if let Some(i) = self.table.position(&user) {
                    self.table.seats[i] = SeatStatus::Empty;
                }
            }
            QueueItem::UpdateBlinds { small, big } => {
                self.table.small_blind = small;
                self.table.big_blind = big;
            }
            QueueItem::PauseTable => log::debug!("[sandbox] pause requested"),
        }
    }
    fn seat_queued(&mut self) {
        for seat in self.table.seats.iter_mut() {
            if let SeatStatus::QueuedForNextRound(user) = seat {
                *seat = SeatStatus::Occupied(user.clone());
            }
        }
    }
    fn wipe_board(&mut self) {
        self.deck = Deck::new();
        self.table.community_cards.clear();
        self.table.side_pots.clear();
        self.table.winners = None;
        self.table.pot = 0;
        self.table.highest_bet = 0;
        self.table.last_raise = 0;
    }
    fn deal_cards(&mut self, players: &[Position]) {
        let dealt = players
            .iter()
            .filter_map(|i| self.occupant(*i).cloned())
            .collect::<Vec<Principal>>();
        for (user, data) in self.table.users.iter_mut() {
            data.current_total_bet = 0;
            data.total_bet = 0;
            match dealt.contains(user) {
                true => {
                    data.player_action = PlayerAction::None;
                    data.cards = self.deck.hole();
                }
                false => {
                    data.player_action = PlayerAction::SittingOut;
                    data.cards.clear();
                }
            }
        }
    }
    fn move_button(&mut self, players: &[Position]) {
        self.table.dealer_position = self.after(self.table.dealer_position, players);
    }
    /// Next position in `among` clockwise from `from`.
    fn after(&self, from: Position, among: &[Position]) -> Position {
        let n = self.table.seats.len().max(1);
        (1..=n)
            .map(|k| (from + k) % n)
            .find(|i| among.contains(i))
            .unwrap_or(from)
    }
    fn reveal(&mut self, n: usize, stage: DealStage, now: Nanos) {
        let cards = (0..n).filter_map(|_| self.deck.next()).collect::<Vec<Card>>();
        self.table.community_cards.extend(cards);
        self.table.deal_stage = stage;
        self.record(None, ActionType::Stage(stage), now);
    }

    /// Moves up to `amount` from a seat's balance into the pot.
    fn commit(&mut self, position: Position, amount: Chips) -> Chips {
        let Some(user) = self.occupant(position).cloned() else {
            return 0;
        };
        let Ok(data) = self.data_mut(&user) else {
            return 0;
        };
        let paid = amount.min(data.balance);
        data.balance -= paid;
        data.current_total_bet += paid;
        data.total_bet += paid;
        if data.balance == 0 {
            data.player_action = PlayerAction::AllIn;
        }
        self.table.pot += paid;
        paid
    }

    fn bet(&mut self, user: &Principal, bet: BetType, now: Nanos) -> Result<(), TableError> {
        self.acting(user)?;
        let position = self.table.current_player_index;
        let highest = self.table.highest_bet;
        let big_blind = self.table.big_blind;
        let data = self.data(user)?.clone();
        match bet {
            BetType::SmallBlind | BetType::BigBlind => Err(TableError::InvalidBet(String::from(
                "blinds are posted by the table",
            ))),
            BetType::Called => {
                let owed = highest.saturating_sub(data.current_total_bet);
                if owed == 0 {
                    return Err(TableError::InvalidBet(String::from("nothing to call")));
                }
                self.commit(position, owed);
                let data = self.data_mut(user)?;
                if data.player_action != PlayerAction::AllIn {
                    data.player_action = PlayerAction::Called;
                }
                self.record(Some(user), ActionType::Call, now);
                self.next_player(now);
                Ok(())
            }
            BetType::Raised(total) => {
                let delta = total.saturating_sub(data.current_total_bet);
                let minimum = highest.max(big_blind) + self.table.last_raise.max(big_blind);
                if total <= highest {
                    return Err(TableError::InvalidBet(format!(
                        "raise to {} does not exceed {}",
                        total, highest
                    )));
                }
                if delta > data.balance {
                    return Err(TableError::InsufficientFunds);
                }
                let shove = delta == data.balance;
                if total < minimum && !shove {
                    return Err(TableError::InvalidBet(format!(
                        "raise must be at least {}",
                        minimum
                    )));
                }
                self.commit(position, delta);
                if total >= minimum {
                    self.table.last_raise = total - highest;
                }
                self.table.highest_bet = total;
                self.reopen(user);
                let data = self.data_mut(user)?;
                if !shove {
                    data.player_action = PlayerAction::Raised(total);
                }
                let action = match shove {
                    true => ActionType::AllIn(total),
                    false => ActionType::Raise(total),
                };
                self.record(Some(user), action, now);
                self.next_player(now);
                Ok(())
            }
        }
    }
    /// Everyone else who can still bet has to act again.
    fn reopen(&mut self, raiser: &Principal) {
        for (user, data) in self.table.users.iter_mut() {
            if user != raiser
                && data.player_action.is_live()
                && data.player_action != PlayerAction::AllIn
            {
                data.player_action = PlayerAction::None;
            }
        }
    }
    fn check(&mut self, user: &Principal, now: Nanos) -> Result<(), TableError> {
        self.acting(user)?;
        let highest = self.table.highest_bet;
        let data = self.data_mut(user)?;
        if data.current_total_bet < highest {
            return Err(TableError::InvalidBet(String::from(
                "cannot check facing a bet",
            )));
        }
        data.player_action = PlayerAction::Checked;
        self.record(Some(user), ActionType::Check, now);
        self.next_player(now);
        Ok(())
    }
    fn fold(&mut self, user: &Principal, now: Nanos) -> Result<(), TableError> {
        self.acting(user)?;
        self.data_mut(user)?.player_action = PlayerAction::Folded;
        self.record(Some(user), ActionType::Fold, now);
        self.next_player(now);
        Ok(())
    }

    fn next_player(&mut self, now: Nanos) {
        if self.is_everyone_folding() {
            return self.conclude(now);
        }
        let waiting = self.waiting();
        match waiting.is_empty() {
            true => self.next_street(now),
            false => {
                self.table.current_player_index =
                    self.after(self.table.current_player_index, &waiting);
                self.table.last_timer_started_timestamp = Some(now);
            }
        }
    }
    fn next_street(&mut self, now: Nanos) {
        for data in self.table.users.values_mut() {
            data.current_total_bet = 0;
            if matches!(
                data.player_action,
                PlayerAction::Checked | PlayerAction::Called | PlayerAction::Raised(_)
            ) {
                data.player_action = PlayerAction::None;
            }
        }
        self.table.highest_bet = 0;
        self.table.last_raise = 0;
        match self.table.deal_stage {
            DealStage::Fresh | DealStage::Opening => self.reveal(3, DealStage::Flop, now),
            DealStage::Flop => self.reveal(1, DealStage::Turn, now),
            DealStage::Turn => self.reveal(1, DealStage::River, now),
            DealStage::River | DealStage::Showdown => return self.conclude(now),
        }
        self.table.current_player_index = self.table.dealer_position;
        self.next_player(now);
    }
    /// Splits the pot between the best remaining hole cards.
    fn conclude(&mut self, now: Nanos) {
        let strength = |d: &UserTableData| d.cards.iter().map(Card::rank).max();
        let contenders = self
            .contenders()
            .into_iter()
            .filter_map(|i| self.occupant(i).cloned())
            .collect::<Vec<Principal>>();
        let best = contenders
            .iter()
            .filter_map(|p| self.table.data(p))
            .map(strength)
            .max()
            .flatten();
        let winners = contenders
            .into_iter()
            .filter(|p| self.table.data(p).and_then(strength) == best)
            .collect::<Vec<Principal>>();
        let share = self.table.pot / (winners.len().max(1) as Chips);
        let mut remainder = self.table.pot - share * winners.len() as Chips;
        for winner in winners.iter() {
            let prize = share + std::mem::take(&mut remainder);
            if let Ok(data) = self.data_mut(winner) {
                data.balance += prize;
            }
            self.record(Some(winner), ActionType::Win(prize), now);
        }
        self.table.pot = 0;
        self.table.deal_stage = DealStage::Showdown;
        self.table.last_timer_started_timestamp = None;
        log::debug!("[sandbox] hand won by {:?}", winners);
        self.table.winners = Some(winners);
    }
}

#[async_trait::async_trait]
impl TableActor for Sandbox {
    async fn get_table(&self) -> Result<PublicTable, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        Ok(dealer.table.clone())
    }
    async fn place_bet(&self, user: &Principal, bet: BetType) -> Result<PublicTable, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        dealer.bet(user, bet, self.clock.now())?;
        Ok(dealer.table.clone())
    }
    async fn check(&self, user: &Principal) -> Result<PublicTable, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        dealer.check(user, self.clock.now())?;
        Ok(dealer.table.clone())
    }
    async fn fold(&self, user: &Principal) -> Result<PublicTable, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        dealer.fold(user, self.clock.now())?;
        Ok(dealer.table.clone())
    }
    async fn deposit_to_table(&self, user: &Principal, amount: Chips) -> Result<(), TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        if amount == 0 {
            return Err(TableError::InvalidRequest(String::from("empty deposit")));
        }
        dealer.data(user)?;
        match dealer.is_in_hand(user) {
            true => dealer.table.queue.push(QueueItem::Deposit {
                user: user.clone(),
                amount,
            }),
            false => dealer.data_mut(user)?.balance += amount,
        }
        Ok(())
    }
    async fn withdraw_from_table(&self, user: &Principal, amount: Chips) -> Result<(), TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        if amount == 0 {
            return Err(TableError::InvalidRequest(String::from("empty withdrawal")));
        }
        if dealer.is_in_hand(user) {
            return Err(TableError::InvalidRequest(String::from("hand in progress")));
        }
        let data = dealer.data_mut(user)?;
        if amount > data.balance {
            return Err(TableError::InsufficientFunds);
        }
        data.balance -= amount;
        Ok(())
    }
    async fn player_sitting_out(&self, user: &Principal) -> Result<(), TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        dealer.data(user)?;
        match dealer.is_in_hand(user) {
            true => dealer.table.queue.push(QueueItem::SittingOut(user.clone())),
            false => dealer.data_mut(user)?.player_action = PlayerAction::SittingOut,
        }
        Ok(())
    }
    async fn player_sitting_in(&self, user: &Principal) -> Result<(), TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        if dealer.data(user)?.player_action != PlayerAction::SittingOut {
            return Err(TableError::InvalidRequest(String::from("not sitting out")));
        }
        match dealer.is_ongoing() {
            true => dealer.table.queue.push(QueueItem::SittingIn(user.clone())),
            false => dealer.data_mut(user)?.player_action = PlayerAction::None,
        }
        Ok(())
    }
    async fn send_chat_message(&self, user: &Principal, message: String) -> Result<(), TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        dealer.data(user)?;
        let last = dealer.chat.last().map(|m| m.timestamp + 1).unwrap_or(0);
        let id = dealer.chat.len() as u64;
        dealer.chat.push(ChatMessage {
            id,
            user: user.clone(),
            message,
            timestamp: self.clock.now().max(last),
        });
        Ok(())
    }
    async fn get_recent_chat_messages(
        &self,
        since: Option<Nanos>,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        let recent = dealer
            .chat
            .iter()
            .filter(|m| since.is_none_or(|t| m.timestamp >= t))
            .cloned()
            .collect::<Vec<ChatMessage>>();
        let skip = recent.len().saturating_sub(limit);
        Ok(recent.into_iter().skip(skip).collect())
    }
    async fn rank_cards(&self, cards: Vec<Card>) -> Result<String, TableError> {
        let mut dealer = lock(&self.state);
        dealer.enter()?;
        cards
            .iter()
            .map(Card::rank)
            .max()
            .map(|rank| format!("{} high", rank))
            .ok_or_else(|| TableError::InvalidRequest(String::from("no cards")))
    }
}

/// In-memory tournament canister.
pub struct SandboxTournament {
    state: Mutex<Registry>,
    clock: Arc<dyn Clock>,
}

struct Registry {
    data: TournamentData,
    leaderboard: Leaderboard,
    prize_pool: Chips,
    faults: Faults,
}

impl SandboxTournament {
    pub fn new(data: TournamentData) -> Self {
        Self::with_clock(data, Arc::new(SystemClock))
    }
    pub fn with_clock(data: TournamentData, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(Registry {
                data,
                leaderboard: Leaderboard::default(),
                prize_pool: 0,
                faults: Faults::default(),
            }),
            clock,
        }
    }
    pub fn fail_next(&self, error: TableError) {
        lock(&self.state).faults.queue.push_back(error);
    }
    pub fn vanish(&self) {
        lock(&self.state).faults.gone = true;
    }
    pub fn calls(&self) -> usize {
        lock(&self.state).faults.calls
    }
    pub fn start(&self) {
        lock(&self.state).data.state = TournamentState::Running;
    }
    /// Busts a player onto the leaderboard.
    pub fn eliminate(&self, user: &Principal) {
        let mut registry = lock(&self.state);
        if registry.data.current_players.remove(user).is_some() {
            registry.leaderboard.0.push(user.clone());
        }
    }
    pub fn set_chips(&self, user: &Principal, chips: Chips) {
        if let Some(player) = lock(&self.state).data.current_players.get_mut(user) {
            player.chips = chips;
        }
    }
}

impl Registry {
    fn enter(&mut self) -> Result<(), TableError> {
        self.faults.enter(TableError::TournamentNotFound)
    }
    fn closed(what: &str) -> TableError {
        TableError::InvalidRequest(format!("{} is closed", what))
    }
}

#[async_trait::async_trait]
impl TournamentActor for SandboxTournament {
    async fn get_tournament(&self) -> Result<TournamentData, TableError> {
        let mut registry = lock(&self.state);
        registry.enter()?;
        Ok(registry.data.clone())
    }
    async fn get_leaderboard(&self) -> Result<Leaderboard, TableError> {
        let mut registry = lock(&self.state);
        registry.enter()?;
        Ok(registry.leaderboard.clone())
    }
    async fn get_total_prize_pool(&self) -> Result<Chips, TableError> {
        let mut registry = lock(&self.state);
        registry.enter()?;
        Ok(registry.prize_pool)
    }
    async fn user_join_tournament(&self, user: &Principal) -> Result<(), TableError> {
        let now = self.clock.now();
        let mut registry = lock(&self.state);
        registry.enter()?;
        let data = &registry.data;
        if data.player(user).is_some() {
            return Err(TableError::UserAlreadyInGame);
        }
        if registry.leaderboard.contains(user) {
            return Err(Registry::closed("registration"));
        }
        if !data.has_room() {
            return Err(TableError::TableFull);
        }
        let late = data
            .late_registration
            .is_some_and(|window| now <= data.start_time.saturating_add(window));
        let open = match data.state {
            TournamentState::Registration => true,
            state => state.is_running() && late,
        };
        if !open {
            return Err(Registry::closed("registration"));
        }
        let player = TournamentPlayer {
            chips: data.starting_chips,
            ..TournamentPlayer::default()
        };
        let buy_in = data.buy_in;
        registry.prize_pool += buy_in;
        registry.data.current_players.insert(user.clone(), player);
        Ok(())
    }
    async fn user_rebuy_into_tournament(&self, user: &Principal) -> Result<(), TableError> {
        let now = self.clock.now();
        let mut registry = lock(&self.state);
        registry.enter()?;
        let data = &registry.data;
        let rebuy = data
            .tournament_type
            .rebuy()
            .cloned()
            .ok_or_else(|| Registry::closed("rebuy"))?;
        let player = data.player(user).ok_or(TableError::UserNotFound)?;
        if player.rebuys >= rebuy.max_rebuys
            || player.chips > rebuy.min_chips_for_rebuy
            || now > data.start_time.saturating_add(rebuy.rebuy_window)
        {
            return Err(Registry::closed("rebuy"));
        }
        registry.prize_pool += rebuy.rebuy_price;
        if let Some(player) = registry.data.current_players.get_mut(user) {
            player.chips += rebuy.rebuy_chips;
            player.rebuys += 1;
        }
        Ok(())
    }
    async fn user_reentry_into_tournament(&self, user: &Principal) -> Result<(), TableError> {
        let now = self.clock.now();
        let mut registry = lock(&self.state);
        registry.enter()?;
        let reentry = registry
            .data
            .tournament_type
            .reentry()
            .cloned()
            .ok_or_else(|| Registry::closed("reentry"))?;
        if registry.data.player(user).is_some() {
            return Err(TableError::UserAlreadyInGame);
        }
        let busts = registry.leaderboard.busts(user);
        if busts == 0 {
            return Err(TableError::UserNotFound);
        }
        if busts - 1 >= reentry.max_reentries || now > reentry.reentry_end {
            return Err(Registry::closed("reentry"));
        }
        let player = TournamentPlayer {
            chips: reentry.reentry_chips,
            ..TournamentPlayer::default()
        };
        registry.prize_pool += reentry.reentry_price;
        registry.data.current_players.insert(user.clone(), player);
        Ok(())
    }
    async fn user_refill_chips(&self, user: &Principal) -> Result<(), TableError> {
        let mut registry = lock(&self.state);
        registry.enter()?;
        let starting = registry.data.starting_chips;
        let player = registry
            .data
            .current_players
            .get_mut(user)
            .ok_or(TableError::UserNotFound)?;
        player.chips = player.chips.max(starting);
        Ok(())
    }
    async fn deposit_prize_pool(&self, _: &Principal, amount: Chips) -> Result<(), TableError> {
        let mut registry = lock(&self.state);
        registry.enter()?;
        if amount == 0 {
            return Err(TableError::InvalidRequest(String::from("empty deposit")));
        }
        registry.prize_pool += amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn principal(name: &str) -> Principal {
        Principal::from(name)
    }

    fn heads_up() -> Sandbox {
        let table = PublicTable {
            config: TableConfig {
                game_type: GameType::NoLimit(1),
                ..TableConfig::default()
            },
            seats: vec![SeatStatus::Empty; 6],
            small_blind: 1,
            big_blind: 2,
            ..PublicTable::default()
        };
        let sandbox = Sandbox::with_clock(table, Arc::new(ManualClock::at(1_000)));
        sandbox.seat(&principal("alice"), 100).unwrap();
        sandbox.seat(&principal("bob"), 100).unwrap();
        sandbox
    }

    #[tokio::test]
    async fn deals_into_an_ongoing_flop() {
        let sandbox = heads_up();
        sandbox.deal().unwrap();
        let table = sandbox.get_table().await.unwrap();
        assert_eq!(table.deal_stage, DealStage::Flop);
        assert_eq!(table.community_cards.len(), 3);
        assert_eq!(table.pot, 3);
        assert_eq!(table.highest_bet, 2);
        assert_eq!(table.last_timer_started_timestamp, Some(1_000));
        assert!(crate::context::ongoing(&table));
        assert!(table.users.values().all(|d| d.cards.len() == 2));
    }

    #[tokio::test]
    async fn fold_ends_heads_up_hand() {
        let sandbox = heads_up();
        sandbox.deal().unwrap();
        let table = sandbox.snapshot();
        let actor = table.actor().cloned().unwrap();
        let table = sandbox.fold(&actor).await.unwrap();
        assert!(table.has_winner());
        assert_eq!(table.pot, 0);
        let total = table.users.values().map(|d| d.balance).sum::<Chips>();
        assert_eq!(total, 200);
    }

    #[tokio::test]
    async fn rejects_out_of_turn() {
        let sandbox = heads_up();
        sandbox.deal().unwrap();
        let table = sandbox.snapshot();
        let idle = table
            .users
            .keys()
            .find(|p| Some(*p) != table.actor())
            .cloned()
            .unwrap();
        assert_eq!(sandbox.check(&idle).await, Err(TableError::NotYourTurn));
    }

    #[tokio::test]
    async fn calls_through_to_the_turn() {
        let sandbox = heads_up();
        sandbox.deal().unwrap();
        let first = sandbox.snapshot().actor().cloned().unwrap();
        sandbox.place_bet(&first, BetType::Called).await.unwrap();
        let second = sandbox.snapshot().actor().cloned().unwrap();
        assert_ne!(first, second);
        let table = sandbox.check(&second).await.unwrap();
        assert_eq!(table.deal_stage, DealStage::Turn);
        assert_eq!(table.community_cards.len(), 4);
        assert!(table.users.values().all(|d| d.current_total_bet == 0));
        assert_eq!(table.pot, 4);
    }

    #[tokio::test]
    async fn deposits_wait_for_the_next_hand() {
        let sandbox = heads_up();
        sandbox.deal().unwrap();
        sandbox.deposit_to_table(&principal("alice"), 50).await.unwrap();
        let table = sandbox.snapshot();
        assert_eq!(table.queue.len(), 1);
        assert_eq!(
            sandbox.withdraw_from_table(&principal("alice"), 10).await,
            Err(TableError::InvalidRequest(String::from("hand in progress")))
        );
    }

    #[tokio::test]
    async fn injected_failures_come_first() {
        let sandbox = heads_up();
        sandbox.fail_next(TableError::CanisterCallFailed(String::from("timeout")));
        assert!(sandbox.get_table().await.is_err());
        assert!(sandbox.get_table().await.is_ok());
        sandbox.vanish();
        assert_eq!(sandbox.get_table().await, Err(TableError::TableNotFound));
        assert_eq!(sandbox.calls(), 3);
    }
}
