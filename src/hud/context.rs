use super::*;
use crate::Chips;
use crate::context::TableContext;
use crate::error::InputError;

/// What the local player may do right now.
///
/// Derived from one `TableContext`; nothing here is authoritative and the
/// canister has the final word on every submission. Choices are computed
/// whether or not it is the local turn, so the HUD can preview them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HudContext {
    seated: bool,
    turn: bool,
    current_bet: Chips,
    to_call: Chips,
    all_in: Chips,
    window: Option<(Chips, Chips)>,
    choices: Vec<Choice>,
    quick: Vec<QuickAction>,
}

impl HudContext {
    pub fn new(context: &TableContext) -> Self {
        let Some(data) = context.own_data() else {
            return Self::default();
        };
        let table = context.table();
        let stakes = Stakes {
            limit: Limit::new(table.config.game_type, table.deal_stage, table.pot),
            current_bet: context.current_bet(),
            last_raise: table.last_raise,
            big_blind: table.big_blind,
            pot: table.pot,
            committed: data.current_total_bet,
            balance: data.balance,
        };
        let to_call = stakes.current_bet.saturating_sub(stakes.committed);
        let all_in = stakes.all_in();
        let window = Self::window(&stakes);
        let raisable = match window {
            Some((lo, _)) if stakes.limit.is_fixed() => lo < all_in,
            Some((lo, hi)) => lo < hi,
            None => false,
        };
        let choices = std::iter::empty::<Choice>()
            .chain(Some(Choice::Fold).filter(|_| !data.player_action.is_folded()))
            .chain(match to_call {
                0 => Some(Choice::Check),
                _ if stakes.balance == 0 => None,
                n => Some(Choice::Call(n.min(stakes.balance))),
            })
            .chain(window.filter(|_| raisable).map(|(lo, _)| Choice::Raise(lo)))
            .chain(Some(Choice::AllIn(all_in)).filter(|_| stakes.balance > 0))
            .collect::<Vec<Choice>>();
        let hud = Self {
            seated: true,
            turn: context.is_my_turn(),
            current_bet: stakes.current_bet,
            to_call,
            all_in,
            window: window.filter(|_| raisable),
            choices,
            quick: QuickAction::presets(&stakes),
        };
        log::debug!("[hud] {} to call {} window {:?}", stakes.limit, to_call, hud.window);
        hud
    }

    /// Raise-to totals between the limit's floor and the lesser of its
    /// ceiling and the all-in target.
    fn window(stakes: &Stakes) -> Option<(Chips, Chips)> {
        let lo = stakes.floor();
        let hi = stakes
            .limit
            .ceiling(stakes.current_bet)
            .map_or(stakes.all_in(), |cap| cap.min(stakes.all_in()));
        Some((lo, hi)).filter(|_| lo <= hi)
    }

    pub fn is_seated(&self) -> bool {
        self.seated
    }
    pub fn is_turn(&self) -> bool {
        self.turn
    }
    /// Highest contribution this round, the bet an all-in has to top to
    /// count as a raise.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn to_call(&self) -> Chips {
        self.to_call
    }
    pub fn all_in(&self) -> Chips {
        self.all_in
    }
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }
    pub fn quick(&self) -> &[QuickAction] {
        &self.quick
    }
    pub fn min_raise(&self) -> Option<Chips> {
        self.window.map(|(lo, _)| lo)
    }
    pub fn max_raise(&self) -> Option<Chips> {
        self.window.map(|(_, hi)| hi)
    }

    /// Checks a choice before it is sent, so obvious mistakes are reported
    /// next to the input instead of round-tripping to the canister.
    pub fn validate(&self, choice: &Choice) -> Result<(), InputError> {
        if !self.seated {
            return Err(InputError::NotSeated);
        }
        if !self.turn {
            return Err(InputError::NotYourTurn);
        }
        match (choice, self.window) {
            (Choice::Raise(total), _) if *total == self.all_in && self.all_in > 0 => {
                self.offered(&Choice::AllIn(*total))
            }
            (Choice::Raise(total), Some((lo, _))) if *total < lo => {
                Err(InputError::RaiseTooSmall(lo))
            }
            (Choice::Raise(total), Some((_, hi))) if *total > hi => {
                Err(InputError::RaiseTooLarge(hi))
            }
            (Choice::Raise(_), Some(_)) => Ok(()),
            (choice, _) => self.offered(choice),
        }
    }

    fn offered(&self, choice: &Choice) -> Result<(), InputError> {
        match self.choices.contains(choice) {
            true => Ok(()),
            false => Err(InputError::Unavailable(choice.to_string())),
        }
    }
}
