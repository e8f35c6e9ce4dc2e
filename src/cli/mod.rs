//! Terminal rendering and prompts for the table demo.
use crate::Chips;
use crate::Progress;
use crate::cards::Card;
use crate::context::SeatMetaData;
use crate::context::TableContext;
use crate::error::Capability;
use crate::error::ClientError;
use crate::hud::*;
use crate::table::PlayerAction;
use colored::Colorize;
use dialoguer::Input;
use dialoguer::Select;
use std::io::IsTerminal;

pub fn card(card: &Card) -> String {
    match card.suit().is_red() {
        true => card.to_string().red().to_string(),
        false => card.to_string().bright_white().to_string(),
    }
}

fn cards(cards: &[Card]) -> String {
    cards.iter().map(card).collect::<Vec<String>>().join(" ")
}

/// Twenty-cell bar, filled as the turn runs out.
pub fn timer(progress: Option<Progress>) -> String {
    match progress {
        None => String::new(),
        Some(p) => {
            let filled = (p * 20.0).round() as usize;
            let bar = format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled.min(20)));
            match p {
                p if p >= 0.75 => bar.red().to_string(),
                p if p >= 0.5 => bar.yellow().to_string(),
                _ => bar.green().to_string(),
            }
        }
    }
}

pub fn seat(meta: &SeatMetaData, acting: bool, local: bool) -> String {
    let marker = match acting {
        true => ">".bright_green().to_string(),
        false => String::from(" "),
    };
    let name = match local {
        true => meta.label().bold().to_string(),
        false => meta.label(),
    };
    let Some(data) = meta.data.as_ref() else {
        return format!("{} {}", marker, name.dimmed());
    };
    let action = match data.player_action {
        PlayerAction::Folded => "F".red().to_string(),
        PlayerAction::AllIn => "A".bright_red().to_string(),
        PlayerAction::SittingOut => "S".dimmed().to_string(),
        PlayerAction::Raised(_) => "R".yellow().to_string(),
        PlayerAction::Called => "C".cyan().to_string(),
        PlayerAction::Checked => "X".cyan().to_string(),
        PlayerAction::None | PlayerAction::Joining => String::from(" "),
    };
    let hole = match local {
        true => cards(&data.cards),
        false => String::from("?? ??"),
    };
    format!(
        "{} {} {:<16} {:>7} {:>6}  {}",
        marker, action, name, data.balance, data.current_total_bet, hole
    )
}

/// Full table as a block of text, seats first.
pub fn table(context: &TableContext, progress: Option<Progress>) -> String {
    let snapshot = context.table();
    let acting = context.is_ongoing().then_some(snapshot.current_player_index);
    let header = format!(
        "{} {} {} pot {}",
        snapshot.config.name.bold(),
        snapshot.config.game_type,
        snapshot.deal_stage,
        snapshot.pot
    );
    let seats = context
        .seats()
        .iter()
        .enumerate()
        .map(|(i, meta)| seat(meta, acting == Some(i), context.own_position() == Some(i)))
        .collect::<Vec<String>>()
        .join("\n");
    let winners = snapshot
        .winners
        .iter()
        .flatten()
        .map(|w| w.short())
        .collect::<Vec<String>>();
    let footer = match winners.is_empty() {
        true => format!("{} {}", cards(&snapshot.community_cards), timer(progress)),
        false => format!("{} {}", "won by".bright_green(), winners.join(", ")),
    };
    format!("{}\n{}\n{}", header, seats, footer)
}

/// Interactive action picker. Switches itself off when stdin is not a
/// terminal, in which case the caller plays automatically.
#[derive(Debug, Clone, Copy)]
pub struct Prompt(Capability);

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        let terminal = match std::io::stdin().is_terminal() {
            true => Ok(()),
            false => Err(ClientError::Environment(String::from("stdin is not a terminal"))),
        };
        Self(Capability::probe("prompt", terminal).0)
    }
    pub fn is_interactive(&self) -> bool {
        self.0.is_enabled()
    }

    pub fn choose(&self, hud: &HudContext) -> Result<Choice, ClientError> {
        let mut options = hud
            .choices()
            .iter()
            .map(|c| match c {
                Choice::Raise(_) => (String::from("raise ..."), None),
                c => (c.to_string(), Some(*c)),
            })
            .collect::<Vec<(String, Option<Choice>)>>();
        options.extend(
            hud.quick()
                .iter()
                .filter(|q| q.preset != Preset::AllIn)
                .map(|q| (format!("{} ({})", q.preset, q.amount), Some(Choice::Raise(q.amount)))),
        );
        let labels = options.iter().map(|(l, _)| l.as_str()).collect::<Vec<&str>>();
        let selection = Select::new()
            .with_prompt(format!("to call {}", hud.to_call()))
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| ClientError::Environment(e.to_string()))?;
        match options.get(selection).and_then(|(_, c)| *c) {
            Some(choice) => Ok(choice),
            None => self.amount(hud).map(Choice::Raise),
        }
    }

    fn amount(&self, hud: &HudContext) -> Result<Chips, ClientError> {
        let prompt = match (hud.min_raise(), hud.max_raise()) {
            (Some(lo), Some(hi)) => format!("raise to ({}-{})", lo, hi),
            _ => String::from("raise to"),
        };
        Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), String> {
                let amount = input
                    .trim()
                    .parse::<Chips>()
                    .map_err(|_| String::from("enter a number"))?;
                hud.validate(&Choice::Raise(amount))
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(|e| ClientError::Environment(e.to_string()))?
            .trim()
            .parse::<Chips>()
            .map_err(|e| ClientError::Environment(e.to_string()))
    }
}

/// Loose-passive bot: mostly checks or calls, sometimes raises a preset,
/// occasionally gives up facing a bet.
pub fn autoplay(hud: &HudContext) -> Option<Choice> {
    use rand::Rng;
    use rand::prelude::IndexedRandom;
    let ref mut rng = rand::rng();
    let passive = hud
        .choices()
        .iter()
        .find(|c| matches!(c, Choice::Check | Choice::Call(_)))
        .copied();
    let raises = hud
        .quick()
        .iter()
        .filter(|q| q.preset != Preset::AllIn)
        .collect::<Vec<&QuickAction>>();
    let raise = raises.choose(rng).map(|q| Choice::Raise(q.amount));
    let choice = match rng.random_range(0..10) {
        0 if hud.to_call() > 0 => Some(Choice::Fold),
        1 | 2 => raise.or(passive),
        _ => passive,
    };
    choice.filter(|c| hud.choices().contains(c) || c.is_aggressive())
}
