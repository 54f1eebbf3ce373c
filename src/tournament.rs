//! The tournament loop: blind schedule, elimination tracking, dealer
//! rotation, played hand after hand until one player remains.
//!
//! Grounded on `original_source/tournament.py::Tournament.run`.

use log::{debug, info};
use rand::Rng;

use crate::action::Action;
use crate::error::EngineError;
use crate::observer::Observer;
use crate::player::{Player, PlayerActionContext};
use crate::table::{HandResult, Table};

/// One entry of the blind schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlindLevel {
    pub small_blind: u64,
    pub big_blind: u64,
}

/// The default schedule carried over from the reference implementation.
pub const DEFAULT_BLIND_SCHEDULE: &[BlindLevel] = &[
    BlindLevel { small_blind: 10, big_blind: 20 },
    BlindLevel { small_blind: 15, big_blind: 30 },
    BlindLevel { small_blind: 25, big_blind: 50 },
    BlindLevel { small_blind: 50, big_blind: 100 },
    BlindLevel { small_blind: 75, big_blind: 150 },
    BlindLevel { small_blind: 100, big_blind: 200 },
    BlindLevel { small_blind: 150, big_blind: 300 },
    BlindLevel { small_blind: 200, big_blind: 400 },
    BlindLevel { small_blind: 300, big_blind: 600 },
    BlindLevel { small_blind: 500, big_blind: 1000 },
];

pub const STARTING_STACK: u64 = 1500;
pub const HANDS_PER_LEVEL: u32 = 10;

/// Tournament-wide configuration. A plain constructible struct with a
/// sensible `Default` — loading this from a config file or CLI flags is
/// out of scope for this crate.
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    /// How many non-human seats the caller intends to fill; not consumed by
    /// [`Tournament::run`] itself, which only ever sees the `players` it is
    /// handed, but kept here so embedders have one place to carry table-size
    /// intent through to setup code.
    pub num_bots: u32,
    pub starting_stack: u64,
    pub hands_per_level: u32,
    pub max_raises: u32,
    pub blind_schedule: Vec<BlindLevel>,
}

impl Default for TournamentConfig {
    fn default() -> TournamentConfig {
        TournamentConfig {
            num_bots: 7,
            starting_stack: STARTING_STACK,
            hands_per_level: HANDS_PER_LEVEL,
            max_raises: 4,
            blind_schedule: DEFAULT_BLIND_SCHEDULE.to_vec(),
        }
    }
}

/// Drives hands to completion until a single player remains.
pub struct Tournament {
    pub config: TournamentConfig,
    pub players: Vec<Player>,
    pub dealer_seat: u32,
    pub hand_number: u64,
    pub blind_level_idx: usize,
}

impl Tournament {
    pub fn new(config: TournamentConfig, players: Vec<Player>) -> Tournament {
        let dealer_seat = players.first().map(|p| p.seat).unwrap_or(0);
        Tournament {
            config,
            players,
            dealer_seat,
            hand_number: 0,
            blind_level_idx: 0,
        }
    }

    /// Run every hand until one player remains, returning that player.
    pub fn run(
        &mut self,
        rng: &mut impl Rng,
        mut get_action: impl FnMut(&Player, &PlayerActionContext) -> Action,
        observer: &mut impl Observer,
    ) -> Result<Player, EngineError> {
        let mut alive: Vec<Player> = self
            .players
            .iter()
            .filter(|p| !p.is_eliminated())
            .cloned()
            .collect();
        self.dealer_seat = alive.first().map(|p| p.seat).unwrap_or(0);

        while alive.len() > 1 {
            self.hand_number += 1;

            if self.hand_number > 1
                && (self.hand_number - 1) % u64::from(self.config.hands_per_level) == 0
                && self.blind_level_idx + 1 < self.config.blind_schedule.len()
            {
                self.blind_level_idx += 1;
                let level = self.config.blind_schedule[self.blind_level_idx];
                info!(
                    "blind level up: level {} -> {}/{}",
                    self.blind_level_idx, level.small_blind, level.big_blind
                );
                observer.on_blind_increase(self.blind_level_idx, level.small_blind, level.big_blind);
            }

            let level = self.config.blind_schedule[self.blind_level_idx];

            let mut table = Table::new(
                self.players.clone(),
                self.dealer_seat,
                level.small_blind,
                level.big_blind,
                self.config.max_raises,
                self.blind_level_idx,
            );
            let _result: HandResult =
                table.play_hand(self.hand_number, rng, &mut get_action, observer)?;
            self.players = table.players;

            for p in &mut self.players {
                p.is_all_in = false;
                p.is_folded = false;
            }

            for p in &alive {
                if let Some(updated) = self.players.iter().find(|q| q.seat == p.seat) {
                    if updated.is_eliminated() {
                        let place = self.players.iter().filter(|x| x.is_eliminated()).count();
                        let finish_position = self.players.len() - place + 1;
                        debug!("seat {} eliminated, finish position {}", p.seat, finish_position);
                        observer.on_elimination(p.seat, finish_position as u32);
                    }
                }
            }

            alive = self.players.iter().filter(|p| !p.is_eliminated()).cloned().collect();
            if !alive.is_empty() {
                self.dealer_seat = next_dealer(&alive, self.dealer_seat);
            }
        }

        let winner = alive.into_iter().next().expect("tournament ends with exactly one player");
        observer.on_tournament_end(winner.seat);
        Ok(winner)
    }
}

fn next_dealer(alive: &[Player], dealer_seat: u32) -> u32 {
    let mut seats: Vec<u32> = alive.iter().map(|p| p.seat).collect();
    seats.sort_unstable();
    let current_idx = seats.iter().position(|&s| s >= dealer_seat).unwrap_or(0);
    let next_idx = (current_idx + 1) % seats.len();
    seats[next_idx]
}
