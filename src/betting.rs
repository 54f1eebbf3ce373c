//! The betting-round state machine: one street, from first-to-act until
//! the street resolves.
//!
//! This is the centerpiece referenced in `SPEC_FULL.md` §4.4. It never
//! surfaces an `IllegalAction` error — a decider's output is canonicalized
//! in place (`canonicalize`) before being applied, so the round terminates
//! for any finite sequence of decider outputs (Testable Property 9).

use std::collections::HashSet;

use crate::action::Action;
use crate::player::{Player, PlayerActionContext};

/// Runs a single betting round (one street) over an action-ordered slice of
/// players.
pub struct BettingRound {
    pub players: Vec<Player>,
    pub current_bet: u64,
    pub min_raise: u64,
    pub max_raises: u32,
    raise_count: u32,
    last_raiser: Option<u32>,
    /// The `current_bet` level as of the last *full* raise (one that met or
    /// exceeded `min_raise` at the time). An all-in short of that bar still
    /// raises `current_bet` for calling purposes but does not move this —
    /// so it does not reopen action for players who already matched it.
    last_full_raise_to: u64,
    acted: HashSet<u32>,
}

impl BettingRound {
    /// `players` must already be in this street's action order. `min_raise`
    /// is floored at `big_blind` if passed as 0.
    pub fn new(
        players: Vec<Player>,
        big_blind: u64,
        current_bet: u64,
        min_raise: u64,
        max_raises: u32,
    ) -> BettingRound {
        BettingRound {
            players,
            current_bet,
            min_raise: if min_raise == 0 { big_blind } else { min_raise },
            max_raises,
            raise_count: 0,
            last_raiser: None,
            last_full_raise_to: current_bet,
            acted: HashSet::new(),
        }
    }

    /// True once at most one player remains in the hand (not folded).
    pub fn is_complete(&self) -> bool {
        self.players.iter().filter(|p| p.is_in_hand()).count() <= 1
    }

    /// Drive the round to completion.
    ///
    /// `make_context` builds the read-only snapshot for a player given this
    /// round's live state and the running pot total; `get_action` asks the
    /// decider; `on_before_action`/`on_action` are observer hooks fired
    /// immediately before/after each decision.
    pub fn run(
        &mut self,
        pot: &mut u64,
        mut make_context: impl FnMut(&Player, &BettingRound, u64) -> PlayerActionContext,
        mut get_action: impl FnMut(&Player, &PlayerActionContext) -> Action,
        mut on_before_action: impl FnMut(&Player),
        mut on_action: impl FnMut(&Player, Action),
    ) {
        let active_count = self.players.iter().filter(|p| p.is_active()).count();
        if active_count <= 1 {
            return;
        }

        'outer: loop {
            for idx in 0..self.players.len() {
                if !self.players[idx].is_active() {
                    continue;
                }
                let seat = self.players[idx].seat;

                if self.acted.contains(&seat) {
                    if self.last_raiser == Some(seat) {
                        continue;
                    }
                    if self.players[idx].current_bet >= self.last_full_raise_to {
                        continue;
                    }
                }

                let ctx = make_context(&self.players[idx], self, *pot);
                on_before_action(&self.players[idx]);
                let raw_action = get_action(&self.players[idx], &ctx);
                let action = self.canonicalize(&ctx, raw_action);

                let old_current_bet = self.current_bet;
                let committed = self.apply_action(idx, action);
                *pot += committed;
                self.acted.insert(seat);
                on_action(&self.players[idx], action);

                if matches!(action, Action::Raise(_) | Action::AllIn)
                    && self.players[idx].current_bet > old_current_bet
                {
                    let raise_increment = self.players[idx].current_bet - old_current_bet;
                    self.current_bet = self.players[idx].current_bet;

                    if raise_increment >= self.min_raise {
                        // A full raise: it reopens action for everyone who
                        // already acted, and sets the new bar for what
                        // counts as "matched" going forward.
                        self.min_raise = raise_increment;
                        self.last_full_raise_to = self.current_bet;
                        self.last_raiser = Some(seat);
                        self.raise_count += 1;
                    }
                    // Else: an all-in short of a full raise. `current_bet`
                    // still rises (others owe the difference to stay in),
                    // but `last_full_raise_to`, `last_raiser`, and
                    // `raise_count` are untouched, so nobody who already
                    // matched the last full raise is forced back to act.

                    if self.is_complete() {
                        return;
                    }
                    continue 'outer;
                }

                if self.is_complete() {
                    return;
                }
            }

            let needs_action = self.players.iter().any(|p| {
                p.is_active()
                    && Some(p.seat) != self.last_raiser
                    && p.current_bet < self.last_full_raise_to
            });
            if !needs_action {
                break;
            }
        }
    }

    /// Repair an illegal or undersized action into a legal one. Never
    /// returns an error — this is the crate's entire illegal-action policy
    /// (`SPEC_FULL.md` §7: `IllegalAction` is never surfaced).
    fn canonicalize(&self, ctx: &PlayerActionContext, action: Action) -> Action {
        let mut action = match action {
            Action::Fold if ctx.to_call == 0 => Action::Check,
            Action::Check if ctx.to_call > 0 => Action::Call,
            Action::Raise(amount_to) => {
                if amount_to <= self.current_bet {
                    if ctx.to_call > 0 {
                        Action::Call
                    } else {
                        Action::Check
                    }
                } else if amount_to >= ctx.max_raise_to || ctx.min_raise_to >= ctx.max_raise_to {
                    Action::AllIn
                } else if amount_to < ctx.min_raise_to {
                    Action::Raise(ctx.min_raise_to)
                } else {
                    Action::Raise(amount_to)
                }
            }
            other => other,
        };

        if self.raise_count >= self.max_raises && matches!(action, Action::Raise(_) | Action::AllIn)
        {
            action = if ctx.to_call > 0 { Action::Call } else { Action::Check };
        }

        action
    }

    /// Apply an already-canonical action to `players[idx]`. Returns the
    /// chips actually committed to the pot.
    fn apply_action(&mut self, idx: usize, action: Action) -> u64 {
        match action {
            Action::Fold => {
                self.players[idx].fold();
                0
            }
            Action::Check => 0,
            Action::Call => {
                let call_amount = self.current_bet.saturating_sub(self.players[idx].current_bet);
                self.players[idx].bet(call_amount)
            }
            Action::Raise(raise_to) => {
                let amount_needed = raise_to.saturating_sub(self.players[idx].current_bet);
                self.players[idx].bet(amount_needed)
            }
            Action::AllIn => {
                let amount = self.players[idx].chips;
                self.players[idx].bet(amount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, FoldingDecider, ScriptedDecider};
    use crate::player::Street;

    fn ctx(round: &BettingRound, player: &Player, pot: u64) -> PlayerActionContext {
        PlayerActionContext {
            hole_cards: vec![],
            community: vec![],
            pot_total: pot,
            to_call: round.current_bet.saturating_sub(player.current_bet),
            min_raise_to: round.current_bet + round.min_raise,
            max_raise_to: player.current_bet + player.chips,
            street: Street::Preflop,
            num_active_players: round.players.iter().filter(|p| p.is_in_hand()).count(),
            position_label: "?".into(),
        }
    }

    fn run_scripted(
        mut round: BettingRound,
        mut scripts: std::collections::HashMap<u32, ScriptedDecider>,
    ) -> (BettingRound, u64) {
        let mut pot = 0u64;
        round.run(
            &mut pot,
            |p, r, pot| ctx(r, p, pot),
            |p, c| {
                scripts
                    .get_mut(&p.seat)
                    .map(|d| d.decide(c))
                    .unwrap_or(if c.to_call == 0 { Action::Check } else { Action::Fold })
            },
            |_| {},
            |_, _| {},
        );
        (round, pot)
    }

    #[test]
    fn s7_raise_then_two_folds_ends_hand() {
        let players = vec![
            Player::new("b1", 0, 1000),
            Player::new("b2", 1, 1000),
            Player::new("hero", 2, 1000),
        ];
        let round = BettingRound::new(players, 20, 20, 20, 4);
        let mut scripts = std::collections::HashMap::new();
        scripts.insert(0, ScriptedDecider::new([Action::Raise(60)]));
        scripts.insert(1, ScriptedDecider::new([Action::Fold]));
        scripts.insert(2, ScriptedDecider::new([Action::Fold]));
        let (round, pot) = run_scripted(round, scripts);

        assert!(round.is_complete());
        assert_eq!(pot, 60);
        let b1 = round.players.iter().find(|p| p.seat == 0).unwrap();
        assert_eq!(b1.current_bet, 60);
    }

    #[test]
    fn s8_check_through_heads_up() {
        let players = vec![Player::new("hero", 0, 1000), Player::new("villain", 1, 1000)];
        let round = BettingRound::new(players, 20, 0, 20, 4);
        let mut scripts = std::collections::HashMap::new();
        scripts.insert(0, ScriptedDecider::new([Action::Check]));
        scripts.insert(1, ScriptedDecider::new([Action::Check]));
        let (round, pot) = run_scripted(round, scripts);

        assert_eq!(pot, 0);
        assert!(!round.is_complete());
        for p in &round.players {
            assert_eq!(p.chips, 1000);
        }
    }

    #[test]
    fn s9_undersized_all_in_does_not_reopen_betting() {
        // BB makes a full raise to 200. Button goes all-in for 250 (only
        // a 50-chip raise, well under the 180 min-raise). SB, who already
        // called the original 200, must not be forced to act again; its
        // current_bet stays below the new high but it's excluded from
        // needing-to-respond because the under-sized all-in never became
        // the new min-raise.
        let mut sb = Player::new("sb", 0, 1000);
        sb.current_bet = 200;
        sb.total_bet_this_hand = 200;
        let mut bb = Player::new("bb", 1, 800);
        bb.current_bet = 200;
        bb.total_bet_this_hand = 200;
        let btn = Player::new("btn", 2, 250);

        let players = vec![btn, sb, bb];
        let mut round = BettingRound::new(players, 20, 200, 180, 4);
        // Mark sb and bb as already acted (they posted/called the 200 raise
        // in a prior pass); only btn is still to act this pass.
        round.acted.insert(0);
        round.acted.insert(1);

        let mut scripts = std::collections::HashMap::new();
        scripts.insert(2, ScriptedDecider::new([Action::AllIn]));
        scripts.insert(0, ScriptedDecider::new([Action::Fold]));
        scripts.insert(1, ScriptedDecider::new([Action::Fold]));
        let (round, pot) = run_scripted(round, scripts);

        // btn's all-in only reaches 250 — an under-sized raise (min-raise
        // would require 380). sb/bb already matched 200 and must not be
        // asked to respond to this under-sized all-in again: the round
        // must terminate without ever invoking their deciders, which only
        // know `Fold`. If reopening happened, they'd fold and the round
        // would end with everyone folded instead of a clean 3-way pot.
        assert_eq!(pot, 250);
        assert_eq!(round.min_raise, 180);
        let sb = round.players.iter().find(|p| p.seat == 0).unwrap();
        let bb = round.players.iter().find(|p| p.seat == 1).unwrap();
        assert!(!sb.is_folded);
        assert!(!bb.is_folded);
    }

    #[test]
    fn raise_cap_downgrades_to_call() {
        let players = vec![Player::new("a", 0, 1000), Player::new("b", 1, 1000)];
        let round = BettingRound::new(players, 20, 20, 20, 1);
        let mut scripts = std::collections::HashMap::new();
        // a raises (consumes the single allowed raise), b tries to raise
        // again — must be downgraded to a call under the cap.
        scripts.insert(0, ScriptedDecider::new([Action::Raise(60)]));
        scripts.insert(1, ScriptedDecider::new([Action::Raise(200), Action::Check]));
        let (round, pot) = run_scripted(round, scripts);

        assert_eq!(pot, 120);
        for p in &round.players {
            assert_eq!(p.current_bet, 60);
        }
    }

    #[test]
    fn raise_too_small_clamps_to_min_raise() {
        let players = vec![Player::new("a", 0, 1000), Player::new("b", 1, 1000)];
        let round = BettingRound::new(players, 20, 20, 20, 4);
        let mut scripts = std::collections::HashMap::new();
        scripts.insert(0, ScriptedDecider::new([Action::Raise(25)])); // too small, clamps to 40
        scripts.insert(1, ScriptedDecider::new([Action::Fold]));
        let (round, _pot) = run_scripted(round, scripts);
        let a = round.players.iter().find(|p| p.seat == 0).unwrap();
        assert_eq!(a.current_bet, 40);
    }

    #[test]
    fn fold_with_nothing_owed_becomes_check() {
        let players = vec![Player::new("a", 0, 1000), Player::new("b", 1, 1000)];
        let round = BettingRound::new(players, 20, 0, 20, 4);
        let mut scripts = std::collections::HashMap::new();
        scripts.insert(0, ScriptedDecider::new([Action::Fold]));
        scripts.insert(1, ScriptedDecider::new([Action::Check]));
        let (round, _pot) = run_scripted(round, scripts);
        assert!(!round.is_complete());
        let a = round.players.iter().find(|p| p.seat == 0).unwrap();
        assert!(!a.is_folded);
    }

    #[test]
    fn terminates_for_adversarial_all_raise_decider() {
        // Every player always tries to raise; raise cap must still force
        // termination in bounded passes.
        let players = vec![
            Player::new("a", 0, 100_000),
            Player::new("b", 1, 100_000),
            Player::new("c", 2, 100_000),
        ];
        let mut round = BettingRound::new(players, 20, 20, 20, 4);
        let mut pot = 0u64;
        round.run(
            &mut pot,
            |p, r, pot| ctx(r, p, pot),
            |_, c| Action::Raise(c.min_raise_to + 1000),
            |_| {},
            |_, _| {},
        );
        assert!(round.raise_count <= round.max_raises + round.players.len() as u32);
    }

    #[test]
    fn folding_decider_never_blocks_termination() {
        let players = vec![
            Player::new("a", 0, 500),
            Player::new("b", 1, 500),
            Player::new("c", 2, 500),
        ];
        let mut round = BettingRound::new(players, 20, 20, 20, 4);
        let mut pot = 0u64;
        let mut d = FoldingDecider;
        round.run(&mut pot, |p, r, pot| ctx(r, p, pot), |_, c| d.decide(c), |_| {}, |_, _| {});
        assert!(round.is_complete());
    }
}
