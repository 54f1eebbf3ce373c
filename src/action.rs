//! The [`Action`] vocabulary and the abstract [`Decider`] capability.
//!
//! The core never inspects a decider's internals — rule-based policy,
//! preflop range tables, and external-process AI players are collaborators
//! outside this crate, reached only through this trait (`SPEC_FULL.md` §4.7,
//! §9 "Dynamic dispatch over deciders").

use serde::{Deserialize, Serialize};

use crate::player::PlayerActionContext;

/// A concrete poker action. `Raise`/`AllIn` carry the new `current_bet`
/// ("raise-to") value, in chips — not a delta and not expressed in big
/// blinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u64),
    AllIn,
}

/// Maps a read-only game snapshot to an [`Action`]. Implementations may
/// block (e.g. on user input or external process I/O) — the core imposes no
/// deadline, though it threads a `&PlayerActionContext` through rather than
/// an owning copy so long-lived deciders can avoid reallocating per call.
///
/// A `Decider` is infallible by trait contract: an implementation that may
/// fail (a parser error, a timeout) must catch that itself and return the
/// conservative fallback (`Check` if owed nothing, else `Fold`) rather than
/// panicking or propagating an error through this boundary.
pub trait Decider {
    fn decide(&mut self, ctx: &PlayerActionContext) -> Action;
}

/// Test/reference fixture: always returns the conservative fallback.
#[derive(Debug, Default)]
pub struct FoldingDecider;

impl Decider for FoldingDecider {
    fn decide(&mut self, ctx: &PlayerActionContext) -> Action {
        if ctx.to_call == 0 {
            Action::Check
        } else {
            Action::Fold
        }
    }
}

/// Test fixture: plays back a fixed queue of actions, falling back to the
/// conservative default once exhausted.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    queue: std::collections::VecDeque<Action>,
}

impl ScriptedDecider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> ScriptedDecider {
        ScriptedDecider {
            queue: actions.into_iter().collect(),
        }
    }
}

impl Decider for ScriptedDecider {
    fn decide(&mut self, ctx: &PlayerActionContext) -> Action {
        self.queue.pop_front().unwrap_or_else(|| {
            if ctx.to_call == 0 {
                Action::Check
            } else {
                Action::Fold
            }
        })
    }
}
