// Boundary a presentation layer drives: start hands, submit the human's
// decisions, and read back what to render. Implemented for `Game`.

use crate::cards::Card;
use crate::game::{Action, ActionError, Game, HandResult, RoundError, Seat, Stage};
use crate::guidance::Guidance;
use crate::pot::SidePot;

pub trait TableEngine {
    // Hand lifecycle
    fn start_new_round(&mut self) -> Result<(), RoundError>;
    fn handle_player_action(&mut self, action: Action) -> Result<(), ActionError>;
    fn is_game_over(&self) -> bool;

    // Queries
    fn seats(&self) -> &[Seat];
    fn stage(&self) -> Stage;
    fn community(&self) -> &[Card];
    fn pots(&self) -> &[SidePot];
    fn pot_total(&self) -> u64;
    fn current_actor(&self) -> Option<usize>;
    fn dealer(&self) -> usize;
    fn current_bet(&self) -> u64;
    fn amount_to_call(&self, seat: usize) -> u64;
    fn message(&self) -> &str;
    fn last_result(&self) -> Option<&HandResult>;
    fn guidance(&self) -> Option<Guidance>;

    /// The human seat, if it is waiting on a decision.
    fn awaiting_human(&self) -> Option<usize> {
        self.current_actor().filter(|&i| self.seats().get(i).is_some_and(Seat::is_human))
    }
}

impl TableEngine for Game {
    fn start_new_round(&mut self) -> Result<(), RoundError> {
        self.start_new_round()
    }
    fn handle_player_action(&mut self, action: Action) -> Result<(), ActionError> {
        self.handle_player_action(action)
    }
    fn is_game_over(&self) -> bool {
        self.is_game_over()
    }

    fn seats(&self) -> &[Seat] {
        self.seats()
    }
    fn stage(&self) -> Stage {
        self.stage()
    }
    fn community(&self) -> &[Card] {
        self.community()
    }
    fn pots(&self) -> &[SidePot] {
        self.pots()
    }
    fn pot_total(&self) -> u64 {
        self.pot_total()
    }
    fn current_actor(&self) -> Option<usize> {
        self.current_actor()
    }
    fn dealer(&self) -> usize {
        self.dealer()
    }
    fn current_bet(&self) -> u64 {
        self.current_bet()
    }
    fn amount_to_call(&self, seat: usize) -> u64 {
        self.amount_to_call(seat)
    }
    fn message(&self) -> &str {
        self.message()
    }
    fn last_result(&self) -> Option<&HandResult> {
        self.last_result()
    }
    fn guidance(&self) -> Option<Guidance> {
        self.guidance()
    }
}
