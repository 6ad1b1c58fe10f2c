use crate::bot::{self, BotContext, BotProfile, Difficulty, DrawSource, RngDraws};
use crate::cards::Card;
use crate::config::{ConfigError, SeatKind, TableConfig};
use crate::deck::Deck;
use crate::evaluator::{evaluate, Category};
use crate::guidance::{self, Guidance};
use crate::pot::{PotLedger, SidePot};
use crate::showdown;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

/// A betting decision. `Raise` carries the amount added on top of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(u64),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("fold"),
            Action::Check => f.write_str("check"),
            Action::Call => f.write_str("call"),
            Action::Raise(n) => write!(f, "raise {n}"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseActionError {
    #[error("unknown action: '{0}'")]
    Unknown(String),
    #[error("raise needs a whole chip amount, got '{0}'")]
    Amount(String),
}

impl FromStr for Action {
    type Err = ParseActionError;

    /// Accepts `fold`/`f`, `check`/`k`, `call`/`c` and `raise <n>`/`r <n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or("").to_ascii_lowercase();
        match verb.as_str() {
            "fold" | "f" => Ok(Action::Fold),
            "check" | "k" => Ok(Action::Check),
            "call" | "c" => Ok(Action::Call),
            "raise" | "r" | "bet" => {
                let raw = parts.next().unwrap_or("");
                raw.parse::<u64>()
                    .map(Action::Raise)
                    .map_err(|_| ParseActionError::Amount(raw.to_string()))
            }
            _ => Err(ParseActionError::Unknown(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Stage {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::PreFlop => "Pre-Flop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
            Stage::HandOver => "Hand Over",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Raise => "Raise to",
            HandHistoryVerb::AllIn => "All-in",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub stage: Stage,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("Game over! Thank you for playing.")]
    GameOver,
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("not enough players with chips to start a hand")]
    NotEnoughPlayers,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no hand is in progress")]
    HandOver,
    #[error("it is not seat {0}'s turn to act")]
    NotYourTurn(usize),
    #[error("the table has no human seat")]
    NoHumanSeat,
}

/// A fixed seat at the table. The stack and `out` flag persist across hands.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Seat {
    pub(crate) name: String,
    pub(crate) kind: SeatKind,
    pub(crate) chips: u64,
    pub(crate) hand: Vec<Card>,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) out: bool,
    /// Chips committed in the current betting round.
    pub(crate) bet: u64,
}

impl Seat {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SeatKind {
        self.kind
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn is_out(&self) -> bool {
        self.out
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn is_human(&self) -> bool {
        self.kind == SeatKind::Human
    }

    /// Still holding cards in the current hand.
    pub fn in_hand(&self) -> bool {
        !self.folded && !self.out
    }

    /// Able to make a betting decision.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && !self.out
    }
}

/// Outcome of the last finished hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandResult {
    pub winners: Vec<usize>,
    pub winner_names: Vec<String>,
    /// "Default Win", or the winning hand, e.g. "a Full House".
    pub description: String,
    /// Chips won per seat.
    pub payouts: Vec<u64>,
    /// Best winning category; `None` for a default win.
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct SessionStats {
    pub hands_played: u32,
    /// Hands in which the human seat won chips.
    pub hands_won: u32,
}

/// A single table playing repeated hands until elimination.
///
/// Bots act as soon as it is their turn. When the human seat is to act the
/// game stops with [`Game::current_actor`] set until
/// [`Game::handle_player_action`] is called.
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    config: TableConfig,
    seats: Vec<Seat>,
    human: Option<usize>,

    deck: Deck,
    queued_deck: Option<Deck>,
    community: Vec<Card>,
    pots: PotLedger,
    stage: Stage,
    dealer: usize,
    in_hand: bool,
    hands_started: u64,

    current_bet: u64,
    last_aggressor: Option<usize>,
    current_actor: Option<usize>,
    /// Seats that still owe a decision this betting round.
    to_act: Vec<bool>,
    cursor: usize,

    message: String,
    last_result: Option<HandResult>,
    stats: SessionStats,
    history: Vec<HandHistoryEntry>,

    profile: BotProfile,
    draws: Box<dyn DrawSource>,
    rng: ChaCha8Rng,
}

impl Game {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats: Vec<Seat> = config
            .seats
            .iter()
            .map(|s| Seat {
                name: s.name.clone(),
                kind: s.kind,
                chips: s.chips,
                hand: Vec::new(),
                folded: false,
                all_in: false,
                out: s.chips == 0,
                bet: 0,
            })
            .collect();
        let n = seats.len();
        let (rng, draws) = match config.seed {
            Some(seed) => {
                (ChaCha8Rng::seed_from_u64(seed), RngDraws::seeded(seed.wrapping_add(1)))
            }
            None => (ChaCha8Rng::from_rng(&mut rand::rng()), RngDraws::from_entropy()),
        };
        Ok(Self {
            human: config.human_seat(),
            profile: config.difficulty.profile(),
            dealer: config.first_dealer,
            pots: PotLedger::new(n),
            seats,
            deck: Deck::standard(),
            queued_deck: None,
            community: Vec::new(),
            stage: Stage::HandOver,
            in_hand: false,
            hands_started: 0,
            current_bet: 0,
            last_aggressor: None,
            current_actor: None,
            to_act: vec![false; n],
            cursor: 0,
            message: String::new(),
            last_result: None,
            stats: SessionStats::default(),
            history: Vec::new(),
            draws: Box::new(draws),
            rng,
            config,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, idx: usize) -> Option<&Seat> {
        self.seats.get(idx)
    }

    pub fn human_seat(&self) -> Option<usize> {
        self.human
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    /// All pots; index 0 is the main pot.
    pub fn pots(&self) -> &[SidePot] {
        self.pots.pots()
    }

    pub fn main_pot(&self) -> u64 {
        self.pots.main()
    }

    pub fn side_pots(&self) -> &[SidePot] {
        self.pots.sides()
    }

    pub fn pot_total(&self) -> u64 {
        self.pots.total()
    }

    pub fn current_actor(&self) -> Option<usize> {
        self.current_actor
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Bet to match in the current round.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn is_hand_in_progress(&self) -> bool {
        self.in_hand
    }

    /// Stacks plus everything in the pots.
    pub fn total_chips(&self) -> u64 {
        self.seats.iter().map(|s| s.chips).sum::<u64>() + self.pots.total()
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> Vec<HandHistoryEntry> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Use `deck` for the next hand instead of a fresh shuffle.
    pub fn queue_deck(&mut self, deck: Deck) {
        self.queued_deck = Some(deck);
    }

    pub fn set_draw_source(&mut self, draws: Box<dyn DrawSource>) {
        self.draws = draws;
    }

    /// Takes effect from the next bot decision.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.profile = difficulty.profile();
    }

    /// Chips seat `idx` must add to match the current bet; 0 for an unknown seat.
    pub fn amount_to_call(&self, idx: usize) -> u64 {
        self.seats.get(idx).map_or(0, |s| self.current_bet.saturating_sub(s.bet))
    }

    /// Human seat eliminated, or nobody left for it to play against.
    pub fn is_game_over(&self) -> bool {
        match self.human {
            Some(h) => {
                self.seats[h].out
                    || self.seats.iter().filter(|s| s.kind == SeatKind::Bot).all(|s| s.out)
            }
            None => self.live_seats() < 2,
        }
    }

    /// Hand strength and advice for the human seat.
    pub fn guidance(&self) -> Option<Guidance> {
        let seat = self.seats.get(self.human?)?;
        if seat.hand.is_empty() {
            return None;
        }
        Some(guidance::advise(&seat.hand, &self.community, self.stage))
    }

    /// Guidance with `opponent`'s hand revealed. Cards stay hidden while the
    /// hand is being played.
    pub fn guidance_against(&self, opponent: usize) -> Option<Guidance> {
        if self.in_hand || Some(opponent) == self.human {
            return None;
        }
        let cards = &self.seats.get(opponent)?.hand;
        if cards.is_empty() {
            return None;
        }
        Some(self.guidance()?.with_opponent(cards, &self.community))
    }

    /// Begin the next hand and play bots until the human must act or the hand
    /// ends. Rejections leave the table untouched apart from the message.
    pub fn start_new_round(&mut self) -> Result<(), RoundError> {
        if let Err(e) = self.check_can_start() {
            self.message = e.to_string();
            return Err(e);
        }

        self.reset_hand_state();
        self.rotate_dealer();
        self.hands_started += 1;
        self.in_hand = true;
        log::info!(
            "hand #{} starts, dealer {}, stacks {:?}",
            self.hands_started,
            self.seats[self.dealer].name,
            self.seats.iter().map(|s| s.chips).collect::<Vec<_>>()
        );

        self.deal_hole_cards();
        self.post_blinds();
        self.drive();
        Ok(())
    }

    fn check_can_start(&self) -> Result<(), RoundError> {
        if self.is_game_over() {
            return Err(RoundError::GameOver);
        }
        if self.in_hand {
            return Err(RoundError::HandInProgress);
        }
        if self.live_seats() < 2 {
            return Err(RoundError::NotEnoughPlayers);
        }
        Ok(())
    }

    /// Act for the human seat.
    pub fn handle_player_action(&mut self, action: Action) -> Result<(), ActionError> {
        let seat = self.human.ok_or(ActionError::NoHumanSeat)?;
        self.act_as(seat, action)
    }

    /// Act for `seat`, which must be the seat the game is waiting on.
    pub fn act_as(&mut self, seat: usize, action: Action) -> Result<(), ActionError> {
        if !self.in_hand || self.stage == Stage::HandOver {
            return Err(ActionError::HandOver);
        }
        if self.current_actor != Some(seat) {
            return Err(ActionError::NotYourTurn(seat));
        }
        let action = match action {
            Action::Raise(amount) => Action::Raise(self.clamp_raise(seat, amount)),
            other => other,
        };
        self.perform_action(seat, action);
        self.drive();
        Ok(())
    }

    /// Raise size bounded to `[max(big blind, bet to match), stack]`.
    fn clamp_raise(&self, seat: usize, amount: u64) -> u64 {
        let stack = self.seats[seat].chips;
        let min = self.config.big_blind.max(self.current_bet);
        if stack <= min {
            stack
        } else {
            amount.clamp(min, stack)
        }
    }

    fn reset_hand_state(&mut self) {
        self.stage = Stage::PreFlop;
        self.community.clear();
        self.pots.reset();
        self.current_bet = 0;
        self.last_aggressor = None;
        self.current_actor = None;
        self.last_result = None;
        self.history.clear();
        for s in &mut self.seats {
            s.hand.clear();
            s.bet = 0;
            s.all_in = false;
            s.folded = false;
        }
        self.to_act = vec![false; self.seats.len()];
        self.deck = match self.queued_deck.take() {
            Some(deck) => deck,
            None => {
                let mut deck = Deck::standard();
                deck.shuffle_with(&mut self.rng);
                deck
            }
        };
    }

    /// The first hand keeps the configured button; later hands move it to
    /// the next seat still in the game.
    fn rotate_dealer(&mut self) {
        if self.hands_started == 0 {
            if self.seats[self.dealer].out {
                self.dealer = self.next_live(self.dealer);
            }
        } else {
            self.dealer = self.next_live(self.dealer);
        }
    }

    fn deal_hole_cards(&mut self) {
        let first = self.next_live(self.dealer);
        let order: Vec<usize> = self.live_from(first).collect();
        for _ in 0..2 {
            for &i in &order {
                match self.deck.draw() {
                    Some(c) => self.seats[i].hand.push(c),
                    None => {
                        log::warn!("deck ran out while dealing hole cards");
                        return;
                    }
                }
            }
        }
    }

    fn post_blinds(&mut self) {
        let sb = self.next_live(self.dealer);
        let bb = self.next_live(sb);

        let sb_paid = self.commit(sb, self.config.small_blind);
        self.record(sb, HandHistoryVerb::SmallBlind, Some(sb_paid));
        self.current_bet = self.current_bet.max(self.seats[sb].bet);

        let bb_paid = self.commit(bb, self.config.big_blind);
        self.record(bb, HandHistoryVerb::BigBlind, Some(bb_paid));

        self.current_bet = self.config.big_blind;
        self.last_aggressor = Some(bb);
        log::debug!("blinds posted: {} by seat {sb}, {} by seat {bb}", sb_paid, bb_paid);
        self.open_betting_round((bb + 1) % self.seats.len());
    }

    /// Move up to `amount` from the seat's stack into the pots.
    fn commit(&mut self, seat: usize, amount: u64) -> u64 {
        let s = &mut self.seats[seat];
        let put = amount.min(s.chips);
        s.chips -= put;
        s.bet += put;
        if s.chips == 0 {
            s.all_in = true;
        }
        let all_in = s.all_in;
        self.pots.contribute(seat, put, all_in);
        put
    }

    fn open_betting_round(&mut self, first: usize) {
        for (i, s) in self.seats.iter().enumerate() {
            self.to_act[i] = s.can_act() && self.last_aggressor != Some(i);
        }
        self.cursor = first;
    }

    /// Next seat owing a decision, scanning clockwise from the cursor.
    fn next_to_act(&self) -> Option<usize> {
        let n = self.seats.len();
        let able = self.able_seats();
        (0..n).map(|k| (self.cursor + k) % n).find(|&i| {
            self.to_act[i] && self.seats[i].can_act() && (able >= 2 || self.amount_to_call(i) > 0)
        })
    }

    /// Run the hand forward until the human must act or the hand is over.
    fn drive(&mut self) {
        while self.in_hand {
            if self.remaining_in_hand() <= 1 {
                self.finish_betting_round();
                continue;
            }
            let Some(seat) = self.next_to_act() else {
                self.finish_betting_round();
                continue;
            };
            self.current_actor = Some(seat);
            if self.seats[seat].is_human() {
                self.message = "Your turn to act.".to_string();
                return;
            }
            let action = self.bot_action(seat);
            self.perform_action(seat, action);
        }
    }

    fn bot_action(&mut self, seat: usize) -> Action {
        let s = &self.seats[seat];
        let cards: Vec<Card> = s.hand.iter().chain(self.community.iter()).copied().collect();
        let ctx = BotContext {
            strength: evaluate(&cards),
            to_call: self.amount_to_call(seat),
            pot: self.pots.total(),
            stack: s.chips,
            current_bet: self.current_bet,
            big_blind: self.config.big_blind,
        };
        let draw = self.draws.next_draw();
        bot::decide(&ctx, &self.profile, draw)
    }

    fn perform_action(&mut self, seat: usize, action: Action) {
        let to_call = self.amount_to_call(seat);
        self.to_act[seat] = false;
        self.current_actor = None;
        self.cursor = (seat + 1) % self.seats.len();

        match action {
            Action::Fold => self.fold(seat),
            Action::Check if to_call > 0 => self.fold(seat),
            Action::Check | Action::Call if to_call == 0 => {
                self.message = format!("{} checks.", self.seats[seat].name);
                self.record(seat, HandHistoryVerb::Check, None);
            }
            Action::Call | Action::Check => {
                let put = self.commit(seat, to_call);
                self.announce_call(seat, put);
            }
            Action::Raise(delta) => {
                let put = self.commit(seat, to_call.saturating_add(delta));
                let bet = self.seats[seat].bet;
                if bet <= self.current_bet {
                    self.announce_call(seat, put);
                } else {
                    self.current_bet = bet;
                    self.last_aggressor = Some(seat);
                    for (i, s) in self.seats.iter().enumerate() {
                        if i != seat {
                            self.to_act[i] = s.can_act();
                        }
                    }
                    if self.seats[seat].all_in {
                        self.announce_all_in(seat, put);
                    } else {
                        self.message = format!("{} raises to ${bet}.", self.seats[seat].name);
                        self.record(seat, HandHistoryVerb::Raise, Some(bet));
                    }
                }
            }
        }
        log::debug!("{} ({}): {}", self.seats[seat].name, self.stage, self.message);
    }

    fn fold(&mut self, seat: usize) {
        self.seats[seat].folded = true;
        self.message = format!("{} folds.", self.seats[seat].name);
        self.record(seat, HandHistoryVerb::Fold, None);
    }

    fn announce_call(&mut self, seat: usize, put: u64) {
        if self.seats[seat].all_in {
            self.announce_all_in(seat, put);
        } else {
            self.message = format!("{} calls ${put}.", self.seats[seat].name);
            self.record(seat, HandHistoryVerb::Call, Some(put));
        }
    }

    fn announce_all_in(&mut self, seat: usize, put: u64) {
        self.message = format!("{} is all-in with ${put}.", self.seats[seat].name);
        self.record(seat, HandHistoryVerb::AllIn, Some(put));
    }

    fn finish_betting_round(&mut self) {
        for s in &mut self.seats {
            s.bet = 0;
        }
        self.current_bet = 0;
        self.last_aggressor = None;
        self.current_actor = None;

        if self.remaining_in_hand() <= 1 {
            self.award_default_win();
            return;
        }

        self.stage = match self.stage {
            Stage::PreFlop => {
                self.deal_community(3);
                Stage::Flop
            }
            Stage::Flop => {
                self.deal_community(1);
                Stage::Turn
            }
            Stage::Turn => {
                self.deal_community(1);
                Stage::River
            }
            _ => Stage::Showdown,
        };
        self.message = format!("Betting round over. Stage is now {}.", self.stage);

        if self.stage == Stage::Showdown {
            self.settle_showdown();
        } else if self.able_seats() < 2 {
            self.deal_community(5usize.saturating_sub(self.community.len()));
            self.stage = Stage::Showdown;
            self.settle_showdown();
        } else {
            self.open_betting_round((self.dealer + 1) % self.seats.len());
        }
    }

    fn deal_community(&mut self, count: usize) {
        let drawn = self.deck.draw_n(count);
        if drawn.len() < count {
            log::warn!("deck short: wanted {count} community cards, got {}", drawn.len());
        }
        self.community.extend(drawn);
    }

    fn award_default_win(&mut self) {
        let winner = self
            .seats
            .iter()
            .position(Seat::in_hand)
            .unwrap_or_else(|| self.fallback_seat());
        let amount = self.pots.total();
        if self.pots.len() > 1 {
            log::warn!("default win collects {} pots", self.pots.len());
        }
        self.seats[winner].chips += amount;
        self.record(winner, HandHistoryVerb::Win, Some(amount));

        let name = self.seats[winner].name.clone();
        self.message = format!("{name} wins ${amount} by default!");
        let mut payouts = vec![0; self.seats.len()];
        payouts[winner] = amount;
        self.last_result = Some(HandResult {
            winners: vec![winner],
            winner_names: vec![name],
            description: "Default Win".to_string(),
            payouts,
            category: None,
        });
        self.pots.reset();
        self.conclude_hand();
    }

    fn settle_showdown(&mut self) {
        let contenders: Vec<(usize, Category)> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.in_hand())
            .map(|(i, s)| {
                let cards: Vec<Card> = s.hand.iter().chain(&self.community).copied().collect();
                (i, evaluate(&cards))
            })
            .collect();

        let settlement = showdown::distribute(self.pots.pots(), &contenders, self.seats.len());
        let mut payouts = settlement.payouts.clone();
        if settlement.unclaimed > 0 {
            let seat = self.fallback_seat();
            log::warn!("{} unclaimed chips go to seat {seat}", settlement.unclaimed);
            payouts[seat] += settlement.unclaimed;
        }

        let split = settlement.pot_winners.iter().any(|w| w.len() > 1);
        let verb = if split { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
        for (seat, &won) in payouts.iter().enumerate() {
            if won > 0 {
                self.seats[seat].chips += won;
                self.record(seat, verb, Some(won));
            }
        }

        let winners: Vec<usize> = (0..payouts.len()).filter(|&i| payouts[i] > 0).collect();
        let category_of = |seat: usize| {
            contenders.iter().find(|(s, _)| *s == seat).map(|&(_, c)| c)
        };
        let best = winners.iter().filter_map(|&w| category_of(w)).max();
        self.message = self.showdown_message(&winners, &payouts, &category_of);
        self.last_result = Some(HandResult {
            winner_names: winners.iter().map(|&w| self.seats[w].name.clone()).collect(),
            winners,
            description: best.map_or_else(String::new, |c| c.describe().to_string()),
            payouts,
            category: best,
        });
        self.pots.reset();
        self.conclude_hand();
    }

    fn showdown_message(
        &self,
        winners: &[usize],
        payouts: &[u64],
        category_of: &dyn Fn(usize) -> Option<Category>,
    ) -> String {
        let describe = |seat: usize| category_of(seat).map_or("the best hand", Category::describe);
        match winners {
            [] => "No winner this hand.".to_string(),
            [w] => format!("{} wins ${} with {}!", self.seats[*w].name, payouts[*w], describe(*w)),
            _ => {
                let first = category_of(winners[0]);
                if winners.iter().all(|&w| category_of(w) == first) {
                    let names: Vec<&str> =
                        winners.iter().map(|&w| self.seats[w].name.as_str()).collect();
                    let total: u64 = winners.iter().map(|&w| payouts[w]).sum();
                    format!("{} split ${total} with {}.", names.join(" and "), describe(winners[0]))
                } else {
                    winners
                        .iter()
                        .map(|&w| {
                            format!(
                                "{} wins ${} with {}.",
                                self.seats[w].name,
                                payouts[w],
                                describe(w)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            }
        }
    }

    fn conclude_hand(&mut self) {
        for s in &mut self.seats {
            s.bet = 0;
            if s.chips == 0 && !s.out {
                s.out = true;
                s.all_in = false;
                log::info!("{} is out of chips", s.name);
            }
        }
        self.stage = Stage::HandOver;
        self.current_actor = None;
        self.current_bet = 0;
        self.in_hand = false;

        self.stats.hands_played += 1;
        if let (Some(h), Some(result)) = (self.human, &self.last_result) {
            if result.winners.contains(&h) {
                self.stats.hands_won += 1;
            }
        }
        log::info!("hand #{} over: {}", self.hands_started, self.message);
    }

    /// First seat left of the dealer still holding cards, else any live seat.
    fn fallback_seat(&self) -> usize {
        let n = self.seats.len();
        (1..=n)
            .map(|k| (self.dealer + k) % n)
            .find(|&i| self.seats[i].in_hand())
            .unwrap_or_else(|| self.next_live(self.dealer))
    }

    fn record(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        self.history.push(HandHistoryEntry { seat, verb, amount, stage: self.stage });
    }

    /// Next seat clockwise from `from` that is not out; `from` if none is.
    fn next_live(&self, from: usize) -> usize {
        let n = self.seats.len();
        (1..=n).map(|k| (from + k) % n).find(|&i| !self.seats[i].out).unwrap_or(from)
    }

    /// Seats not out, clockwise starting at `first`.
    fn live_from(&self, first: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.seats.len();
        (0..n).map(move |k| (first + k) % n).filter(move |&i| !self.seats[i].out)
    }

    fn live_seats(&self) -> usize {
        self.seats.iter().filter(|s| !s.out).count()
    }

    fn remaining_in_hand(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand()).count()
    }

    fn able_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::FixedDraws;
    use crate::cards::parse_cards;

    fn game_with(cards: &str, config: TableConfig) -> Game {
        let mut g = Game::new(config).unwrap();
        g.set_draw_source(Box::new(FixedDraws::constant(0.99)));
        g.queue_deck(Deck::stacked(&parse_cards(cards).unwrap()));
        g
    }

    #[test]
    fn action_parsing() {
        assert_eq!("fold".parse::<Action>().unwrap(), Action::Fold);
        assert_eq!("K".parse::<Action>().unwrap(), Action::Check);
        assert_eq!("call".parse::<Action>().unwrap(), Action::Call);
        assert_eq!("raise 200".parse::<Action>().unwrap(), Action::Raise(200));
        assert!(matches!("raise lots".parse::<Action>(), Err(ParseActionError::Amount(_))));
        assert!(matches!("dance".parse::<Action>(), Err(ParseActionError::Unknown(_))));
    }

    #[test]
    fn blinds_and_first_actor() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        g.start_new_round().unwrap();
        assert_eq!(g.dealer(), 0);
        assert_eq!(g.seats()[1].chips(), 1950);
        assert_eq!(g.seats()[2].chips(), 1900);
        assert_eq!(g.current_bet(), 100);
        assert_eq!(g.last_aggressor(), Some(2));
        assert_eq!(g.current_actor(), Some(0));
        assert_eq!(g.amount_to_call(0), 100);
        assert_eq!(g.amount_to_call(1), 50);
        assert_eq!(g.amount_to_call(99), 0);
        assert_eq!(g.message(), "Your turn to act.");
        assert_eq!(g.pot_total(), 150);
    }

    #[test]
    fn hole_cards_dealt_left_of_dealer_in_two_passes() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        g.start_new_round().unwrap();
        assert_eq!(g.seats()[1].hand(), parse_cards("9s 9h").unwrap().as_slice());
        assert_eq!(g.seats()[2].hand(), parse_cards("8c 2d").unwrap().as_slice());
        assert_eq!(g.seats()[0].hand(), parse_cards("As Ah").unwrap().as_slice());
    }

    #[test]
    fn human_raise_is_clamped() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        g.start_new_round().unwrap();
        assert_eq!(g.clamp_raise(0, 1), 100);
        assert_eq!(g.clamp_raise(0, 5000), 2000);
        assert_eq!(g.clamp_raise(0, 300), 300);
    }

    #[test]
    fn rejects_out_of_turn_actions_without_change() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        assert_eq!(g.handle_player_action(Action::Call), Err(ActionError::HandOver));
        g.start_new_round().unwrap();
        let before = g.total_chips();
        assert_eq!(g.act_as(1, Action::Call), Err(ActionError::NotYourTurn(1)));
        assert_eq!(g.seats()[1].chips(), 1950);
        assert_eq!(g.total_chips(), before);
        assert_eq!(g.current_actor(), Some(0));
    }

    #[test]
    fn check_facing_a_bet_folds() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        g.start_new_round().unwrap();
        g.handle_player_action(Action::Check).unwrap();
        assert!(g.seats()[0].is_folded());
        assert_eq!(g.history()[2].verb, HandHistoryVerb::Fold);
    }

    #[test]
    fn bots_only_table_has_no_human_actions() {
        let cfg = TableConfig::default().bots_only().with_seed(5);
        let mut g = Game::new(cfg).unwrap();
        g.start_new_round().unwrap();
        assert!(!g.is_hand_in_progress());
        assert_eq!(g.stage(), Stage::HandOver);
        assert_eq!(g.handle_player_action(Action::Fold), Err(ActionError::NoHumanSeat));
        assert_eq!(g.total_chips(), 6000);
    }

    #[test]
    fn guidance_needs_cards() {
        let mut g = game_with("9s 8c As 9h 2d Ah", TableConfig::default());
        assert!(g.guidance().is_none());
        g.start_new_round().unwrap();
        let guide = g.guidance().unwrap();
        assert_eq!(guide.best, Category::Pair);
    }

    #[test]
    fn opponent_cards_show_only_after_the_hand() {
        let mut g = game_with("9s 8c As 9h 2d Ah Kd 7c 4h Jc 3s", TableConfig::default());
        g.start_new_round().unwrap();
        assert!(g.guidance_against(1).is_none(), "hidden mid-hand");

        g.handle_player_action(Action::Fold).unwrap();
        assert!(!g.is_hand_in_progress());
        let guide = g.guidance_against(1).unwrap();
        assert_eq!(guide.best, Category::Pair);
        assert_eq!(guide.opponent, Some(Category::Pair));
        assert!(guide.to_string().contains("Opponent's Hand: a Pair (Strength: 2)"));

        assert!(g.guidance_against(0).is_none());
        assert!(g.guidance_against(9).is_none());
    }
}
