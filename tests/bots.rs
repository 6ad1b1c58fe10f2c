use holdem_engine::bot::{decide, BotContext, Difficulty, FixedDraws};
use holdem_engine::cards::parse_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::deck::Deck;
use holdem_engine::evaluator::Category;
use holdem_engine::game::{Action, Game, HandHistoryVerb, Stage};
use proptest::prelude::*;

const BELOW_TWO_PAIR: [Category; 2] = [Category::HighCard, Category::Pair];

proptest! {
    #[test]
    fn easy_bot_folds_to_all_in_without_two_pair(
        draw in 0.0f64..1.0,
        which in 0usize..2,
        to_call in 1u64..5_000,
        short in 0u64..5_000,
        pot in 0u64..20_000,
    ) {
        let ctx = BotContext {
            strength: BELOW_TWO_PAIR[which],
            to_call,
            pot,
            stack: to_call.saturating_sub(short).max(1),
            current_bet: to_call,
            big_blind: 100,
        };
        prop_assert_eq!(decide(&ctx, &Difficulty::Easy.profile(), draw), Action::Fold);
    }

    #[test]
    fn bots_never_fold_when_checking_is_free(
        draw in 0.0f64..1.0,
        strength in 0usize..10,
        diff in 0usize..3,
        pot in 0u64..20_000,
    ) {
        let ctx = BotContext {
            strength: Category::ALL[strength],
            to_call: 0,
            pot,
            stack: 1_000,
            current_bet: 0,
            big_blind: 100,
        };
        let action = decide(&ctx, &Difficulty::ALL[diff].profile(), draw);
        prop_assert_ne!(action, Action::Fold);
        if let Action::Raise(n) = action {
            prop_assert!(n >= 100);
        }
    }
}

#[test]
fn unknown_difficulty_plays_like_easy() {
    assert_eq!(Difficulty::from_label("Impossible").profile(), Difficulty::Easy.profile());
}

#[test]
fn bot_with_a_pair_limps_in() {
    let mut g = Game::new(TableConfig::default()).unwrap();
    g.set_draw_source(Box::new(FixedDraws::constant(0.99)));
    g.queue_deck(Deck::stacked(&parse_cards("9s 8c As 9h 2d Ah").unwrap()));
    g.start_new_round().unwrap();
    g.handle_player_action(Action::Call).unwrap();

    assert_eq!(g.seats()[1].chips(), 1900, "small blind completes to the big blind");
    assert_eq!(g.stage(), Stage::Flop);
}

#[test]
fn hard_bot_folds_a_pair_preflop_and_bets_the_flop() {
    let cfg = TableConfig::default().with_difficulty(Difficulty::Hard);
    let mut g = Game::new(cfg).unwrap();
    g.set_draw_source(Box::new(FixedDraws::constant(0.0)));
    // Bot 1: pocket nines. Bot 2: pocket kings. Flop comes 2s 3s 4s.
    g.queue_deck(Deck::stacked(&parse_cards("9s Ks As 9h Kh Ah").unwrap()));
    g.start_new_round().unwrap();
    g.handle_player_action(Action::Call).unwrap();

    assert!(g.seats()[1].is_folded(), "hard bots need better odds to call");
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.last_aggressor(), Some(2));
    assert_eq!(g.current_bet(), 250, "pot-sized opening bet");
    assert_eq!(g.amount_to_call(0), 250);
    assert_eq!(g.current_actor(), Some(0));
    assert_eq!(g.message(), "Your turn to act.");
    let last = g.history().last().unwrap();
    assert_eq!((last.seat, last.verb, last.amount), (2, HandHistoryVerb::Raise, Some(250)));
}

#[test]
fn changing_difficulty_between_hands() {
    let mut g = Game::new(TableConfig::default().with_seed(3)).unwrap();
    assert_eq!(g.difficulty(), Difficulty::Easy);
    g.set_difficulty(g.difficulty().next());
    assert_eq!(g.difficulty(), Difficulty::Medium);
    assert_eq!(g.config().difficulty, Difficulty::Medium);
}
