use clap::Parser;
use holdem_engine::bot::Difficulty;
use holdem_engine::cards::format_cards;
use holdem_engine::config::TableConfig;
use holdem_engine::engine::TableEngine;
use holdem_engine::game::{Action, Game};
use log::error;
use std::io::{self, BufRead, Write};

#[derive(Debug, Parser)]
#[clap(version, about = "Play Texas Hold'em against rule-driven bots.")]
struct Cli {
    /// Starting chips per seat.
    #[clap(long, default_value_t = 2000)]
    chips: u64,
    /// Small blind.
    #[clap(long, default_value_t = 50)]
    small_blind: u64,
    /// Big blind.
    #[clap(long, default_value_t = 100)]
    big_blind: u64,
    /// Bot difficulty: easy, medium or hard.
    #[clap(long, short, default_value = "easy")]
    difficulty: String,
    /// Seed for reproducible shuffles and bot play.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Let three bots play each other instead of taking a seat.
    #[clap(long)]
    watch: bool,
    /// Number of hands to watch.
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=10_000))]
    hands: u32,
}

const HELP: &str = "commands: fold | check | call | raise <n> | next | guide | reveal <seat> | difficulty | history | help | quit";

fn main() -> io::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = TableConfig::default()
        .with_chips(cli.chips)
        .with_blinds(cli.small_blind, cli.big_blind)
        .with_difficulty(Difficulty::from_label(&cli.difficulty));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if cli.watch {
        config = config.bots_only();
    }

    let mut game = match Game::new(config) {
        Ok(g) => g,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    if cli.watch {
        watch(&mut game, cli.hands);
        return Ok(());
    }
    play(&mut game)
}

fn watch(game: &mut Game, hands: u32) {
    for _ in 0..hands {
        if let Err(e) = game.start_new_round() {
            println!("{e}");
            break;
        }
        render(game);
    }
}

fn play(game: &mut Game) -> io::Result<()> {
    println!("holdem {} ({} bots)", holdem_engine::VERSION, game.difficulty());
    println!("{HELP}");
    start(game);

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let cmd = line.trim();
        match cmd.to_ascii_lowercase().as_str() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "help" | "?" => println!("{HELP}"),
            "n" | "next" => start(game),
            "g" | "guide" => match game.guidance() {
                Some(g) => println!("{g}"),
                None => println!("No cards yet."),
            },
            _ if cmd.starts_with("reveal") => {
                let seat = cmd["reveal".len()..].trim().parse::<usize>().ok();
                match seat.and_then(|i| game.guidance_against(i)) {
                    Some(g) => println!("{g}"),
                    None => println!("Usage: reveal <seat>, once the hand is over."),
                }
            }
            "d" | "difficulty" => {
                let next = game.difficulty().next();
                game.set_difficulty(next);
                println!("Bots are now {next}.");
            }
            "h" | "history" => {
                for e in game.history_recent(12) {
                    let who = game.seat(e.seat).map_or("?", |s| s.name());
                    match e.amount {
                        Some(a) => println!("  [{}] {who}: {} {a}", e.stage, e.verb.label()),
                        None => println!("  [{}] {who}: {}", e.stage, e.verb.label()),
                    }
                }
            }
            _ => match cmd.parse::<Action>() {
                Ok(action) => match game.handle_player_action(action) {
                    Ok(()) => render(game),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("{e}. {HELP}"),
            },
        }
        if game.is_game_over() && !game.is_hand_in_progress() {
            println!("Game over! Thank you for playing.");
            break;
        }
    }

    let stats = game.stats();
    println!("Hands played: {}, hands won: {}", stats.hands_played, stats.hands_won);
    Ok(())
}

fn start(game: &mut Game) {
    match game.start_new_round() {
        Ok(()) => render(game),
        Err(e) => println!("{e}"),
    }
}

fn render(table: &dyn TableEngine) {
    println!();
    println!("-- {} --", table.stage());
    if !table.community().is_empty() {
        println!("Board: {}", format_cards(table.community()));
    }
    for (i, s) in table.seats().iter().enumerate() {
        let button = if i == table.dealer() { " (D)" } else { "" };
        let status = if s.is_out() {
            " out"
        } else if s.is_folded() {
            " folded"
        } else if s.is_all_in() {
            " all-in"
        } else {
            ""
        };
        let shown = s.is_human() || table.last_result().is_some();
        let cards = if shown && !s.hand().is_empty() {
            format_cards(s.hand())
        } else if s.hand().is_empty() {
            String::new()
        } else {
            "?? ??".to_string()
        };
        println!("{:>8}{button}: ${:<6} {cards}{status}", s.name(), s.chips());
    }
    let pots = table.pots();
    if pots.len() > 1 {
        let sides: Vec<String> = pots[1..].iter().map(|p| format!("${}", p.amount)).collect();
        println!("Pot: ${} (side {})", pots[0].amount, sides.join(", "));
    } else {
        println!("Pot: ${}", table.pot_total());
    }
    println!("{}", table.message());
    if let Some(seat) = table.awaiting_human() {
        let to_call = table.amount_to_call(seat);
        if to_call > 0 {
            println!("To call: ${to_call}");
        }
    }
}
