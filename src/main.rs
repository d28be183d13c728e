//! srs - SM-2 spaced repetition trainer
//!
//! Command-line host around the scheduling engine: owns the card store, the
//! config file, and the clock, and drives review sessions in the terminal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local};
use clap::{Parser, Subcommand};

use srs_engine::analytics;
use srs_engine::config::Config;
use srs_engine::interchange;
use srs_engine::models::ReviewCard;
use srs_engine::schedule::build_schedule;
use srs_engine::sequencer;
use srs_engine::session::ReviewSession;
use srs_engine::sm2;
use srs_engine::storage::CardStore;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "srs")]
#[command(author, version, about = "SM-2 spaced repetition trainer", long_about = None)]
struct Cli {
    /// Path to the card store (defaults to the platform data directory)
    #[arg(short, long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new card
    Add {
        question: String,
        answer: String,
        /// Category used for interleaving and per-topic statistics
        #[arg(short, long, default_value = "General")]
        category: String,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// List every card with its scheduling state
    List,
    /// Show today's schedule buckets
    Due,
    /// Run an interactive review session over today's queue
    Review {
        /// Cap on new cards pulled into the session
        #[arg(short, long)]
        new_limit: Option<usize>,
    },
    /// Print collection statistics
    Stats,
    /// Print the upcoming review load per day
    Forecast {
        /// Number of days to project
        #[arg(short, long)]
        days: Option<usize>,
    },
    /// Import cards from a tab-separated text file
    Import { file: PathBuf },
    /// Export all cards to a tab-separated text file
    Export { file: PathBuf },
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    let store = CardStore::new(cli.store.unwrap_or_else(CardStore::default_path))?;

    match cli.command {
        Command::Add {
            question,
            answer,
            category,
            tags,
        } => cmd_add(&store, question, answer, category, tags),
        Command::List => cmd_list(&store),
        Command::Due => cmd_due(&store),
        Command::Review { new_limit } => cmd_review(&store, &config, new_limit),
        Command::Stats => cmd_stats(&store),
        Command::Forecast { days } => cmd_forecast(&store, &config, days),
        Command::Import { file } => cmd_import(&store, &file),
        Command::Export { file } => cmd_export(&store, &file),
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════════════════

fn cmd_add(
    store: &CardStore,
    question: String,
    answer: String,
    category: String,
    tags: Option<String>,
) -> Result<()> {
    let mut cards = store.load()?;

    let tags: Vec<String> = tags
        .map(|t| {
            t.split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let card = ReviewCard::new(question, answer, category, tags, Local::now());
    println!("✓ Added '{}' [{}]", card.question, card.category);

    cards.push(card);
    store.save(&cards)
}

fn cmd_list(store: &CardStore) -> Result<()> {
    let cards = store.load()?;
    if cards.is_empty() {
        println!("No cards yet. Add one with `srs add`.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    for card in &cards {
        let due = if card.is_new() {
            "new".to_string()
        } else if card.is_due(today) {
            "due now".to_string()
        } else {
            format!("due {}", card.next_review_date.format("%Y-%m-%d"))
        };
        println!(
            "[{}] {} | {} | ease {:.2}, interval {}d, streak {}",
            card.category,
            card.question,
            due,
            card.ease_factor,
            card.interval,
            card.statistics.streak_count
        );
    }
    Ok(())
}

fn cmd_due(store: &CardStore) -> Result<()> {
    let cards = store.load()?;
    let today = Local::now().date_naive();
    let schedule = build_schedule(&cards, today);

    println!("Schedule for {}:", today.format("%Y-%m-%d"));
    println!("  overdue:   {}", schedule.overdue.len());
    println!("  today:     {}", schedule.today.len());
    println!("  new:       {}", schedule.new.len());
    println!("  learning:  {}", schedule.learning.len());
    println!("  graduated: {}", schedule.graduated.len());

    for card in &schedule.overdue {
        let late = (today - card.next_review_date.date_naive()).num_days();
        println!("  ! {} ({} day(s) late)", card.question, late);
    }
    for card in &schedule.today {
        println!("  • {}", card.question);
    }
    Ok(())
}

fn cmd_review(store: &CardStore, config: &Config, new_limit: Option<usize>) -> Result<()> {
    let mut cards = store.load()?;
    let today = Local::now().date_naive();
    let new_limit = new_limit.unwrap_or(config.new_per_session);

    // The schedule borrows the collection, so resolve the queue to ids
    // before any card is rewritten.
    let queue_ids: Vec<String> = {
        let schedule = build_schedule(&cards, today);
        let queue = schedule.due_queue(new_limit);
        sequencer::optimal_order(&queue)
            .iter()
            .map(|card| card.id.clone())
            .collect()
    };

    if queue_ids.is_empty() {
        println!("Nothing to review today.");
        return Ok(());
    }

    println!(
        "{} card(s) to review. Press Enter to reveal the answer, then rate 0-5 (q to stop).\n",
        queue_ids.len()
    );

    let mut session = ReviewSession::new(Local::now());
    let stdin = io::stdin();
    let mut line = String::new();

    'queue: for id in &queue_ids {
        let pos = match cards.iter().position(|card| card.id == *id) {
            Some(pos) => pos,
            None => continue,
        };

        println!("[{}] {}", cards[pos].category, cards[pos].question);
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        println!("  → {}", cards[pos].answer);

        let quality = loop {
            print!("  quality 0-5> ");
            io::stdout().flush()?;
            line.clear();
            if stdin.read_line(&mut line)? == 0 {
                break 'queue;
            }
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") {
                break 'queue;
            }
            match input.parse::<u8>() {
                Ok(q) if q <= 5 => break q,
                _ => println!("  enter a number from 0 to 5, or q to stop"),
            }
        };

        cards[pos] = sm2::next_review(&cards[pos], quality, Local::now());
        session.record(quality);
        println!();
    }

    session.finish(Local::now());
    store.save(&cards)?;

    println!(
        "Session done: {} reviewed, {} correct ({:.0}%).",
        session.cards_reviewed,
        session.correct_answers,
        session.accuracy()
    );
    if let Some(elapsed) = session.duration() {
        println!(
            "Took {}m {}s.",
            elapsed.num_minutes(),
            elapsed.num_seconds() % 60
        );
    }
    Ok(())
}

fn cmd_stats(store: &CardStore) -> Result<()> {
    let cards = store.load()?;
    let today = Local::now().date_naive();
    let insights = analytics::learning_insights(&cards, today);

    println!("Collection: {} card(s)", insights.total_cards);
    println!("  to review today: {}", insights.cards_to_review_today);
    println!(
        "  new {}, learning {}, graduated {}",
        insights.new_cards, insights.learning_cards, insights.graduated_cards
    );
    println!("Retention: {:.1}%", insights.retention_rate);
    println!("Average ease factor: {:.2}", insights.average_ease_factor);
    println!("Problem cards (ease < 2.0): {}", insights.problem_cards);

    let streaks = &insights.streak_stats;
    println!(
        "Streaks: best {}, average {:.1}, {} card(s) on a streak",
        streaks.current_streak, streaks.average_streak, streaks.cards_on_streak
    );

    let time = &insights.time_investment;
    println!(
        "Time: ~{} min today, ~{} min this week, ~{} min/day",
        time.today_minutes, time.weekly_minutes, time.average_per_day
    );

    if !insights.category_stats.is_empty() {
        println!("\nBy category:");
        for cat in &insights.category_stats {
            println!(
                "  {:<20} {:>4} card(s)  retention {:>5.1}%  ease {:.2}",
                cat.name, cat.total, cat.retention, cat.avg_ease_factor
            );
        }
    }
    Ok(())
}

fn cmd_forecast(store: &CardStore, config: &Config, days: Option<usize>) -> Result<()> {
    let cards = store.load()?;
    let today = Local::now().date_naive();
    let days = days.unwrap_or(config.forecast_days);
    let forecast = analytics::review_forecast(&cards, today, days);

    println!("Review load for the next {} day(s):", days);
    for (offset, count) in forecast.iter().enumerate() {
        let date = today + Duration::days(offset as i64);
        println!(
            "  {}  {:>3}  {}",
            date.format("%Y-%m-%d"),
            count,
            "#".repeat(*count as usize)
        );
    }
    Ok(())
}

fn cmd_import(store: &CardStore, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {:?}", file))?;
    let imported = interchange::import_txt(&text, Local::now());

    let mut cards = store.load()?;
    let count = imported.len();
    cards.extend(imported);
    store.save(&cards)?;

    println!("✓ Imported {} card(s) from {}", count, file.display());
    Ok(())
}

fn cmd_export(store: &CardStore, file: &Path) -> Result<()> {
    let cards = store.load()?;
    let text = interchange::export_txt(&cards);
    fs::write(file, text)
        .with_context(|| format!("Failed to write export file: {:?}", file))?;

    println!("✓ Exported {} card(s) to {}", cards.len(), file.display());
    Ok(())
}
