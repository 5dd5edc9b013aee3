//! Terminal front-end for the geoquiz engine.
//!
//! Reads answers from stdin, one per line. `:hint`, `:skip` and `:quit`
//! are commands; anything else is submitted as an answer.

use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoquiz_core::{GameConfig, QuizCategory, SessionController, StaticCountries};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let category = match std::env::args().nth(1) {
        Some(arg) => QuizCategory::from_str(&arg)
            .ok_or_else(|| anyhow::anyhow!("unknown category: {arg}"))?,
        None => QuizCategory::Random,
    };
    tracing::info!(category = category.as_str(), "starting session");

    let mut game = SessionController::new(StaticCountries::default(), GameConfig::default());
    game.start_game(category)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print_question(&game);

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            ":quit" => break,
            ":hint" => match game.request_hint()? {
                Some(hint) => println!("Hint: {hint}"),
                None => println!("No hints left."),
            },
            ":skip" => {
                let answer = game
                    .question_view()
                    .map(|q| q.correct_answer)
                    .unwrap_or_default();
                game.skip_question()?;
                println!("Skipped. The answer was \"{answer}\".");
                advance(&mut game)?;
            }
            answer => {
                let outcome = game.submit_answer(answer)?;
                println!("{}", outcome.message);
                if outcome.is_correct {
                    println!("+{} points", outcome.points_awarded);
                    for notice in game.achievement_notifications() {
                        println!("{notice}");
                    }
                    advance(&mut game)?;
                }
            }
        }
        stdout.flush()?;
    }

    let session = game.end_game()?;
    println!("\n{}", game.session_summary());
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

fn advance(game: &mut SessionController<StaticCountries>) -> anyhow::Result<()> {
    println!("{}\n", game.progress_summary());
    game.next_question()?;
    print_question(game);
    Ok(())
}

fn print_question(game: &SessionController<StaticCountries>) {
    if let Some(question) = game.question_view() {
        println!("{}", question.question_text);
    }
}
