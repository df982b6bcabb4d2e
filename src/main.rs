use anyhow::Result;
use parking_lot::Mutex;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

mod commands;
mod game;
mod output;
mod score;
mod source;

use crate::commands::Command;
use crate::game::quiz::definition::QuestionBank;
use crate::game::settings::Settings;
use crate::game::Game;
use crate::output::terminal::TerminalOutput;
use crate::score::FileScoreStore;
use crate::source::OpenTriviaClient;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

type TerminalGame = Game<TerminalOutput, FileScoreStore>;

fn main() -> Result<()> {
    env_logger::init();

    let bank = match std::env::var_os("QUICKFIRE_QUESTION_BANK") {
        Some(path) => QuestionBank::open(&PathBuf::from(path))?,
        None => QuestionBank::builtin().clone(),
    };
    let store = FileScoreStore::in_user_data_dir()?;
    let game = Arc::new(Mutex::new(Game::new(
        bank,
        Settings::default(),
        TerminalOutput::new(),
        store,
    )));

    {
        let game = Arc::clone(&game);
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                thread::sleep(TICK_INTERVAL);
                let now = Instant::now();
                game.lock().tick(now - last_tick);
                last_tick = now;
            }
        });
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&game, command),
            Err(e) => println!("{}", e),
        }
    }

    Ok(())
}

fn dispatch(game: &Arc<Mutex<TerminalGame>>, command: Command) {
    let mut game = game.lock();
    let result = match command {
        Command::Play { difficulty, amount } => {
            trivia_client().and_then(|client| game.begin(client, difficulty, amount))
        }
        Command::Select(index) => {
            game.select(index);
            Ok(())
        }
        Command::Lock => {
            game.lock_answer();
            Ok(())
        }
        Command::Next => {
            game.advance();
            Ok(())
        }
        Command::Back => {
            game.retreat();
            Ok(())
        }
        Command::Results => {
            game.show_results();
            Ok(())
        }
        Command::Restart => {
            game.restart();
            Ok(())
        }
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    if let Err(e) = result {
        println!("{:#}", e);
    }
}

fn trivia_client() -> Result<OpenTriviaClient> {
    match std::env::var("QUICKFIRE_API_URL") {
        Ok(url) => OpenTriviaClient::with_base_url(&url),
        Err(_) => OpenTriviaClient::new(),
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 play [easy|medium|hard] [amount]  start a quiz (5-10 questions)\n\
         \x20 a / b / c / d                     pick an option\n\
         \x20 lock                              lock in your answer\n\
         \x20 next / back                       move between questions\n\
         \x20 results                           show the results of the last quiz\n\
         \x20 restart                           abandon the quiz and return to setup\n\
         \x20 quit                              leave the game"
    );
}
