use anyhow::{anyhow, Context, Result};

use crate::source::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Play {
        difficulty: Option<Difficulty>,
        amount: Option<u32>,
    },
    Select(usize),
    Lock,
    Next,
    Back,
    Results,
    Restart,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().context("Empty command")?.to_lowercase();

    let command = match keyword.as_str() {
        "play" | "start" => parse_play(tokens)?,
        "a" => Command::Select(0),
        "b" => Command::Select(1),
        "c" => Command::Select(2),
        "d" => Command::Select(3),
        "lock" | "submit" => Command::Lock,
        "next" => Command::Next,
        "back" | "prev" => Command::Back,
        "results" => Command::Results,
        "restart" => Command::Restart,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(anyhow!("Unknown command: {} (try `help`)", other)),
    };
    Ok(command)
}

fn parse_play<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<Command> {
    let mut difficulty = None;
    let mut amount = None;
    for token in tokens {
        if let Ok(parsed) = token.parse::<Difficulty>() {
            difficulty = Some(parsed);
        } else if let Ok(parsed) = token.parse::<u32>() {
            amount = Some(parsed);
        } else {
            return Err(anyhow!(
                "Expected a difficulty or a question count, got: {}",
                token
            ));
        }
    }
    Ok(Command::Play { difficulty, amount })
}
