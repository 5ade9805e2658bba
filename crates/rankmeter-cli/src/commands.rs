//! Interactive editing commands.
//!
//! Each input line parses into one [`Command`], which is then applied to the
//! [`RankingList`]. Positions are 1-indexed, matching the numbering printed
//! next to each row.

use anyhow::{anyhow, bail, Context, Result};
use rankmeter_core::ranking::{RankingList, SortOrder};

/// A single editing or display command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the grade text at a position (empty text clears it)
    Grade { position: usize, text: String },
    /// Set the relevance flag, or toggle it when no value is given
    Relevance {
        position: usize,
        value: Option<bool>,
    },
    /// Change the max grade
    MaxGrade(u32),
    /// Change the cutoff k
    Cutoff(usize),
    /// Append an empty item
    Add,
    /// Remove the last item
    Pop,
    /// Insert an empty item at a position
    Insert(usize),
    /// Remove the item at a position
    Remove(usize),
    /// Move an item from one position to another
    Move { from: usize, to: usize },
    /// Random grades and relevance flags
    Random,
    /// Random order
    Shuffle,
    /// Sort by grade
    Sort(SortOrder),
    /// Print the list and metrics
    Show,
    /// Print metrics at every cutoff
    Sweep,
    /// Print metric definitions
    Formulas,
    /// Print command help
    Help,
    /// End the session
    Quit,
}

/// What the session should print after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The list or metrics changed (or were requested): print them
    Render,
    Sweep,
    Formulas,
    Help,
    Quit,
}

/// Parses one line of input. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match name.as_str() {
        "grade" | "g" => {
            let (position, rest) = args
                .split_first()
                .ok_or_else(|| anyhow!("usage: grade <pos> [value]"))?;
            Command::Grade {
                position: parse_position(position)?,
                text: rest.join(" "),
            }
        }
        "rel" | "r" => {
            expect_args(&args, 1, 2, "rel <pos> [on|off]")?;
            Command::Relevance {
                position: parse_position(args[0])?,
                value: args.get(1).map(|v| parse_flag(v)).transpose()?,
            }
        }
        "max" => {
            expect_args(&args, 1, 1, "max <n>")?;
            Command::MaxGrade(
                args[0]
                    .parse()
                    .with_context(|| format!("Invalid max grade: {}", args[0]))?,
            )
        }
        "k" | "cutoff" => {
            expect_args(&args, 1, 1, "k <n>")?;
            Command::Cutoff(
                args[0]
                    .parse()
                    .with_context(|| format!("Invalid cutoff: {}", args[0]))?,
            )
        }
        "add" => {
            expect_args(&args, 0, 0, "add")?;
            Command::Add
        }
        "pop" => {
            expect_args(&args, 0, 0, "pop")?;
            Command::Pop
        }
        "insert" => {
            expect_args(&args, 1, 1, "insert <pos>")?;
            Command::Insert(parse_position(args[0])?)
        }
        "remove" | "rm" => {
            expect_args(&args, 1, 1, "remove <pos>")?;
            Command::Remove(parse_position(args[0])?)
        }
        "move" | "mv" => {
            expect_args(&args, 2, 2, "move <from> <to>")?;
            Command::Move {
                from: parse_position(args[0])?,
                to: parse_position(args[1])?,
            }
        }
        "random" => {
            expect_args(&args, 0, 0, "random")?;
            Command::Random
        }
        "shuffle" => {
            expect_args(&args, 0, 0, "shuffle")?;
            Command::Shuffle
        }
        "sort" => {
            expect_args(&args, 0, 1, "sort [desc|asc]")?;
            let order = match args.first().copied().unwrap_or("desc") {
                "desc" | "max" => SortOrder::Descending,
                "asc" | "min" => SortOrder::Ascending,
                other => bail!("Unknown sort order: {} (expected desc or asc)", other),
            };
            Command::Sort(order)
        }
        "show" | "ls" => Command::Show,
        "sweep" => Command::Sweep,
        "formulas" => Command::Formulas,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("Unknown command: {} (type `help` for a list)", other),
    };

    Ok(Some(command))
}

/// Applies a command to the list.
pub fn apply(list: &mut RankingList, command: Command) -> Result<Outcome> {
    match command {
        Command::Grade { position, text } => {
            let index = index_for(list, position)?;
            list.set_grade(index, text)?;
        }
        Command::Relevance { position, value } => {
            let index = index_for(list, position)?;
            match value {
                Some(relevant) => list.set_relevance(index, relevant)?,
                None => {
                    list.toggle_relevance(index)?;
                }
            }
        }
        Command::MaxGrade(max_grade) => list.set_max_grade(max_grade),
        Command::Cutoff(k) => {
            list.set_cutoff(k);
        }
        Command::Add => {
            list.push_item();
        }
        Command::Pop => {
            list.pop_item()?;
        }
        Command::Insert(position) => {
            // Inserting one past the end appends
            if position == 0 || position > list.len() + 1 {
                bail!(
                    "Position {} is out of range (1..={})",
                    position,
                    list.len() + 1
                );
            }
            list.insert_item(position - 1)?;
        }
        Command::Remove(position) => {
            let index = index_for(list, position)?;
            list.remove_item(index)?;
        }
        Command::Move { from, to } => {
            let from = index_for(list, from)?;
            let to = index_for(list, to)?;
            list.move_item(from, to)?;
        }
        Command::Random => list.randomize(),
        Command::Shuffle => list.shuffle(),
        Command::Sort(order) => list.sort_by_grade(order),
        Command::Show => {}
        Command::Sweep => return Ok(Outcome::Sweep),
        Command::Formulas => return Ok(Outcome::Formulas),
        Command::Help => return Ok(Outcome::Help),
        Command::Quit => return Ok(Outcome::Quit),
    }
    Ok(Outcome::Render)
}

/// Parses a relevance flag: `1/0`, `true/false`, `yes/no`, `on/off`, `y/n`.
pub fn parse_flag(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" | "" => Ok(false),
        other => Err(anyhow!("Invalid relevance flag: {}", other)),
    }
}

fn parse_position(text: &str) -> Result<usize> {
    let position: usize = text
        .parse()
        .with_context(|| format!("Invalid position: {}", text))?;
    if position == 0 {
        bail!("Positions start at 1");
    }
    Ok(position)
}

/// Converts a 1-indexed position into a list index, checking it exists.
fn index_for(list: &RankingList, position: usize) -> Result<usize> {
    if position == 0 || position > list.len() {
        bail!(
            "Position {} is out of range (1..={})",
            position,
            list.len()
        );
    }
    Ok(position - 1)
}

fn expect_args(args: &[&str], min: usize, max: usize, usage: &str) -> Result<()> {
    if args.len() < min || args.len() > max {
        bail!("usage: {}", usage);
    }
    Ok(())
}
