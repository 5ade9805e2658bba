//! Interactive editing session.
//!
//! Reads one command per line, applies it to the list, and prints the
//! refreshed list and metrics. A bad command prints an error and the
//! session carries on; only `quit` or end of input ends it.

use crate::commands::{apply, parse_command, Outcome};
use crate::output;
use anyhow::Result;
use rankmeter_core::ranking::RankingList;
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Runs the session until `quit` or end of input.
///
/// # Arguments
///
/// * `list` - The list to edit
/// * `json` - Render the list as JSON instead of the human layout
/// * `input` - Command source (stdin in normal use)
/// * `out` - Destination for rendered output
pub fn run<R: BufRead, W: Write>(
    list: &mut RankingList,
    json: bool,
    input: R,
    mut out: W,
) -> Result<()> {
    info!("Starting interactive session with {} items", list.len());
    render(list, json, &mut out)?;
    if !json {
        writeln!(out, "Type `help` for commands.")?;
    }

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match apply(list, command) {
            Ok(Outcome::Render) => render(list, json, &mut out)?,
            Ok(Outcome::Sweep) => {
                let sweep = list.sweep();
                let text = if json {
                    output::format_sweep_json(&sweep)
                } else {
                    output::format_sweep_human(&sweep)
                };
                writeln!(out, "{}", text)?;
            }
            Ok(Outcome::Formulas) => writeln!(out, "{}", output::FORMULAS)?,
            Ok(Outcome::Help) => writeln!(out, "{}", output::HELP)?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                warn!("Command failed: {}", e);
                writeln!(out, "error: {}", e)?;
            }
        }
        out.flush()?;
    }

    info!("Session ended");
    Ok(())
}

fn render<W: Write>(list: &RankingList, json: bool, out: &mut W) -> Result<()> {
    let text = if json {
        output::format_json(list)
    } else {
        output::format_human(list)
    };
    writeln!(out, "{}\n", text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(list: &mut RankingList, script: &str) -> String {
        let mut out = Vec::new();
        run(list, false, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_applies_commands() {
        let mut list = RankingList::with_len(6);
        let script = "\
grade 1 3
grade 2 2
grade 3 3
grade 4 0
grade 5 1
grade 6 2
rel 1
rel 2
rel 5
";
        let output = run_script(&mut list, script);
        assert!(output.contains("NDCG@6: 0.9488"));
        assert!(output.contains("MAP@6: 0.8667"));
        assert_eq!(list.snapshot().precision, 0.5);
    }

    #[test]
    fn test_session_survives_errors() {
        let mut list = RankingList::with_len(2);
        let output = run_script(&mut list, "bogus\ngrade 9 1\npop\npop\nk 5\n");
        assert!(output.contains("error: Unknown command: bogus"));
        assert!(output.contains("error: Position 9 is out of range (1..=2)"));
        assert!(output.contains("error: Cannot remove the last remaining item"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.cutoff(), 1);
    }

    #[test]
    fn test_json_session_output_is_pure_json() {
        let mut list = RankingList::with_len(3);
        let mut out = Vec::new();
        run(&mut list, true, "".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["items"].as_array().map(Vec::len), Some(3));
        assert!(!text.contains("Type `help`"));
    }

    #[test]
    fn test_session_stops_at_quit() {
        let mut list = RankingList::with_len(3);
        run_script(&mut list, "add\nquit\nadd\n");
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_session_prints_reference_text() {
        let mut list = RankingList::with_len(2);
        let output = run_script(&mut list, "formulas\nhelp\nsweep\n");
        assert!(output.contains("IDCG@k"));
        assert!(output.contains("move <from> <to>"));
        assert!(output.contains("Precision"));
    }
}
