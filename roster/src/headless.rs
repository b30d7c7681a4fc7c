//! Headless mode for the roster builder.
//!
//! A line-oriented interface for scripts and automated testing: each input
//! line is a creature name or a `#` command, and replies are printed with
//! bracketed tags such as `[TEAM]` and `[ERROR]`.

use roster_core::{headless::help_lines, HeadlessRoster, RosterError, SessionConfig};
use std::io::{self, BufRead, Write};

/// Run the roster builder in headless mode until `#quit` or end of input.
pub async fn run_headless(config: SessionConfig) -> Result<(), RosterError> {
    let mut roster = HeadlessRoster::new(config)?;

    println!("=== Roster Headless Mode ===");
    for line in help_lines() {
        println!("{line}");
    }
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let reply = roster.send(&line).await;
        for out in &reply.lines {
            println!("{out}");
        }
        stdout.flush().ok();

        if reply.quit {
            break;
        }
    }

    tracing::info!(
        teams = roster.session().history().len(),
        "headless session finished"
    );
    Ok(())
}
