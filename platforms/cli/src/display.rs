use std::io::{self, Write};
use tmsim::{RunStatus, Snapshot};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes the tape window with a head marker above it, followed by the machine status.
pub fn render<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    // Each cell is printed followed by one space
    let column: usize = snapshot
        .cells
        .iter()
        .take(snapshot.head_index())
        .map(|cell| cell.chars().count() + 1)
        .sum();

    writeln!(out, "{}X", " ".repeat(column))?;
    writeln!(out, "{}", snapshot.cells.join(" "))?;
    writeln!(out, "Current State: {}", snapshot.state)?;
    writeln!(out, "Current Index on tape: {}", snapshot.head)?;
    writeln!(out, "Accepting states: {:?}", snapshot.accepting_states)?;
    writeln!(out, "Steps: {}", snapshot.step_count)
}

/// Clears the terminal first when attached to one.
pub fn draw<W: Write>(out: &mut W, snapshot: &Snapshot, interactive: bool) -> io::Result<()> {
    if interactive {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    render(out, snapshot)
}

pub fn status_message(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Accepted => "Accepted!",
        RunStatus::Rejected => "Rejected!",
        RunStatus::StepLimit => "Step limit reached, machine stopped.",
        RunStatus::Interrupted => "Run interrupted.",
    }
}
