use crate::display::{draw, status_message};
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use tmsim::session::delay_from_factor;
use tmsim::{RunOptions, RunStatus, Session, Snapshot};

const MENU: &str = "Enter 's' to step, 'run k' to run with k x 0.1s between steps, \
'input <symbols>' to replace the input, 'reset', 'dump' or 'q' to quit:";

/// A console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Step,
    Run(u32),
    Input(String),
    Reset,
    Dump,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word {
            "s" | "step" => Ok(Command::Step),
            "run" => rest
                .parse()
                .map(Command::Run)
                .map_err(|_| "Usage: run <k>  (k x 0.1s between steps)".to_string()),
            "input" => Ok(Command::Input(rest.to_string())),
            "reset" => Ok(Command::Reset),
            "dump" => Ok(Command::Dump),
            "q" | "quit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: '{other}'")),
        }
    }
}

/// Drives a session from line-based commands, writing the tape display to `out`.
pub struct Console<W: Write> {
    session: Session,
    out: W,
    window: usize,
    max_steps: usize,
    interactive: bool,
}

impl<W: Write> Console<W> {
    pub fn new(
        session: Session,
        out: W,
        window: usize,
        max_steps: usize,
        interactive: bool,
    ) -> Self {
        Self {
            session,
            out,
            window,
            max_steps,
            interactive,
        }
    }

    /// Reads commands until `q` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.show_input()?;
        self.display()?;
        self.prompt()?;

        for line in input.lines() {
            match Command::parse(&line?) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(message) => writeln!(self.out, "{message}")?,
            }
            self.prompt()?;
        }

        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Step => {
                let outcome = self.session.step();
                self.display()?;
                if let Some(status) = outcome.status() {
                    writeln!(self.out, "{}", status_message(status))?;
                }
            }
            Command::Run(factor) => {
                self.auto_run(factor)?;
            }
            Command::Input(text) => {
                self.session.change_input(&text);
                self.show_input()?;
                self.display()?;
            }
            Command::Reset => {
                self.session.reset();
                self.display()?;
            }
            Command::Dump => write!(self.out, "{}", self.session.definition())?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Steps until the machine halts or the step ceiling is hit, redrawing after each step
    /// and pausing `factor` x 100ms in between.
    pub fn auto_run(&mut self, factor: u32) -> io::Result<RunStatus> {
        let options = RunOptions {
            delay: delay_from_factor(factor),
            max_steps: Some(self.max_steps),
        };

        let Self {
            session,
            out,
            window,
            interactive,
            ..
        } = self;
        let mut failure = None;

        let report = session.run(&options, |machine, _| {
            let snapshot = Snapshot::capture(machine, *window);
            match draw(out, &snapshot, *interactive).and_then(|_| out.flush()) {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    failure = Some(e);
                    ControlFlow::Break(())
                }
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }

        writeln!(self.out, "{}", status_message(report.status))?;
        Ok(report.status)
    }

    /// Prints the whole allocated tape, lowest offset first.
    pub fn show_tape(&mut self) -> io::Result<()> {
        let tape = self.session.machine().tape().contents().join(" ");
        writeln!(self.out, "Final tape: {tape}")
    }

    fn show_input(&mut self) -> io::Result<()> {
        let input = self.session.current_input().join(" ");
        writeln!(self.out, "Current Input Tape: {input}")
    }

    fn display(&mut self) -> io::Result<()> {
        let snapshot = self.session.snapshot(self.window);
        draw(&mut self.out, &snapshot, self.interactive)
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.interactive {
            write!(self.out, "{MENU}\n>>> ")?;
        }
        self.out.flush()
    }
}
