use std::io::{self, Write};

use bankist_lib::{Countdown, Order, Render, View};

/// Prints views as plain text, newest movement at the top
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, view: &View) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", view.welcome)?;

        if view.visible {
            writeln!(self.out, "Current balance (as of {}): {}", view.date, view.balance)?;
            if view.order == Order::ByAmount {
                writeln!(self.out, "  (sorted by amount)")?;
            }
            for row in view.rows.iter().rev() {
                writeln!(
                    self.out,
                    "  {:>3} {:<10}  {:<12}  {:>16}",
                    row.number,
                    row.kind.to_string(),
                    row.date,
                    row.amount
                )?;
            }
            writeln!(
                self.out,
                "In: {}  Out: {}  Interest: {}",
                view.total_in, view.total_out, view.interest
            )?;
            writeln!(self.out, "You will be logged out in {}", view.timer)?;
        }

        self.out.flush()
    }

    /// Only the last ten seconds and whole minutes are worth interrupting for
    fn countdown(&mut self, countdown: Countdown) -> io::Result<()> {
        let remaining = countdown.remaining();
        if remaining <= 10 || remaining % 60 == 0 {
            writeln!(self.out, "You will be logged out in {}", countdown)?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn alert(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "! {}", message)?;
        self.out.flush()
    }
}
