use std::{io, time::Duration};

use bankist_lib::{Bank, Clock, Format, Render, SystemClock, Tick};
use clap::Parser;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
    time::{self, MissedTickBehavior},
};
use tracing::{instrument, Level};

use crate::{
    config,
    format::LocaleFormat,
    input::{Input, HELP},
    render::TerminalRenderer,
    Error,
};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Parser, Clone, Copy)]
pub struct Run;

impl Run {
    pub async fn run(self) -> Result<(), Error> {
        let settings = config::settings()?;
        let accounts = config::accounts()?;
        tracing::event!(Level::INFO, accounts = accounts.len(), "loaded accounts");

        let bank = Bank::new(accounts, settings, SystemClock);
        let mut renderer = TerminalRenderer::new(io::stdout());
        let lines = BufReader::new(tokio::io::stdin()).lines();

        renderer.alert(HELP)?;
        event_loop(bank, &LocaleFormat, &mut renderer, lines).await
    }
}

/// Drive the bank from input lines, the countdown ticker and loan due times
/// until the input ends or the user quits.
///
/// Everything runs on one task, so each event is handled to completion before
/// the next is looked at.
#[instrument(skip_all)]
async fn event_loop<C, F, R, I>(
    mut bank: Bank<C>,
    format: &F,
    renderer: &mut R,
    mut lines: Lines<I>,
) -> Result<(), Error>
where
    C: Clock,
    F: Format,
    R: Render,
    I: AsyncBufRead + Unpin,
{
    let mut ticker = time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut timer = None;

    renderer.render(&bank.view(format))?;

    loop {
        // a new countdown starts a full second from now, whatever the old
        // one was doing
        if bank.timer() != timer {
            timer = bank.timer();
            ticker.reset();
        }

        let loan_due = bank
            .next_loan_due()
            .map(|due| (due - bank.now()).to_std().unwrap_or_default());

        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                match line.parse::<Input>() {
                    Ok(Input::Quit) => break,
                    Ok(input) => handle(&mut bank, input, format, renderer)?,
                    Err(e) => renderer.alert(&e.to_string())?,
                }
            }

            _ = ticker.tick(), if timer.is_some() => {
                if let Some(id) = timer {
                    match bank.tick(id) {
                        Tick::Running(countdown) => renderer.countdown(countdown)?,
                        Tick::Expired(countdown) => {
                            renderer.countdown(countdown)?;
                            renderer.render(&bank.view(format))?;
                        }
                        Tick::Ignored => {}
                    }
                }
            }

            () = time::sleep(loan_due.unwrap_or_default()), if loan_due.is_some() => {
                if !bank.complete_due_loans().is_empty() {
                    renderer.render(&bank.view(format))?;
                }
            }
        }
    }

    Ok(())
}

fn handle<C, F, R>(bank: &mut Bank<C>, input: Input, format: &F, renderer: &mut R) -> io::Result<()>
where
    C: Clock,
    F: Format,
    R: Render,
{
    let outcome = match input {
        Input::Login { user, pin } => bank.login(&user, pin).map(|_| ()),
        Input::Transfer { to, amount } => bank.transfer(&to, amount),
        Input::Loan { amount } => bank.request_loan(amount).map(|loan| {
            tracing::event!(Level::DEBUG, due = %loan.due, "loan queued");
        }),
        Input::Close { user, pin } => bank.close_account(&user, pin).map(|_| ()),
        Input::Sort => bank.toggle_sort().map(|_| ()),
        Input::Help => return renderer.alert(HELP),
        Input::Quit | Input::Empty => return Ok(()),
    };

    if let Err(e) = outcome {
        renderer.alert(&e.to_string())?;
    }

    renderer.render(&bank.view(format))
}
