use bankist_lib::{Format, Summary};
use clap::Parser;

use crate::{config, format::LocaleFormat, Error};

#[derive(Debug, Default, Parser, Clone, Copy)]
pub struct Show;

impl Show {
    pub fn run() -> Result<(), Error> {
        let accounts = config::accounts()?;
        let format = LocaleFormat;

        for account in &accounts {
            let summary = Summary::of(account);
            let money = |amount| format.money(amount, account.locale(), account.currency());

            println!("{} ({}):", account.owner(), account.handle());
            println!("  movements: {}", account.movements().len());
            println!("  balance:   {}", money(summary.balance));
            println!("  in:        {}", money(summary.total_in));
            println!("  out:       {}", money(summary.total_out));
            println!("  interest:  {}", money(summary.interest));
        }

        Ok(())
    }
}
