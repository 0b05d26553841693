use std::str::FromStr;

use bankist_lib::Pin;
use rust_decimal::Decimal;

pub const HELP: &str = "\
commands:
  login <user> <pin>       log in
  transfer <to> <amount>   send money to another account
  loan <amount>            request a loan
  close <user> <pin>       close your account
  sort                     toggle sorting movements by amount
  help                     show this message
  quit                     exit";

/// A line typed at the prompt
#[derive(Debug, PartialEq)]
pub enum Input {
    Login { user: String, pin: Pin },
    Transfer { to: String, amount: Decimal },
    Loan { amount: Decimal },
    Close { user: String, pin: Pin },
    Sort,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Input {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<_> = line.split_whitespace().collect();

        let input = match words.as_slice() {
            [] => Self::Empty,
            ["login", user, pin] => Self::Login {
                user: (*user).to_string(),
                pin: parse_pin(pin).ok_or(ParseError::Usage("login <user> <pin>"))?,
            },
            ["login", ..] => return Err(ParseError::Usage("login <user> <pin>")),
            ["transfer", to, amount] => Self::Transfer {
                to: (*to).to_string(),
                amount: amount
                    .parse()
                    .map_err(|_| ParseError::Usage("transfer <to> <amount>"))?,
            },
            ["transfer", ..] => return Err(ParseError::Usage("transfer <to> <amount>")),
            ["loan", amount] => Self::Loan {
                amount: amount
                    .parse()
                    .map_err(|_| ParseError::Usage("loan <amount>"))?,
            },
            ["loan", ..] => return Err(ParseError::Usage("loan <amount>")),
            ["close", user, pin] => Self::Close {
                user: (*user).to_string(),
                pin: parse_pin(pin).ok_or(ParseError::Usage("close <user> <pin>"))?,
            },
            ["close", ..] => return Err(ParseError::Usage("close <user> <pin>")),
            ["sort"] => Self::Sort,
            ["help"] => Self::Help,
            ["quit" | "exit"] => Self::Quit,
            [command, ..] => return Err(ParseError::Unknown((*command).to_string())),
        };

        Ok(input)
    }
}

fn parse_pin(pin: &str) -> Option<Pin> {
    pin.parse().ok().map(Pin::new)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("" => Ok(Input::Empty) ; "empty")]
    #[test_case("login jd 2222" => Ok(Input::Login { user: "jd".to_string(), pin: Pin::new(2222) }) ; "login")]
    #[test_case("  transfer   js 12.5 " => Ok(Input::Transfer { to: "js".to_string(), amount: Decimal::new(125, 1) }) ; "transfer")]
    #[test_case("loan 300" => Ok(Input::Loan { amount: Decimal::new(300, 0) }) ; "loan")]
    #[test_case("close jd 2222" => Ok(Input::Close { user: "jd".to_string(), pin: Pin::new(2222) }) ; "close")]
    #[test_case("sort" => Ok(Input::Sort) ; "sort")]
    #[test_case("exit" => Ok(Input::Quit) ; "exit")]
    #[test_case("login jd" => Err(ParseError::Usage("login <user> <pin>")) ; "missing pin")]
    #[test_case("login jd abc" => Err(ParseError::Usage("login <user> <pin>")) ; "non numeric pin")]
    #[test_case("transfer js lots" => Err(ParseError::Usage("transfer <to> <amount>")) ; "bad amount")]
    #[test_case("deposit 100" => Err(ParseError::Unknown("deposit".to_string())) ; "unknown")]
    fn parse(line: &str) -> Result<Input, ParseError> {
        line.parse()
    }
}
