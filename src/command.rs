//! Commands typed at the terminal prompt.
//!
//! Cart lines are numbered from 1 on screen. [`Command`] carries the 0-based
//! index the page controller expects.

use std::str::FromStr;

use thiserror::Error;

pub const HELP: &str = "\
Commands:
  scan <code>        look up a product by code
  code <text>        edit the code field
  load               look up the code in the field
  add                add the loaded product to the cart
  qty <line> <n>     set the quantity of a cart line
  inc <line>         add one to a cart line
  dec <line>         take one from a cart line
  rm <line>          remove a cart line
  checkout           submit the cart
  ok                 close the receipt
  list               list all products
  search <keyword>   search products
  receipt <id>       show a past purchase
  show               redraw the page
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    SetCode(String),
    Load,
    Add,
    SetQuantity { index: usize, quantity: i64 },
    Increment(usize),
    Decrement(usize),
    Remove(usize),
    Checkout,
    Dismiss,
    List,
    Search(String),
    Receipt(i64),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a line number: {0}")]
    InvalidLine(String),

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match name.to_ascii_lowercase().as_str() {
            "scan" => Command::Scan(required(rest, "scan <code>")?.to_string()),
            "code" => Command::SetCode(rest.to_string()),
            "load" => Command::Load,
            "add" => Command::Add,
            "qty" => {
                let index = line(args.next(), "qty <line> <n>")?;
                let quantity = number(args.next(), "qty <line> <n>")?;
                Command::SetQuantity { index, quantity }
            }
            "inc" => Command::Increment(line(args.next(), "inc <line>")?),
            "dec" => Command::Decrement(line(args.next(), "dec <line>")?),
            "rm" => Command::Remove(line(args.next(), "rm <line>")?),
            "checkout" => Command::Checkout,
            "ok" => Command::Dismiss,
            "list" => Command::List,
            "search" => Command::Search(required(rest, "search <keyword>")?.to_string()),
            "receipt" => Command::Receipt(number(args.next(), "receipt <id>")?),
            "show" | "" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(arg: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg)
    }
}

/// Parses a 1-based line number into a 0-based index.
fn line(arg: Option<&str>, usage: &'static str) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::InvalidLine(arg.to_string())),
    }
}

fn number(arg: Option<&str>, usage: &'static str) -> Result<i64, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    arg.parse().map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}
