use std::{
    io::{self, Write},
    num::ParseIntError,
    str::FromStr,
};

use anyhow::anyhow;
use thiserror::Error;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    // Not thrown directly by the arg reader
    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Missing argument {0}")]
    MissingArgument(usize),

    #[error("Bad argument ({0})")]
    ParseError(String),

    #[error("{0} unused command arguments")]
    UnusedArguments(usize),
}

pub struct Command(String);

impl Command {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// `None` once stdin has ended.
    pub fn prompt() -> anyhow::Result<Option<Self>> {
        print!("> ");
        io::stdout().flush()?;

        match io::stdin().lines().next() {
            Some(line) => line
                .map(|line| Some(Self(line)))
                .map_err(|e| anyhow!("Couldn't read command from stdin: {}", e)),
            None => Ok(None),
        }
    }

    pub fn args(&self) -> CommandArgs<impl Iterator<Item = &str>> {
        CommandArgs {
            iter: self.0.split_whitespace(),
            index: 0,
        }
    }
}

pub struct CommandArgs<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    iter: I,
    index: usize,
}

impl<'a, I> CommandArgs<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn next(&mut self) -> Result<&'a str, CommandError> {
        self.index += 1;

        self.iter
            .next()
            .ok_or(CommandError::MissingArgument(self.index))
    }

    pub fn next_parsed<T>(&mut self) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: ToString,
    {
        let arg_str = self.next()?;

        T::from_str(arg_str).map_err(|e| CommandError::ParseError(e.to_string()))
    }

    /// Like `next_parsed`, but an absent argument yields `default`.
    pub fn next_parsed_or<T>(&mut self, default: T) -> Result<T, CommandError>
    where
        T: FromStr,
        <T as FromStr>::Err: ToString,
    {
        match self.next_parsed() {
            Err(CommandError::MissingArgument(_)) => Ok(default),
            result => result,
        }
    }

    pub fn finish(mut self) -> Result<(), CommandError> {
        match self.iter.by_ref().count() {
            0 => Ok(()),
            unused => Err(CommandError::UnusedArguments(unused)),
        }
    }
}

/// Decimal or `0x`-prefixed hexadecimal argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number(pub u64);

impl FromStr for Number {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse(),
        }
        .map(Number)
    }
}
