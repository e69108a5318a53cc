use std::{
    collections::VecDeque,
    io::{self, ErrorKind, Read, Stdin, Stdout, Write},
};

use log::warn;

#[cfg(test)]
mod tests;

/// Stored by `getc` once the input stream has ended (EOF truncated to a byte).
/// A failed host read produces it too.
pub const END_OF_INPUT: u8 = 0xFF;

/// Byte streams the machine's `getc` and `putc` instructions talk to.
pub trait HostIo {
    /// Blocks until a byte is available. `None` means the stream has ended.
    fn getc(&mut self) -> Option<u8>;

    fn putc(&mut self, byte: u8) -> io::Result<()>;
}

pub struct StdHostIo {
    stdin: Stdin,
    stdout: Stdout,
}

impl StdHostIo {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdHostIo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostIo for StdHostIo {
    fn getc(&mut self) -> Option<u8> {
        read_byte(self.stdin.lock())
    }

    fn putc(&mut self, byte: u8) -> io::Result<()> {
        let mut stdout = self.stdout.lock();
        stdout.write_all(&[byte])?;
        stdout.flush()
    }
}

/// Next byte of `reader`. Read errors end the stream just like EOF does.
fn read_byte<R>(mut reader: R) -> Option<u8>
where
    R: Read,
{
    let mut byte = [0];

    match reader.read_exact(&mut byte) {
        Ok(()) => Some(byte[0]),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => None,
        Err(e) => {
            warn!("Reading host input failed, treating as end of input: {}", e);
            None
        }
    }
}

/// In-memory streams, for tests and for embedding the machine without a terminal.
#[derive(Debug, Clone, Default)]
pub struct BufferHostIo {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl BufferHostIo {
    pub fn new<I>(input: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self {
            input: input.into_iter().collect(),
            output: Vec::new(),
        }
    }
}

impl HostIo for BufferHostIo {
    fn getc(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn putc(&mut self, byte: u8) -> io::Result<()> {
        self.output.push(byte);
        Ok(())
    }
}
