use std::collections::VecDeque;
use std::io::{BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("input stream exhausted")]
    Exhausted,
    #[error("invalid input token '{0}', expected an integer")]
    InvalidToken(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;

/// Ordered pull-source of integers consumed by the IN instruction. Each
/// call consumes exactly one value; exhaustion is fatal to the run.
pub trait InputPort {
    fn read_word(&mut self) -> Result<i32>;
}

/// Ordered push-sink of bytes produced by the OUT instruction.
pub trait OutputPort {
    fn write_byte(&mut self, byte: u8) -> Result<()>;
}

/// Parses whitespace-separated decimal integers from a reader.
pub struct StdInput<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> StdInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> InputPort for StdInput<R> {
    fn read_word(&mut self) -> Result<i32> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token
                    .parse::<i32>()
                    .map_err(|_| IoError::InvalidToken(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(IoError::Exhausted);
            }
            self.pending
                .extend(line.split_whitespace().map(String::from));
        }
    }
}

pub struct StdOutput<W> {
    writer: W,
}

impl<W: Write> StdOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputPort for StdOutput<W> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory input for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct BufferInput {
    words: VecDeque<i32>,
}

impl BufferInput {
    pub fn new(words: impl IntoIterator<Item = i32>) -> Self {
        Self {
            words: words.into_iter().collect(),
        }
    }
}

impl InputPort for BufferInput {
    fn read_word(&mut self) -> Result<i32> {
        self.words.pop_front().ok_or(IoError::Exhausted)
    }
}

/// In-memory output for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct BufferOutput {
    bytes: Vec<u8>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl OutputPort for BufferOutput {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.bytes.push(byte);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_input_parses_tokens_across_lines() {
        let text = "12 -3\n\n  7\n";
        let mut input = StdInput::new(text.as_bytes());
        assert_eq!(input.read_word().unwrap(), 12);
        assert_eq!(input.read_word().unwrap(), -3);
        assert_eq!(input.read_word().unwrap(), 7);
        assert!(matches!(input.read_word(), Err(IoError::Exhausted)));
    }

    #[test]
    fn test_std_input_rejects_garbage() {
        let mut input = StdInput::new("abc".as_bytes());
        match input.read_word() {
            Err(IoError::InvalidToken(token)) => assert_eq!(token, "abc"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_buffer_ports() {
        let mut input = BufferInput::new([65, 66]);
        let mut output = BufferOutput::new();
        output.write_byte(input.read_word().unwrap() as u8).unwrap();
        output.write_byte(input.read_word().unwrap() as u8).unwrap();
        assert!(matches!(input.read_word(), Err(IoError::Exhausted)));
        assert_eq!(output.bytes(), b"AB");
    }
}
