use std::io::{self, ErrorKind, Read};

use super::{read_byte, BufferHostIo, HostIo};

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(ErrorKind::Other, "unplugged"))
    }
}

#[test]
fn reads_bytes_until_eof() {
    let mut input: &[u8] = &[0x41, 0x42];

    assert_eq!(read_byte(&mut input), Some(0x41));
    assert_eq!(read_byte(&mut input), Some(0x42));
    assert_eq!(read_byte(&mut input), None);
}

#[test]
fn read_error_ends_input() {
    assert_eq!(read_byte(BrokenReader), None);
}

#[test]
fn buffer_streams() {
    let mut io = BufferHostIo::new([7]);

    assert_eq!(io.getc(), Some(7));
    assert_eq!(io.getc(), None);

    io.putc(b'x').unwrap();
    assert_eq!(io.output, b"x");
}
