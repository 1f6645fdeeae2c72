use std::io::{ErrorKind, Read};

use log::debug;

use crate::frame::{FrameError, DELIM};

/// One parsed frame, header decoded, payload still sealed.
#[derive(Debug, PartialEq)]
pub struct Frame {
    pub id: String,
    pub kind: String,
    pub payload: Vec<u8>,
}

/// Read-side frame codec. Scans one frame at a time off a sequential
/// stream, each frame's start is only known once the previous frame has
/// been consumed in full.
///
/// End of stream on an identifier boundary terminates the iterator, end
/// of stream anywhere else inside a frame is an error.
pub struct FrameReader<R: Read> {
    inner: R,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        FrameReader { inner: reader }
    }

    // Ok(None) is end of stream before the byte arrived
    fn read_byte(&mut self) -> Result<Option<u8>, FrameError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    // Accumulate up to the delimiter. Ok(None) only when the stream was
    // already exhausted before the first byte of the field.
    fn scan_field(&mut self, field: &'static str) -> Result<Option<Vec<u8>>, FrameError> {
        let mut buf = Vec::new();
        loop {
            match self.read_byte()? {
                Some(b) if b == DELIM => return Ok(Some(buf)),
                Some(b) => buf.push(b),
                None if buf.is_empty() => return Ok(None),
                None => return Err(FrameError::TruncatedHeader { field }),
            }
        }
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        // Phase 1: nothing read yet, so end of stream here is the normal
        // container-end condition
        let id = match self.scan_field("identifier")? {
            Some(field) => into_utf8("identifier", field)?,
            None => return Ok(None),
        };

        // Phases 2 and 3: a frame has started, it has to complete
        let kind = match self.scan_field("type tag")? {
            Some(field) => into_utf8("type tag", field)?,
            None => return Err(FrameError::TruncatedHeader { field: "type tag" }),
        };

        let length = match self.scan_field("length")? {
            Some(field) => parse_length(&field)?,
            None => return Err(FrameError::TruncatedHeader { field: "length" }),
        };

        // Phase 4: exactly `length` payload bytes. A short read cannot be
        // resynchronized past, rejecting the frame is the only honest
        // outcome, a shortened payload would decode to fabricated content.
        let mut payload = vec![0u8; length];
        let mut got = 0;
        while got < length {
            match self.inner.read(&mut payload[got..]) {
                Ok(0) => {
                    return Err(FrameError::TruncatedPayload {
                        expected: length,
                        got,
                    })
                }
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        debug!("frame <{}> type {}, {} byte payload", id, kind, length);

        Ok(Some(Frame { id, kind, payload }))
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_frame().transpose()
    }
}

fn into_utf8(field: &'static str, raw: Vec<u8>) -> Result<String, FrameError> {
    String::from_utf8(raw).map_err(|_| FrameError::HeaderNotUtf8 { field })
}

// Base-10 ASCII, leading zeros accepted, signs and whitespace are not
fn parse_length(field: &[u8]) -> Result<usize, FrameError> {
    let malformed = || FrameError::MalformedLength(String::from_utf8_lossy(field).into_owned());

    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return Err(malformed());
    }

    std::str::from_utf8(field)
        .map_err(|_| malformed())?
        .parse::<usize>()
        .map_err(|_| malformed())
}
