use std::io::Write;

use crate::frame::{FrameError, DELIM};

/// Write-side frame codec, append-only over any sink.
pub struct FrameBuilder<W: Write> {
    inner: W,
}

impl<W: Write> FrameBuilder<W> {
    pub fn new(writer: W) -> Self {
        FrameBuilder { inner: writer }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Append one frame, returns the bytes written. The payload length
    /// field is derived from `payload` itself so it always matches the
    /// byte count that lands on the sink.
    pub fn write_frame(
        &mut self,
        id: &str,
        kind: &str,
        payload: &[u8],
    ) -> Result<usize, FrameError> {
        check_field("identifier", id)?;
        check_field("type tag", kind)?;

        let length = payload.len().to_string();

        self.inner.write_all(id.as_bytes())?;
        self.inner.write_all(&[DELIM])?;
        self.inner.write_all(kind.as_bytes())?;
        self.inner.write_all(&[DELIM])?;
        self.inner.write_all(length.as_bytes())?;
        self.inner.write_all(&[DELIM])?;
        self.inner.write_all(payload)?;

        Ok(id.len() + kind.len() + length.len() + 3 + payload.len())
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), FrameError> {
    if value.as_bytes().contains(&DELIM) {
        return Err(FrameError::DelimiterInField { field });
    }
    Ok(())
}
