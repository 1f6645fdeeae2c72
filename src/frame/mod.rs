//! Container framing
//!
//! A container is a bare concatenation of frames, nothing before the
//! first and nothing after the last. One frame on disk:
//!
//! | Type    | Name       | Description |
//! | ------: | ---------- | ----------- |
//! | [u8]    | identifier | Archive key of the asset, delimiter-free |
//! | u8      | delimiter  | `:` (0x3A) |
//! | [u8]    | type tag   | Opaque content label, delimiter-free |
//! | u8      | delimiter  | `:` |
//! | [u8]    | length     | Sealed payload byte count, base-10 ASCII |
//! | u8      | delimiter  | `:` |
//! | [u8; N] | payload    | The sealed record, exactly `length` bytes |
//!
//! No delimiter follows the payload, the next frame's identifier starts
//! on the very next byte. The declared length is therefore the format's
//! only self-synchronization mechanism: a payload shorter than declared
//! cannot be resynchronized past and the frame is rejected outright.
//!
//! The header has no escaping. A `:` inside the identifier or type tag
//! would shift every field boundary after it, so the write side refuses
//! such fields instead of emitting a stream the read side cannot parse.
pub mod builder;
pub mod reader;

use thiserror::Error;

/// Field separator inside a frame header.
pub const DELIM: u8 = b':';

#[derive(Error, Debug)]
pub enum FrameError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("frame {field} contains the reserved ':' delimiter")]
    DelimiterInField { field: &'static str },
    #[error("stream ended inside a frame {field} field")]
    TruncatedHeader { field: &'static str },
    #[error("frame {field} is not valid utf-8")]
    HeaderNotUtf8 { field: &'static str },
    #[error("frame length field {0:?} is not a base-10 integer")]
    MalformedLength(String),
    #[error("frame payload truncated, declared {expected} bytes but only {got} arrived")]
    TruncatedPayload { expected: usize, got: usize },
}
