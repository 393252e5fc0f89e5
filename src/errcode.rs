//! ASE error codes.

use std::error;
use std::fmt;
use std::io;

pub type AseResult<T> = Result<T, AseError>;

#[derive(Debug)]
pub enum AseError {
    BadMagic,
    Corrupted,

    // Structurally parseable, but a feature we do not handle.
    Unsupported,

    // A declared count or area above the structural caps.
    ExceededLimit,

    WrongResolution,
    BadFrameIndex,

    // IO error.
    Io(io::Error),
}

impl fmt::Display for AseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::AseError::*;
        match *self {
            BadMagic => write!(f, "Bad magic"),
            Corrupted => write!(f, "Corrupted"),
            Unsupported => write!(f, "Unsupported feature"),
            ExceededLimit => write!(f, "Exceeded limit"),
            WrongResolution => write!(f, "Wrong resolution"),
            BadFrameIndex => write!(f, "Bad frame index"),
            Io(ref err) => write!(f, "IO error: {}", err),
        }
    }
}

impl error::Error for AseError {
    /// The lower level source of this error, if any.
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::AseError::*;
        match *self {
            Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for AseError {
    fn from(err: io::Error) -> AseError {
        AseError::Io(err)
    }
}
