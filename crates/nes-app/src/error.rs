use crate::emu::image::ImageError;
use thiserror::Error;

/// Faults raised by the host while handling a command
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("no emulator instance (create-emulator-instance must come first)")]
    NoInstance,

    #[error("no program image loaded")]
    NoProgram,

    #[error("emulator is not powered on")]
    NotPoweredOn,

    #[error("malformed program image: {0}")]
    MalformedImage(#[from] ImageError),

    #[error("mapper {0} is not supported by this emulator core")]
    UnsupportedMapper(u8),

    /// The machine panicked; the host dropped the instance and kept serving
    #[error("emulator core crashed during {command}: {message}")]
    MachineFault {
        command: &'static str,
        message: String,
    },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    #[error("pixel frame is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    Size {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("host rejected {command}: {source}")]
    Host {
        command: &'static str,
        #[source]
        source: HostError,
    },

    #[error("host went away while handling {command}")]
    Disconnected { command: &'static str },

    #[error("{command} answered with an unexpected {response} response")]
    UnexpectedResponse {
        command: &'static str,
        response: &'static str,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl BridgeError {
    /// Host-side fault behind this error, if the host answered at all
    pub fn host_error(&self) -> Option<&HostError> {
        match self {
            BridgeError::Host { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reasons a session never reaches the frame loop
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("no ROM selected")]
    NoImage,

    #[error("selected ROM file has no content")]
    EmptyImage,

    #[error("{command} failed")]
    Command {
        command: &'static str,
        #[source]
        source: BridgeError,
    },
}

/// One failed advance/render/present cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("frame cycle aborted: {0}")]
    Bridge(#[from] BridgeError),

    #[error("surface rejected frame: {0}")]
    Present(#[from] FrameError),
}
