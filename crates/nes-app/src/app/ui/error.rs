use crate::error::{BootstrapError, BridgeError, HostError};

pub struct ErrorInfo {
    pub(crate) context: String,
    pub(crate) details: String,
    /// Bridge command the session aborted on, when it got that far
    pub(crate) failed_command: Option<&'static str>,
    pub(crate) hint: Option<String>,
}

impl ErrorInfo {
    pub fn new(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            details: details.into(),
            failed_command: None,
            hint: None,
        }
    }

    /// Splits an error into its outermost message and the full `{:#}` chain
    ///
    /// A [`BootstrapError`] anywhere in the chain also fills in the failed
    /// command and a hint for the user.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let mut info = Self::new(err.to_string(), format!("{err:#}"));
        if let Some(bootstrap) = err.downcast_ref::<BootstrapError>() {
            info.hint = Some(bootstrap_hint(bootstrap));
            if let BootstrapError::Command { command, .. } = bootstrap {
                info.failed_command = Some(*command);
            }
        }
        info
    }
}

fn bootstrap_hint(err: &BootstrapError) -> String {
    let source = match err {
        BootstrapError::NoImage => return "No ROM was selected.".into(),
        BootstrapError::EmptyImage => return "The selected file is empty.".into(),
        BootstrapError::Command { source, .. } => source,
    };

    match source {
        BridgeError::Disconnected { .. } => "The emulator host is no longer running.".into(),
        BridgeError::Host { source, .. } => match source {
            HostError::MalformedImage(_) => "The file is not a valid iNES ROM.".into(),
            HostError::UnsupportedMapper(mapper) => {
                format!("This ROM uses mapper {mapper}, which the emulator core cannot run.")
            }
            HostError::MachineFault { .. } => {
                "The emulator core crashed and was discarded. Another ROM can still be loaded."
                    .into()
            }
            HostError::NoInstance | HostError::NoProgram | HostError::NotPoweredOn => {
                "The emulator host received commands out of order.".into()
            }
        },
        BridgeError::UnexpectedResponse { .. } | BridgeError::Frame(_) => {
            "The emulator host sent an unexpected reply.".into()
        }
    }
}
