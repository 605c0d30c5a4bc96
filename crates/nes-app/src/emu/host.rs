use crate::emu::bridge::CommandBridge;
use crate::emu::commands::{EmuCommand, EmuResponse};
use crate::emu::machine::MachineFactory;
use crate::emu::runtime::{EmuRuntime, HostRequest};
use crate::error::BridgeError;
use log::debug;
use std::io;
use std::thread;
use tokio::sync::oneshot;

/// EmuHost links the front end to the emulation thread
///
/// Cloning is cheap; every clone talks to the same host thread. The thread exits
/// once the last clone is dropped.
#[derive(Clone)]
pub struct EmuHost {
    command_tx: crossbeam_channel::Sender<HostRequest>,
}

impl EmuHost {
    pub fn start(factory: MachineFactory) -> io::Result<Self> {
        // Create the request channel
        let (command_tx, command_rx) = crossbeam_channel::unbounded();

        // Only the factory crosses threads; the runtime and its machine live on the host thread
        thread::Builder::new()
            .name("emu-host".into())
            .spawn(move || EmuRuntime::new(factory).run(command_rx))?;

        Ok(Self { command_tx })
    }
}

impl CommandBridge for EmuHost {
    async fn invoke(&self, command: EmuCommand) -> Result<EmuResponse, BridgeError> {
        let name = command.name();
        let (reply, response_rx) = oneshot::channel();

        self.command_tx
            .send(HostRequest { command, reply })
            .map_err(|_| BridgeError::Disconnected { command: name })?;
        debug!("[bridge] {name} sent");

        response_rx
            .await
            .map_err(|_| BridgeError::Disconnected { command: name })?
            .map_err(|source| BridgeError::Host {
                command: name,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::bridge::CommandBridgeExt;
    use crate::emu::machine::Machine;
    use crate::error::HostError;
    use std::rc::Rc;

    /// Holds an `Rc`, so it can only ever exist on the thread that built it
    #[derive(Default)]
    struct ThreadBoundMachine {
        frames: Rc<u8>,
    }

    impl Machine for ThreadBoundMachine {
        fn load_program(&mut self, _rom: Vec<u8>) {}
        fn power_on(&mut self) {}
        fn reset(&mut self) {}
        fn step_instruction(&mut self) {}
        fn step_frame(&mut self) {
            self.frames = Rc::new(self.frames.wrapping_add(1));
        }
        fn copy_pixels(&mut self, rgba: &mut [u8]) {
            rgba.fill(*self.frames);
        }
    }

    #[tokio::test]
    async fn test_machine_is_built_on_the_host_thread() {
        let host = EmuHost::start(Box::new(|| Box::new(ThreadBoundMachine::default()))).unwrap();

        assert_eq!(
            host.power_on().await.unwrap_err().host_error(),
            Some(&HostError::NoInstance)
        );
        host.create_instance().await.unwrap();
        let frame = host.render_frame().await.unwrap();
        assert!(frame.as_rgba().iter().all(|&b| b == 0));
    }
}
