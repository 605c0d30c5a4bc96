use crate::display::frame::{NES_RESOLUTION, PixelFrame};
use crate::emu::commands::{EmuCommand, EmuResponse};
use crate::emu::machine::{Machine, MachineFactory};
use crate::error::HostError;
use crossbeam_channel::Receiver;
use log::{debug, error, info, trace};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::oneshot;

/// Fill byte of the `read-global-data` probe payload
pub const DIAGNOSTIC_FILL: u8 = 2;

pub type HostReply = oneshot::Sender<Result<EmuResponse, HostError>>;

pub struct HostRequest {
    pub command: EmuCommand,
    pub reply: HostReply,
}

/// Where the host's emulator instance is in its lifecycle
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PowerState {
    NoInstance,
    Created,
    Loaded,
    Running,
}

/// Host side of the bridge: owns the machine and answers commands one at a time
pub struct EmuRuntime {
    factory: MachineFactory,
    machine: Option<Box<dyn Machine>>,
    state: PowerState,
}

impl EmuRuntime {
    pub fn new(factory: MachineFactory) -> Self {
        Self {
            factory,
            machine: None,
            state: PowerState::NoInstance,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Serves requests in arrival order until every sender is gone
    pub fn run(mut self, command_rx: Receiver<HostRequest>) {
        while let Ok(HostRequest { command, reply }) = command_rx.recv() {
            let name = command.name();
            let result = self.handle_guarded(command);
            if let Err(e) = &result {
                debug!("[host] {name} rejected: {e}");
            }
            if reply.send(result).is_err() {
                trace!("[host] caller of {name} went away before the reply");
            }
        }
        info!("[host] command channel closed, shutting down");
    }

    /// [`EmuRuntime::handle`], with a machine panic turned into a reply
    ///
    /// A machine that panicked mid-command is in an unknown state, so it is
    /// dropped and the lifecycle starts again from `create-emulator-instance`.
    pub fn handle_guarded(&mut self, command: EmuCommand) -> Result<EmuResponse, HostError> {
        let name = command.name();
        match panic::catch_unwind(AssertUnwindSafe(|| self.handle(command))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("[host] machine panicked during {name}: {message}; instance dropped");
                self.machine = None;
                self.state = PowerState::NoInstance;
                Err(HostError::MachineFault {
                    command: name,
                    message,
                })
            }
        }
    }

    pub fn handle(&mut self, command: EmuCommand) -> Result<EmuResponse, HostError> {
        match command {
            EmuCommand::ReadGlobalData => Ok(EmuResponse::Data(vec![
                DIAGNOSTIC_FILL;
                NES_RESOLUTION.rgba_len()
            ])),
            EmuCommand::SelfTestEcho(n) => {
                info!("[host] self-test echo {n}");
                Ok(EmuResponse::Echo(n))
            }
            EmuCommand::CreateInstance => {
                if self.machine.is_none() {
                    self.machine = Some((self.factory)());
                    self.state = PowerState::Created;
                    info!("[host] emulator instance created");
                } else {
                    debug!("[host] emulator instance already exists");
                }
                Ok(EmuResponse::Done)
            }
            EmuCommand::LoadProgramImage(image) => {
                let machine = self.machine_at(PowerState::Created)?;
                let header = image.parse_header()?;
                if !machine.supports_mapper(header.mapper) {
                    return Err(HostError::UnsupportedMapper(header.mapper));
                }
                machine.load_program(image.to_vec());
                info!(
                    "[host] program image loaded: {} bytes, mapper {}, PRG {} bytes, CHR {} bytes",
                    image.len(),
                    header.mapper,
                    header.prg_rom_size,
                    header.chr_rom_size
                );
                self.state = PowerState::Loaded;
                Ok(EmuResponse::Done)
            }
            EmuCommand::PowerOn => {
                self.machine_at(PowerState::Loaded)?.power_on();
                self.state = PowerState::Running;
                info!("[host] powered on");
                Ok(EmuResponse::Done)
            }
            EmuCommand::Reset => {
                self.machine_at(PowerState::Running)?.reset();
                Ok(EmuResponse::Done)
            }
            EmuCommand::StepInstruction => {
                self.machine_at(PowerState::Running)?.step_instruction();
                Ok(EmuResponse::Done)
            }
            EmuCommand::AdvanceFrame => {
                self.machine_at(PowerState::Running)?.step_frame();
                Ok(EmuResponse::Done)
            }
            EmuCommand::RenderFrame => {
                let machine = self.machine_at(PowerState::Created)?;
                let mut frame = PixelFrame::filled(0);
                machine.copy_pixels(frame.as_rgba_mut());
                Ok(EmuResponse::Frame(frame))
            }
        }
    }

    /// The machine, provided the lifecycle has reached `needed`
    fn machine_at(&mut self, needed: PowerState) -> Result<&mut Box<dyn Machine>, HostError> {
        if self.state < needed {
            return Err(match self.state {
                PowerState::NoInstance => HostError::NoInstance,
                PowerState::Created => HostError::NoProgram,
                PowerState::Loaded | PowerState::Running => HostError::NotPoweredOn,
            });
        }
        self.machine.as_mut().ok_or(HostError::NoInstance)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
