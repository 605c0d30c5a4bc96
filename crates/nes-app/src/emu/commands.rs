use crate::display::frame::PixelFrame;
use crate::emu::image::ProgramImage;

/// Requests the front end can make of the host
///
/// Each variant carries its fixed argument shape; the host answers with the
/// matching [`EmuResponse`] variant or a `HostError`.
#[derive(Debug, Clone)]
pub enum EmuCommand {
    ReadGlobalData,
    SelfTestEcho(u32),
    CreateInstance,
    LoadProgramImage(ProgramImage),
    PowerOn,
    Reset,
    StepInstruction,
    AdvanceFrame,
    RenderFrame,
}

impl EmuCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EmuCommand::ReadGlobalData => "read-global-data",
            EmuCommand::SelfTestEcho(_) => "self-test-echo",
            EmuCommand::CreateInstance => "create-emulator-instance",
            EmuCommand::LoadProgramImage(_) => "load-program-image",
            EmuCommand::PowerOn => "power-on",
            EmuCommand::Reset => "reset",
            EmuCommand::StepInstruction => "step-instruction",
            EmuCommand::AdvanceFrame => "advance-one-frame",
            EmuCommand::RenderFrame => "render-current-frame",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmuResponse {
    Done,
    Data(Vec<u8>),
    Echo(u32),
    Frame(PixelFrame),
}

impl EmuResponse {
    pub fn kind(&self) -> &'static str {
        match self {
            EmuResponse::Done => "done",
            EmuResponse::Data(_) => "data",
            EmuResponse::Echo(_) => "echo",
            EmuResponse::Frame(_) => "frame",
        }
    }
}
