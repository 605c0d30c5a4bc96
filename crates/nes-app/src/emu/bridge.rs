use crate::display::frame::PixelFrame;
use crate::emu::commands::{EmuCommand, EmuResponse};
use crate::emu::image::ProgramImage;
use crate::error::BridgeError;
use std::future::Future;

/// Request/response channel to the host
///
/// Calls are independent. Callers await each call before issuing the next one;
/// implementations make no promise about ordering of concurrently issued calls.
pub trait CommandBridge {
    fn invoke(
        &self,
        command: EmuCommand,
    ) -> impl Future<Output = Result<EmuResponse, BridgeError>>;
}

/// Typed wrappers that pin each command to its response shape
#[allow(async_fn_in_trait)]
pub trait CommandBridgeExt: CommandBridge {
    async fn read_global_data(&self) -> Result<Vec<u8>, BridgeError> {
        let command = EmuCommand::ReadGlobalData;
        let name = command.name();
        match self.invoke(command).await? {
            EmuResponse::Data(data) => Ok(data),
            other => Err(unexpected(name, &other)),
        }
    }

    async fn self_test_echo(&self, n: u32) -> Result<u32, BridgeError> {
        let command = EmuCommand::SelfTestEcho(n);
        let name = command.name();
        match self.invoke(command).await? {
            EmuResponse::Echo(echoed) => Ok(echoed),
            other => Err(unexpected(name, &other)),
        }
    }

    async fn create_instance(&self) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::CreateInstance).await
    }

    async fn load_program_image(&self, image: ProgramImage) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::LoadProgramImage(image)).await
    }

    async fn power_on(&self) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::PowerOn).await
    }

    async fn reset(&self) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::Reset).await
    }

    async fn step_instruction(&self) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::StepInstruction).await
    }

    async fn advance_frame(&self) -> Result<(), BridgeError> {
        self.expect_done(EmuCommand::AdvanceFrame).await
    }

    async fn render_frame(&self) -> Result<PixelFrame, BridgeError> {
        let command = EmuCommand::RenderFrame;
        let name = command.name();
        match self.invoke(command).await? {
            EmuResponse::Frame(frame) => Ok(frame),
            other => Err(unexpected(name, &other)),
        }
    }

    async fn expect_done(&self, command: EmuCommand) -> Result<(), BridgeError> {
        let name = command.name();
        match self.invoke(command).await? {
            EmuResponse::Done => Ok(()),
            other => Err(unexpected(name, &other)),
        }
    }
}

impl<B: CommandBridge> CommandBridgeExt for B {}

fn unexpected(command: &'static str, response: &EmuResponse) -> BridgeError {
    BridgeError::UnexpectedResponse {
        command,
        response: response.kind(),
    }
}
