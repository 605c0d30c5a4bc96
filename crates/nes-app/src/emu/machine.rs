/// The emulator core the host drives
///
/// Implementations are created and used on the host thread only, so they need
/// not be `Send`. Lifecycle ordering is enforced by the host runtime before any
/// of these methods are reached.
pub trait Machine {
    /// Whether `load_program` can take a cartridge with this iNES mapper number
    fn supports_mapper(&self, _mapper: u8) -> bool {
        true
    }

    fn load_program(&mut self, rom: Vec<u8>);

    fn power_on(&mut self);

    fn reset(&mut self);

    /// Executes a single CPU instruction
    fn step_instruction(&mut self);

    /// Runs until the PPU completes one video frame
    fn step_frame(&mut self);

    /// Copies the current screen into `rgba` (256 * 240 * 4 bytes, alpha opaque)
    fn copy_pixels(&mut self, rgba: &mut [u8]);
}

/// Builds a fresh machine on the host thread for `create-emulator-instance`
pub type MachineFactory = Box<dyn Fn() -> Box<dyn Machine> + Send + 'static>;

#[cfg(feature = "nes-rust")]
pub use self::nes_rust_machine::NesRustMachine;

#[cfg(feature = "nes-rust")]
mod nes_rust_machine {
    use super::Machine;
    use nes_rust::Nes;
    use nes_rust::default_audio::DefaultAudio;
    use nes_rust::default_display::DefaultDisplay;
    use nes_rust::default_input::DefaultInput;
    use nes_rust::rom::Rom;

    /// NROM, MMC1, UxROM, CNROM, MMC3; `Rom::new` panics on anything else
    const SUPPORTED_MAPPERS: [u8; 5] = [0, 1, 2, 3, 4];

    /// [`Machine`] backed by the `nes_rust` core
    pub struct NesRustMachine {
        nes: Nes,
    }

    impl NesRustMachine {
        pub fn new() -> Self {
            let input = Box::new(DefaultInput::new());
            let display = Box::new(DefaultDisplay::new());
            let audio = Box::new(DefaultAudio::new());
            Self {
                nes: Nes::new(input, display, audio),
            }
        }

        pub fn factory() -> super::MachineFactory {
            Box::new(|| Box::new(NesRustMachine::new()))
        }
    }

    impl Default for NesRustMachine {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Machine for NesRustMachine {
        fn supports_mapper(&self, mapper: u8) -> bool {
            SUPPORTED_MAPPERS.contains(&mapper)
        }

        fn load_program(&mut self, rom: Vec<u8>) {
            self.nes.set_rom(Rom::new(rom));
        }

        fn power_on(&mut self) {
            self.nes.bootup();
        }

        fn reset(&mut self) {
            self.nes.reset();
        }

        fn step_instruction(&mut self) {
            self.nes.step();
        }

        fn step_frame(&mut self) {
            self.nes.step_frame();
        }

        fn copy_pixels(&mut self, rgba: &mut [u8]) {
            self.nes.copy_pixels(rgba);
        }
    }

}
