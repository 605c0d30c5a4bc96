#![allow(dead_code)]

use nes_app::display::frame::{PixelFrame, Resolution};
use nes_app::display::surface::PresentationSurface;
use nes_app::emu::bridge::CommandBridge;
use nes_app::emu::commands::{EmuCommand, EmuResponse};
use nes_app::error::{BridgeError, FrameError, HostError};
use nes_app::session::file::{FileBlob, FileOptions, FilePicker};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

/// Behaviour and call log of a [`ScriptedBridge`]
#[derive(Default)]
pub struct Script {
    pub advance_delay: Duration,
    pub render_delay: Duration,
    /// 1-based `advance-one-frame` calls that fail
    pub fail_advance_calls: HashSet<u64>,
    /// Commands that always fail
    pub failing: HashSet<&'static str>,
    /// Answer `render-current-frame` with the wrong response kind
    pub render_answers_done: bool,

    pub calls: Vec<&'static str>,
    pub advance_calls: u64,
    pub open_cycles: u32,
    pub max_open_cycles: u32,
}

/// In-process bridge with scripted latency and failures
///
/// Rendered frames are filled with the index of the `advance-one-frame` call
/// they follow, so a test can tell which cycle produced what it sees.
#[derive(Clone, Default)]
pub struct ScriptedBridge {
    pub script: Rc<RefCell<Script>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delays(advance: Duration, render: Duration) -> Self {
        let bridge = Self::new();
        {
            let mut script = bridge.script.borrow_mut();
            script.advance_delay = advance;
            script.render_delay = render;
        }
        bridge
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.script.borrow().calls.clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.script.borrow().calls.iter().filter(|&&c| c == name).count()
    }

    pub fn max_open_cycles(&self) -> u32 {
        self.script.borrow().max_open_cycles
    }
}

fn rejected(command: &'static str) -> BridgeError {
    BridgeError::Host {
        command,
        source: HostError::NotPoweredOn,
    }
}

impl CommandBridge for ScriptedBridge {
    async fn invoke(&self, command: EmuCommand) -> Result<EmuResponse, BridgeError> {
        let name = command.name();
        let (delay, advance_call) = {
            let mut script = self.script.borrow_mut();
            script.calls.push(name);
            match command {
                EmuCommand::AdvanceFrame => {
                    script.advance_calls += 1;
                    script.open_cycles += 1;
                    script.max_open_cycles = script.max_open_cycles.max(script.open_cycles);
                    (script.advance_delay, script.advance_calls)
                }
                EmuCommand::RenderFrame => (script.render_delay, script.advance_calls),
                _ => (Duration::ZERO, 0),
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut script = self.script.borrow_mut();
        let fails = script.failing.contains(name)
            || (name == "advance-one-frame" && script.fail_advance_calls.contains(&advance_call));
        if fails {
            if name == "advance-one-frame" {
                script.open_cycles -= 1;
            }
            return Err(rejected(name));
        }

        Ok(match command {
            EmuCommand::ReadGlobalData => EmuResponse::Data(vec![2; 16]),
            EmuCommand::SelfTestEcho(n) => EmuResponse::Echo(n),
            EmuCommand::RenderFrame => {
                script.open_cycles = script.open_cycles.saturating_sub(1);
                if script.render_answers_done {
                    EmuResponse::Done
                } else {
                    EmuResponse::Frame(PixelFrame::filled(advance_call as u8))
                }
            }
            _ => EmuResponse::Done,
        })
    }
}

/// Surface that keeps the first byte of every frame it accepts
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub presented: Rc<RefCell<Vec<u8>>>,
}

impl RecordingSurface {
    pub fn presented(&self) -> Vec<u8> {
        self.presented.borrow().clone()
    }
}

impl PresentationSurface for RecordingSurface {
    fn present(&mut self, resolution: Resolution, rgba: &[u8]) -> Result<(), FrameError> {
        resolution.check_rgba(rgba)?;
        self.presented.borrow_mut().push(rgba[0]);
        Ok(())
    }
}

#[derive(Clone)]
pub struct StubFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileBlob for StubFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_all(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

/// Picker that "selects" a fixed list of files and remembers the options it got
#[derive(Clone, Default)]
pub struct StubPicker {
    pub files: Vec<StubFile>,
    pub seen_options: Rc<RefCell<Vec<FileOptions>>>,
}

impl StubPicker {
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn with_file(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            files: vec![StubFile {
                name: name.to_string(),
                bytes,
            }],
            ..Self::default()
        }
    }
}

impl FilePicker for StubPicker {
    type File = StubFile;

    async fn pick(&self, options: &FileOptions) -> Vec<StubFile> {
        self.seen_options.borrow_mut().push(options.clone());
        self.files.clone()
    }
}

/// Picker that answers each call with the next prepared selection, then nothing
#[derive(Clone, Default)]
pub struct SequencePicker {
    pub selections: Rc<RefCell<VecDeque<Vec<StubFile>>>>,
}

impl SequencePicker {
    pub fn new(selections: Vec<Vec<StubFile>>) -> Self {
        Self {
            selections: Rc::new(RefCell::new(selections.into())),
        }
    }
}

impl FilePicker for SequencePicker {
    type File = StubFile;

    async fn pick(&self, _options: &FileOptions) -> Vec<StubFile> {
        self.selections.borrow_mut().pop_front().unwrap_or_default()
    }
}

/// Smallest valid iNES image: one PRG bank, one CHR bank, mapper 0
pub fn nrom_bytes() -> Vec<u8> {
    ines_bytes(0)
}

/// One PRG bank, one CHR bank, the given mapper number
pub fn ines_bytes(mapper: u8) -> Vec<u8> {
    let mut raw = vec![b'N', b'E', b'S', 0x1A, 1, 1, mapper << 4, mapper & 0xF0];
    raw.resize(16 + 0x4000 + 0x2000, 0);
    raw
}
