use crate::app::action::Action;
use crate::app::ui::views::UiView;
use crate::app::ui::views::playing_view::PlayingView;
use crate::app::ui::views::waiting_view::WaitingView;
use crate::session::runner::{SessionEvent, SessionHandle};
use crate::shared::frame_buffer::SharedFrameHandle;
use eframe::epaint::TextureHandle;

pub struct App {
    pub(crate) session: SessionHandle,
    pub(crate) frame: SharedFrameHandle,
    pub(crate) texture: Option<TextureHandle>,
    pub(crate) view: UiView,
    shown_seq: u64,
}

pub struct UiCtx<'a> {
    pub frame: &'a SharedFrameHandle,
    pub texture: &'a mut Option<TextureHandle>,
    /// Sequence number of the frame currently in `texture`
    pub shown_seq: &'a mut u64,
    pub actions: Vec<Action>,
}

impl App {
    pub fn new(session: SessionHandle, frame: SharedFrameHandle) -> Self {
        Self {
            session,
            frame,
            texture: None,
            view: UiView::Waiting(WaitingView::new()),
            shown_seq: 0,
        }
    }

    pub fn log(&self, message: impl AsRef<str>) {
        log::info!("{}", message.as_ref());
    }

    fn handle_session_events(&mut self) {
        while let Some(event) = self.session.try_recv() {
            match event {
                SessionEvent::Starting => {
                    self.view = UiView::Waiting(WaitingView::starting());
                }
                SessionEvent::Running(booted) => {
                    self.log(format!("Playing {} ({} bytes)", booted.rom_name, booted.rom_len));
                    self.view = UiView::Playing(PlayingView::new(booted.rom_name));
                }
                SessionEvent::Failed(e) => {
                    self.view = UiView::error_start(e);
                }
            }
        }
    }
}

impl eframe::App for App {
    /// Serves as the main UI loop
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_session_events();

        let actions = {
            let mut ui_ctx = UiCtx {
                frame: &self.frame,
                texture: &mut self.texture,
                shown_seq: &mut self.shown_seq,
                actions: Vec::new(),
            };
            match &mut self.view {
                UiView::Waiting(view) => view.ui(ctx, &mut ui_ctx),
                UiView::Playing(view) => view.ui(ctx, &mut ui_ctx),
                UiView::Error(view) => view.ui(ctx, &mut ui_ctx),
            }
            ui_ctx.actions
        };
        self.apply_actions(actions);

        ctx.request_repaint();
    }
}
