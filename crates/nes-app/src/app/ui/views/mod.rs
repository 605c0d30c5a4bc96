use crate::app::ui::error::ErrorInfo;
use crate::app::ui::views::error_view::ErrorView;
use crate::app::ui::views::playing_view::PlayingView;
use crate::app::ui::views::waiting_view::WaitingView;

pub mod error_view;
pub mod playing_view;
pub mod waiting_view;

pub enum UiView {
    Waiting(WaitingView),
    Playing(PlayingView),
    Error(ErrorView),
}

impl UiView {
    pub(crate) fn error_start(err: anyhow::Error) -> Self {
        UiView::Error(ErrorView::new(ErrorInfo::from_anyhow(err)))
    }
}
