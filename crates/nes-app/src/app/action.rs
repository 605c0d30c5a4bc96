use crate::app::app::App;
use crate::app::ui::views::UiView;
use crate::app::ui::views::waiting_view::WaitingView;

pub enum Action {
    /// The user gesture that kicks off bootstrap
    Start,
    AcknowledgeError,
}

impl App {
    pub(crate) fn apply_actions(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.apply_action(action);
        }
    }

    pub(crate) fn apply_action(&mut self, action: Action) {
        match action {
            Action::Start => {
                self.log("[Apply Action::Start]");
                self.view = UiView::Waiting(WaitingView::starting());
                self.session.start();
            }
            Action::AcknowledgeError => {
                self.view = UiView::Waiting(WaitingView::new());
            }
        }
    }
}
