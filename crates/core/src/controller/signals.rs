use super::*;
use crate::reducer::presentation_progress;
use slide_remote_channel::SignalFrame;

impl<T: ChannelTransport, N: Notifier> Controller<T, N> {
    pub(super) fn handle_signal(&mut self, frame: SignalFrame) {
        match frame {
            SignalFrame::SlideShow(index) => self.show_slide(index),
            SignalFrame::ZoomIn => self.apply_zoom(ControllerAction::ZoomIn),
            SignalFrame::ZoomOut => self.apply_zoom(ControllerAction::ZoomOut),
            SignalFrame::Unknown(kind) => debug!("Ignoring unknown signal {}", kind),
        }
    }

    fn apply_zoom(&mut self, action: ControllerAction) {
        if !self.state.is_connected() {
            debug!("Ignoring {:?} before acceptance", action);
            return;
        }
        self.dispatch(action);
    }

    fn show_slide(&mut self, index: usize) {
        if !self.state.is_connected() {
            debug!("Ignoring slide signal before acceptance");
            return;
        }
        let slide_count = self.state.slide_count;
        if index >= slide_count {
            warn!("Presenter showed slide {} of a {}-slide deck", index, slide_count);
            return;
        }

        let progress = presentation_progress(index, slide_count);
        self.dispatch(ControllerAction::ShowSlide { index, progress });
        self.binder.highlight(index);
    }
}
