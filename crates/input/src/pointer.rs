/// Mouse buttons the viewer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Whether a button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

/// A window-system agnostic mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A button changed state. Carries no position.
    Button {
        button: MouseButton,
        action: ButtonAction,
    },
    /// Cursor moved to window coordinates `(x, y)` in pixels.
    Moved { x: f64, y: f64 },
    /// Vertical wheel motion, in lines.
    Scrolled { dy: f64 },
}

/// Receiver of forwarded mouse input.
pub trait MouseController {
    fn lmb_pressed(&mut self, x: f64, y: f64);
    fn lmb_released(&mut self, x: f64, y: f64);
    fn mouse_moved(&mut self, x: f64, y: f64);
    fn scrolled(&mut self, _dy: f64) {}
}

/// Tracks the cursor and forwards events into a controller.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    cursor: (f64, f64),
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported cursor position.
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Update the tracked cursor and, if a controller is installed, forward
    /// the event to it.
    pub fn dispatch(&mut self, event: PointerEvent, controller: Option<&mut dyn MouseController>) {
        if let PointerEvent::Moved { x, y } = event {
            self.cursor = (x, y);
        }

        let Some(controller) = controller else {
            return;
        };
        let (x, y) = self.cursor;

        match event {
            PointerEvent::Button {
                button: MouseButton::Left,
                action: ButtonAction::Press,
            } => {
                tracing::trace!("lmb pressed at ({x:.1}, {y:.1})");
                controller.lmb_pressed(x, y);
            }
            PointerEvent::Button {
                button: MouseButton::Left,
                action: ButtonAction::Release,
            } => {
                tracing::trace!("lmb released at ({x:.1}, {y:.1})");
                controller.lmb_released(x, y);
            }
            PointerEvent::Button { .. } => {}
            PointerEvent::Moved { x, y } => controller.mouse_moved(x, y),
            PointerEvent::Scrolled { dy } => controller.scrolled(dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Pressed(f64, f64),
        Released(f64, f64),
        Moved(f64, f64),
        Scrolled(f64),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl MouseController for Recorder {
        fn lmb_pressed(&mut self, x: f64, y: f64) {
            self.calls.push(Call::Pressed(x, y));
        }
        fn lmb_released(&mut self, x: f64, y: f64) {
            self.calls.push(Call::Released(x, y));
        }
        fn mouse_moved(&mut self, x: f64, y: f64) {
            self.calls.push(Call::Moved(x, y));
        }
        fn scrolled(&mut self, dy: f64) {
            self.calls.push(Call::Scrolled(dy));
        }
    }

    fn button(button: MouseButton, action: ButtonAction) -> PointerEvent {
        PointerEvent::Button { button, action }
    }

    #[test]
    fn left_button_reported_at_last_cursor() {
        let mut state = PointerState::new();
        let mut rec = Recorder::default();

        state.dispatch(PointerEvent::Moved { x: 10.0, y: 20.0 }, Some(&mut rec));
        state.dispatch(button(MouseButton::Left, ButtonAction::Press), Some(&mut rec));
        state.dispatch(PointerEvent::Moved { x: 15.0, y: 22.0 }, Some(&mut rec));
        state.dispatch(button(MouseButton::Left, ButtonAction::Release), Some(&mut rec));

        assert_eq!(
            rec.calls,
            vec![
                Call::Moved(10.0, 20.0),
                Call::Pressed(10.0, 20.0),
                Call::Moved(15.0, 22.0),
                Call::Released(15.0, 22.0),
            ]
        );
    }

    #[test]
    fn other_buttons_ignored() {
        let mut state = PointerState::new();
        let mut rec = Recorder::default();
        state.dispatch(button(MouseButton::Right, ButtonAction::Press), Some(&mut rec));
        state.dispatch(button(MouseButton::Middle, ButtonAction::Release), Some(&mut rec));
        state.dispatch(button(MouseButton::Other(7), ButtonAction::Press), Some(&mut rec));
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn no_controller_still_tracks_cursor() {
        let mut state = PointerState::new();
        state.dispatch(PointerEvent::Moved { x: 3.0, y: 4.0 }, None);
        state.dispatch(button(MouseButton::Left, ButtonAction::Press), None);
        assert_eq!(state.cursor(), (3.0, 4.0));
    }

    #[test]
    fn scroll_forwarded() {
        let mut state = PointerState::new();
        let mut rec = Recorder::default();
        state.dispatch(PointerEvent::Scrolled { dy: -1.0 }, Some(&mut rec));
        assert_eq!(rec.calls, vec![Call::Scrolled(-1.0)]);
        assert_eq!(state.cursor(), (0.0, 0.0));
    }
}
