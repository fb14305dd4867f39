//! Result panel state, interactive controls and user alerts.

pub mod controls;
pub mod notifier;
pub mod render;

pub use controls::{Button, BusyGuard, ButtonState, ControlState, Controls, LoadingIndicator};
pub use notifier::{AlertLog, LogNotifier, Notifier};
pub use render::{render, RenderInstruction, ResultView};
