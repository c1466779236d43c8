pub mod binder;
pub mod controller;
pub mod deck;
pub mod notice;
pub mod reducer;

pub use binder::{NavigationBinder, NavigationBindings};
pub use controller::Controller;
pub use deck::{Slide, SlideDeck};
pub use notice::{Confirmation, Notice, Notifier};
pub use reducer::{
    presentation_progress, reduce, ConnectionState, ControllerAction, ControllerState, Controls,
};
