pub mod dispatch;
pub mod event;
pub mod input;
pub mod spinner;
pub mod viewport;
pub mod wizard;

pub mod ui;

pub use dispatch::RequestDispatcher;
pub use event::{Event, EventHandler};
pub use wizard::{Effect, Wizard, WizardState};
