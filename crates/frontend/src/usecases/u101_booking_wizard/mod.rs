//! Booking wizard: a 3-step flow (select details → contact & billing →
//! payment) over a shared draft store, with derived pricing and a live
//! availability grid.

pub mod availability;
pub mod dialog;
pub mod model;
pub mod pricing;
pub mod review;
pub mod state;
pub mod steps;
pub mod stripe_element;
pub mod submit;
pub mod view;

pub use dialog::BookingDialog;
pub use state::{BookingWizardStore, WizardMode};
pub use view::BookingWizard;
