pub mod contact_billing;
pub mod payment;
pub mod select_details;

pub use contact_billing::ContactBillingStep;
pub use payment::PaymentStep;
pub use select_details::SelectDetailsStep;
