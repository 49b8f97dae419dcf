mod manual_form;
mod search_picker;

pub use manual_form::ManualContactForm;
pub use search_picker::ContactSearchPicker;
