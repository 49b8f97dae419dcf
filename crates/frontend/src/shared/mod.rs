pub mod api_utils;
pub mod components;
pub mod modal_frame;
pub mod time_utils;
