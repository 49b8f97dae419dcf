pub mod u101_booking_wizard;
