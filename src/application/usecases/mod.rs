pub mod process_webhook;
pub mod send_broadcast;
