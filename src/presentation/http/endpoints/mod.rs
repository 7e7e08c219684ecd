pub mod broadcast;
pub mod health;
pub mod root;
pub mod webhook;
