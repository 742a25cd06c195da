//! Route modules for the AutoConnect server

pub mod health;
pub mod ocr;
