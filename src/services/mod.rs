//! Background services that run alongside the HTTP routes.

pub mod reload;
