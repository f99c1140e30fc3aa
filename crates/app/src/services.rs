//! Use-case services composed from ports.

pub mod device_service;
