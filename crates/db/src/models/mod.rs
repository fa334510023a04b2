//! Row models and DTOs.
//!
//! Models are plain records. Relations between them are resolved by the
//! repository functions in [`crate::repositories`], never by the models.

pub mod category;
pub mod city;
pub mod configuration;
pub mod upload;
