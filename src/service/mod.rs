pub mod ats_gateway;
pub mod error;
pub mod pipeline_service;
pub mod reminder_service;
pub mod sync_service;
