pub mod auth;
pub mod candidates;
pub mod joborders;
pub mod placements;
pub mod prospects;
pub mod reminders;
pub mod sync;
