pub mod cache;
pub mod candidatedb;
pub mod db;
pub mod joborderdb;
pub mod placementdb;
pub mod prospectdb;
pub mod reminderdb;
pub mod userdb;
