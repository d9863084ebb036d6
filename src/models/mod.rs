pub mod candidatemodel;
pub mod jobordermodel;
pub mod placementmodel;
pub mod prospectmodel;
pub mod remindermodel;
pub mod syncmodel;
pub mod usermodel;
