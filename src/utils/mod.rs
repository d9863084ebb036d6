pub mod csv;
pub mod password;
pub mod token;
