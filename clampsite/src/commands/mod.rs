pub mod email;
pub mod search;
pub mod serve;
