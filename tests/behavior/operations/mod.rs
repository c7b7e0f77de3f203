pub mod bucket;
pub mod object;
pub mod transfer;
