pub mod club;
pub mod error_body;
pub mod schedule;
pub mod server_time;
pub mod tournament;
