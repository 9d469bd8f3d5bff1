pub mod extract;
pub mod job;
pub mod process;
pub mod status;
pub mod translate;
