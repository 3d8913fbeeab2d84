pub mod snapshot;
pub mod table;
pub mod target;
pub mod text;
