pub mod metadata;
pub mod providers;
pub mod recommendations;
