pub mod anime;
pub mod character;
pub mod director;
pub mod studio;
