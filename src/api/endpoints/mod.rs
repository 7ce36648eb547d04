pub mod confirm;
pub mod diseases;
pub mod health;
pub mod screen;
pub mod sessions;
