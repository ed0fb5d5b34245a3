pub mod persona;
pub mod post;
pub mod training;
