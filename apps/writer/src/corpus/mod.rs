// Training corpus: loading the labeled posts and checking their quality.

pub mod loader;
pub mod quality;

pub use loader::load;
pub use quality::verify;
