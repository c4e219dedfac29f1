pub mod audio;
pub mod input;
