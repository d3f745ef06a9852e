pub mod frd_reader;

pub use frd_reader::FrdReader;
