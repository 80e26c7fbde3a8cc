pub mod files;

pub use files::TaskStore;
