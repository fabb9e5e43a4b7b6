mod build;

pub use build::build_execute;
