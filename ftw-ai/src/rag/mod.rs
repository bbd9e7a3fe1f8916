mod context;

pub use context::RagContextBuilder;
