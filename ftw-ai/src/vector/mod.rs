mod client;

pub use client::VectorClient;
