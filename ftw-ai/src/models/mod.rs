mod context;
mod crm;
mod job;
mod matching;
mod scope;

pub use context::*;
pub use crm::*;
pub use job::*;
pub use matching::*;
pub use scope::*;
