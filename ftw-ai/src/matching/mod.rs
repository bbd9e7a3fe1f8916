mod matcher;

pub use matcher::{derive_specialty_match, ContractorMatcher};
