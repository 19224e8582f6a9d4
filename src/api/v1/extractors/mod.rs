mod caller;

pub use caller::{Caller, CallerExtractor};
