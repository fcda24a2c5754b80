mod env_overrides;
mod loader;
mod schema;
#[cfg(test)]
pub(crate) mod test_env;

pub use schema::{AssistantConfig, Config, ExtractionConfig};
