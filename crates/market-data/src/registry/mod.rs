//! Provider registry: priority-ordered fallback over quote providers.

mod registry;

pub use registry::{ProviderRegistry, RegistryConfig};
