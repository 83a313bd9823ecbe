pub mod config;
pub mod confirm;
pub mod expense;
pub mod export;
pub mod summary;
pub mod system;

use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in expense::definitions()
        .into_iter()
        .chain(confirm::definitions())
        .chain(summary::definitions())
        .chain(export::definitions())
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
