pub mod books;

use std::sync::Arc;

use book_gateway_kernel::{settings::Settings, ModuleRegistry};
use book_gateway_upstream::BookService;

/// Register all gateway modules with the registry
pub fn register_all(
    registry: &mut ModuleRegistry,
    book_service: Arc<dyn BookService>,
    settings: &Settings,
) {
    registry.register(books::create_module(
        book_service,
        settings.book_service.call_timeout(),
    ));
}
