pub mod decklist_service;
pub mod image_resolver;
pub mod scan_cache;

pub use decklist_service::DecklistService;
pub use image_resolver::ImageResolver;
pub use scan_cache::ScanCache;
