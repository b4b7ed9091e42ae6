pub mod decklist_loader;

pub use decklist_loader::{load_decklist_file, parse_decklist_text, DecklistLine};
