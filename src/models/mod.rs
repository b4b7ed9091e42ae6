pub mod card;
pub mod loaders;

pub use card::{CardEntry, CardFace, Decklist, ImageUris};
pub use loaders::{load_decklist_file, parse_decklist_text, DecklistLine};
