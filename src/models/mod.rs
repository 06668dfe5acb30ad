pub mod card;
pub mod formatted_card;
pub mod set_options;

pub use card::{parse_cards, Card, CardId, CardRecord};
pub use formatted_card::{FormattedCard, LOAD_FAILED_MESSAGE};
pub use set_options::SetOptions;
