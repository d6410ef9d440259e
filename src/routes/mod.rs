pub mod boards;
pub mod cards;
pub mod health;
pub mod lookup;

pub use boards::{
    create_board, delete_board, get_board, list_board_cards, list_boards, update_board,
};
pub use cards::{create_card, delete_card, get_card, like_card, list_cards, update_card};
pub use health::health_check;
pub use lookup::{find_or_not_found, OrNotFound};
