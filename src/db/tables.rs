use redb::TableDefinition;

/// Boards table: board id -> BoardRecord (serialized)
pub const BOARDS: TableDefinition<u64, &[u8]> = TableDefinition::new("boards");

/// Cards table: card id -> CardRecord (serialized)
pub const CARDS: TableDefinition<u64, &[u8]> = TableDefinition::new("cards");

/// Board cards index: board id -> Vec<card id>, ascending
/// Used for card counts and for cascade delete when a board is removed
pub const BOARD_CARDS: TableDefinition<u64, &[u8]> = TableDefinition::new("board_cards");

/// Autoincrement counters: sequence name -> last assigned id
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");
