/// Table of persisted card instances.
#[rustfmt::skip]
pub const CARDS:   &str = "cards";
/// Table of players and their current leader.
#[rustfmt::skip]
pub const PLAYERS: &str = "players";

/// Pure schema definitions for Postgres tables.
/// No I/O operations - just metadata about table structure.
pub trait Schema {
    /// Returns the name of the table in the database.
    fn name() -> &'static str;
    /// Returns the SQL to prepare the table schema.
    fn creates() -> &'static str;
}

/// One row per live leader card.
pub struct Cards;
/// One row per registered player, pointing at its live leader row.
pub struct Players;

impl Schema for Cards {
    fn name() -> &'static str {
        CARDS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            CARDS,
            " (
                key     BIGSERIAL PRIMARY KEY,
                id      BIGINT NOT NULL
            );"
        )
    }
}

impl Schema for Players {
    fn name() -> &'static str {
        PLAYERS
    }
    fn creates() -> &'static str {
        const_format::concatcp!(
            "CREATE TABLE IF NOT EXISTS ",
            PLAYERS,
            " (
                name    TEXT PRIMARY KEY NOT NULL,
                leader  BIGINT NOT NULL
            );"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_names_its_table() {
        assert!(Cards::creates().contains(Cards::name()));
        assert!(Players::creates().contains(Players::name()));
        assert!(Players::creates().contains("PRIMARY KEY"));
    }
}
