use super::*;
use crate::CardId;
use crate::Key;
use crate::roster::Entry;
use crate::save::Store;
use anyhow::Context;
use const_format::concatcp;
use tokio_postgres::Client;

/// Each write is a single statement, so a failure leaves no partial rows.
/// `promote` drops whichever row the player points at when it runs, so a
/// retry after a commit whose reply was lost does not orphan a card row.
#[rustfmt::skip]
#[async_trait::async_trait]
impl Store for Client {
    async fn enlist(&self, name: &str, card: CardId) -> anyhow::Result<Key> {
        const SQL: &str = concatcp!(
            "WITH   card AS ( ",
                   "INSERT INTO ", CARDS, " (id) VALUES ($2) RETURNING key ",
            ") ",
            "INSERT INTO ", PLAYERS, " (name, leader) ",
            "SELECT $1, key FROM card ",
            "RETURNING leader"
        );
        self.query_one(SQL, &[&name, &card])
            .await
            .with_context(|| format!("enlisting {}", name))
            .map(|row| row.get::<_, Key>(0))
    }
    async fn promote(&self, name: &str, card: CardId) -> anyhow::Result<Key> {
        const SQL: &str = concatcp!(
            "WITH   old AS ( ",
                   "SELECT leader FROM ", PLAYERS, " WHERE name = $1 ",
            "),     card AS ( ",
                   "INSERT INTO ", CARDS, " (id) ",
                   "SELECT $2::BIGINT FROM old ",
                   "RETURNING key ",
            "),     gone AS ( ",
                   "DELETE FROM ", CARDS, " ",
                   "WHERE  key IN (SELECT leader FROM old) ",
            ") ",
            "UPDATE ", PLAYERS, " ",
            "SET    leader = card.key ",
            "FROM   card ",
            "WHERE  name = $1 ",
            "RETURNING leader"
        );
        self.query_opt(SQL, &[&name, &card])
            .await
            .with_context(|| format!("promoting leader of {}", name))?
            .map(|row| row.get::<_, Key>(0))
            .ok_or_else(|| anyhow::anyhow!("player {} not persisted", name))
    }
    async fn roster(&self) -> anyhow::Result<Vec<(String, Entry)>> {
        const SQL: &str = concatcp!(
            "SELECT p.name, ",
                   "c.id, ",
                   "c.key ",
            "FROM   ", PLAYERS, " p ",
            "JOIN   ", CARDS,   " c ON c.key = p.leader"
        );
        self.query(SQL, &[])
            .await
            .context("loading roster")
            .map(|rows| {
                rows.into_iter()
                    .map(|row| {
                        let name = row.get::<_, String>(0);
                        let card = row.get::<_, CardId>(1);
                        let key = row.get::<_, Key>(2);
                        (name, Entry::stored(card, key))
                    })
                    .collect()
            })
    }
    async fn ping(&self) -> anyhow::Result<()> {
        self.execute("SELECT 1", &[])
            .await
            .context("health check")
            .map(|_| ())
    }
}
