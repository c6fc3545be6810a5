use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cashcard::CashCard;
use crate::error::{CashCardError, Result};
use crate::store::CashCardStore;

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cash_cards (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Load cash cards from a CSV file with an `id,amount` header
pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<CashCard>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut cards = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        // +2: header row and 1-based numbering
        let card: CashCard =
            result.with_context(|| format!("Failed to deserialize cash card at line {}", line + 2))?;
        cards.push(card);
    }

    Ok(cards)
}

/// Insert cards, skipping ids already present. Returns the number inserted.
pub fn insert_cash_cards(conn: &Connection, cards: &[CashCard]) -> Result<usize> {
    let mut inserted = 0;
    let mut duplicates = 0;

    for card in cards {
        let result = conn.execute(
            "INSERT INTO cash_cards (id, amount) VALUES (?1, ?2)",
            params![card.id(), card.amount()],
        );

        match result {
            Ok(_) => inserted += 1,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                duplicates += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(inserted, duplicates, "cash card import finished");

    Ok(inserted)
}

pub fn find_cash_card(conn: &Connection, id: i64) -> Result<Option<CashCard>> {
    let row = conn
        .query_row(
            "SELECT id, amount FROM cash_cards WHERE id = ?1",
            params![id],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)),
        )
        .optional()?;

    row.map(|(id, amount)| stored_card(id, amount)).transpose()
}

pub fn get_all_cash_cards(conn: &Connection) -> Result<Vec<CashCard>> {
    let mut stmt = conn.prepare("SELECT id, amount FROM cash_cards ORDER BY id")?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, amount)| stored_card(id, amount))
        .collect()
}

/// A row that breaks the record invariants was written outside this crate;
/// that is a storage fault, not bad client input
fn stored_card(id: i64, amount: f64) -> Result<CashCard> {
    CashCard::new(id, amount)
        .map_err(|e| CashCardError::Storage(format!("invalid row in cash_cards: {}", e)))
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM cash_cards", [], |row| row.get(0))?;

    Ok(count)
}

/// SQLite-backed `CashCardStore`
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with the locked connection
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| CashCardError::Storage("sqlite connection lock poisoned".to_string()))?;
        f(&conn)
    }
}

impl CashCardStore for SqliteStore {
    fn find(&self, id: i64) -> Result<Option<CashCard>> {
        debug!(id, "sqlite lookup");
        self.with_conn(|conn| find_cash_card(conn, id))
            .inspect_err(|e| warn!(id, error = %e, "sqlite lookup failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn card(id: i64, amount: f64) -> CashCard {
        CashCard::new(id, amount).unwrap()
    }

    #[test]
    fn test_idempotency_import_twice() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let cards = vec![card(99, 123.45), card(100, 1.0), card(101, 150.0)];

        let inserted1 = insert_cash_cards(&conn, &cards).unwrap();
        let count1 = verify_count(&conn).unwrap();

        let inserted2 = insert_cash_cards(&conn, &cards).unwrap();
        let count2 = verify_count(&conn).unwrap();

        assert_eq!(inserted1, 3, "First import should insert 3 cash cards");
        assert_eq!(count1, 3);
        assert_eq!(inserted2, 0, "Second import should skip every duplicate id");
        assert_eq!(count2, 3);
    }

    #[test]
    fn test_find_cash_card() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        insert_cash_cards(&conn, &[card(99, 123.45)]).unwrap();

        assert_eq!(find_cash_card(&conn, 99).unwrap(), Some(card(99, 123.45)));
        assert_eq!(find_cash_card(&conn, 1000).unwrap(), None);
    }

    #[test]
    fn test_get_all_sorted_by_id() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        insert_cash_cards(&conn, &[card(3, 3.0), card(1, 1.0), card(2, 2.0)]).unwrap();

        let ids: Vec<i64> = get_all_cash_cards(&conn)
            .unwrap()
            .iter()
            .map(CashCard::id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_stored_row_is_storage_error() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO cash_cards (id, amount) VALUES (?1, ?2)",
            params![-7, 10.0],
        )
        .unwrap();

        let err = find_cash_card(&conn, -7).unwrap_err();
        assert!(
            matches!(&err, CashCardError::Storage(msg) if msg.contains("non-negative")),
            "unexpected error: {:?}",
            err
        );
        assert!(matches!(
            get_all_cash_cards(&conn),
            Err(CashCardError::Storage(_))
        ));
    }

    #[test]
    fn test_sqlite_store_find() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| insert_cash_cards(conn, &[card(99, 123.45)]))
            .unwrap();

        assert_eq!(store.find(99).unwrap(), Some(card(99, 123.45)));
        assert_eq!(store.find(5).unwrap(), None);
    }

    #[test]
    fn test_load_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,amount").unwrap();
        writeln!(file, "99,123.45").unwrap();
        writeln!(file, "100,1").unwrap();
        file.flush().unwrap();

        let cards = load_csv(file.path()).unwrap();

        assert_eq!(cards, vec![card(99, 123.45), card(100, 1.0)]);
    }

    #[test]
    fn test_load_csv_rejects_bad_row() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,amount").unwrap();
        writeln!(file, "abc,1.0").unwrap();
        file.flush().unwrap();

        let err = load_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
