use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_status(s: &str) -> BookingStatus {
    s.parse().unwrap_or_else(|e| {
        tracing::error!("Invalid booking status in database: {}", e);
        BookingStatus::Pending
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Post operations

    fn create_post(&self, post: &NewPost) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO posts (title, content, category, image_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post.title,
                post.content,
                post.category,
                post.image_url,
                format_datetime(&Utc::now()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, content, category, image_url, created_at
             FROM posts ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Post {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                category: row.get(3)?,
                image_url: row.get(4)?,
                created_at: parse_datetime(&row.get::<_, String>(5)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_posts(&self) -> Result<i64> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count)
    }

    fn delete_post(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM posts WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn rewrite_post_by_title(
        &self,
        old_title: &str,
        new_title: Option<&str>,
        new_content: Option<&str>,
    ) -> Result<usize> {
        let rows = match (new_title, new_content) {
            (Some(title), Some(content)) => self.conn().execute(
                "UPDATE posts SET title = ?1, content = ?2 WHERE title = ?3",
                params![title, content, old_title],
            )?,
            (Some(title), None) => self.conn().execute(
                "UPDATE posts SET title = ?1 WHERE title = ?2",
                params![title, old_title],
            )?,
            (None, Some(content)) => self.conn().execute(
                "UPDATE posts SET content = ?1 WHERE title = ?2",
                params![content, old_title],
            )?,
            (None, None) => 0,
        };
        Ok(rows)
    }

    // Setting operations

    fn list_settings(&self) -> Result<Vec<Setting>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok(Setting {
                key: row.get(0)?,
                value: row.get(1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn seed_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // Booking operations

    fn create_booking(&self, booking: &NewBooking) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO bookings (name, phone, service, date, time, message, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                booking.name,
                booking.phone,
                booking.service,
                booking.date,
                booking.time,
                booking.message,
                BookingStatus::Pending.as_str(),
                format_datetime(&Utc::now()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn list_bookings(&self) -> Result<Vec<Booking>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, phone, service, date, time, message, status, created_at
             FROM bookings ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Booking {
                id: row.get(0)?,
                name: row.get(1)?,
                phone: row.get(2)?,
                service: row.get(3)?,
                date: row.get(4)?,
                time: row.get(5)?,
                message: row.get(6)?,
                status: parse_status(&row.get::<_, String>(7)?),
                created_at: parse_datetime(&row.get::<_, String>(8)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_booking_status(&self, id: i64, status: BookingStatus) -> Result<bool> {
        let rows = self.conn().execute(
            "UPDATE bookings SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        Ok(rows > 0)
    }

    fn delete_booking(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        self.conn().execute(
            "INSERT INTO tokens (id, token_hash, token_lookup, created_at, last_used_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                token.id,
                token.token_hash,
                token.token_lookup,
                format_datetime(&token.created_at),
                token.last_used_at.as_ref().map(format_datetime),
            ],
        )?;
        Ok(())
    }

    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, created_at, last_used_at
             FROM tokens WHERE token_lookup = ?1",
            params![lookup],
            |row| {
                Ok(Token {
                    id: row.get(0)?,
                    token_hash: row.get(1)?,
                    token_lookup: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                    last_used_at: row.get::<_, Option<String>>(4)?.map(|s| parse_datetime(&s)),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_token_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE tokens SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn has_admin_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> SqliteStore {
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store
    }

    fn sample_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: "본문".to_string(),
            category: Some("공지".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"posts".to_string()));
        assert!(tables.contains(&"settings".to_string()));
        assert!(tables.contains(&"bookings".to_string()));
        assert!(tables.contains(&"tokens".to_string()));
    }

    #[test]
    fn test_post_crud_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let first = store.create_post(&sample_post("첫 글")).unwrap();
        let second = store.create_post(&sample_post("둘째 글")).unwrap();

        let posts = store.list_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, second);
        assert_eq!(posts[1].id, first);
        assert_eq!(posts[0].title, "둘째 글");
        assert_eq!(posts[0].category.as_deref(), Some("공지"));

        assert!(store.delete_post(second).unwrap());
        assert!(!store.delete_post(second).unwrap());
        assert_eq!(store.count_posts().unwrap(), 1);
    }

    #[test]
    fn test_rewrite_post_by_title() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.create_post(&sample_post("옛 제목")).unwrap();

        let touched = store
            .rewrite_post_by_title("옛 제목", Some("새 제목"), Some("새 본문"))
            .unwrap();
        assert_eq!(touched, 1);

        // The old title no longer matches, so the rewrite is idempotent.
        let touched = store
            .rewrite_post_by_title("옛 제목", Some("새 제목"), Some("새 본문"))
            .unwrap();
        assert_eq!(touched, 0);

        let posts = store.list_posts().unwrap();
        assert_eq!(posts[0].title, "새 제목");
        assert_eq!(posts[0].content, "새 본문");
    }

    #[test]
    fn test_setting_seed_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.seed_setting("primary_color", "#88B04B").unwrap();
        store.upsert_setting("primary_color", "#123456").unwrap();
        store.seed_setting("primary_color", "#88B04B").unwrap();

        let settings = store.list_settings().unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].value, "#123456");
    }

    #[test]
    fn test_upsert_setting_replaces() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        store.upsert_setting("site_name", "상담소").unwrap();
        store.upsert_setting("site_name", "새 상담소").unwrap();

        let settings = store.list_settings().unwrap();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].value, "새 상담소");
    }

    #[test]
    fn test_booking_lifecycle() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        let id = store
            .create_booking(&NewBooking {
                name: "Kim".to_string(),
                phone: "010-0000-0000".to_string(),
                service: "사주 운명 상담".to_string(),
                date: "2025-01-01".to_string(),
                time: "10:00".to_string(),
                message: None,
            })
            .unwrap();

        let bookings = store.list_bookings().unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].status, BookingStatus::Pending);

        assert!(
            store
                .update_booking_status(id, BookingStatus::Confirmed)
                .unwrap()
        );
        assert_eq!(
            store.list_bookings().unwrap()[0].status,
            BookingStatus::Confirmed
        );

        // No transition guard: cancelled can follow confirmed.
        assert!(
            store
                .update_booking_status(id, BookingStatus::Cancelled)
                .unwrap()
        );
        assert_eq!(
            store.list_bookings().unwrap()[0].status,
            BookingStatus::Cancelled
        );

        assert!(store.delete_booking(id).unwrap());
        assert!(!store.delete_booking(id).unwrap());
        assert!(store.list_bookings().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_booking_touches_no_rows() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        assert!(
            !store
                .update_booking_status(999, BookingStatus::Confirmed)
                .unwrap()
        );
    }

    #[test]
    fn test_token_lookup() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp);

        assert!(!store.has_admin_token().unwrap());

        let token = Token {
            id: "token-1".to_string(),
            token_hash: "hash".to_string(),
            token_lookup: "lookup12".to_string(),
            created_at: Utc::now(),
            last_used_at: None,
        };
        store.create_token(&token).unwrap();

        assert!(store.has_admin_token().unwrap());
        let fetched = store.get_token_by_lookup("lookup12").unwrap().unwrap();
        assert_eq!(fetched.id, "token-1");
        assert!(fetched.last_used_at.is_none());

        store.update_token_last_used("token-1").unwrap();
        let fetched = store.get_token_by_lookup("lookup12").unwrap().unwrap();
        assert!(fetched.last_used_at.is_some());
    }
}
