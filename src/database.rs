use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use rusqlite::{params, Connection};

use crate::{
    model::{NotificationContent, NotificationRequest, Trigger},
    notify::{NotificationId, NotificationService, NotifyError, Permission},
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type NotifyResult<T> = std::result::Result<T, NotifyError>;

pub fn default_data_dir() -> io::Result<PathBuf> {
    match env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".todo")),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine home directory",
        )),
    }
}

pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// On-device queue of scheduled notifications. Entries outlive the todo list,
/// which is never written here.
pub struct LocalNotificationCenter {
    conn: Connection,
    permission: Permission,
}

impl LocalNotificationCenter {
    pub fn open(path: &Path, permission: Permission) -> NotifyResult<Self> {
        if let Some(dir) = path.parent() {
            ensure_dir(dir)?;
        }
        Self::with_connection(Connection::open(path)?, permission)
    }

    #[cfg(test)]
    pub fn in_memory(permission: Permission) -> NotifyResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, permission)
    }

    fn with_connection(conn: Connection, permission: Permission) -> NotifyResult<Self> {
        init_db(&conn)?;
        Ok(LocalNotificationCenter { conn, permission })
    }

    fn insert(
        &self,
        content: &NotificationContent,
        repeats: bool,
        time: Option<(u32, u32)>,
        next_fire: NaiveDateTime,
    ) -> NotifyResult<NotificationId> {
        self.conn.execute(
            "INSERT INTO notifications (title, body, repeats, hour, minute, next_fire) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                content.title,
                content.body,
                repeats,
                time.map(|(hour, _)| hour),
                time.map(|(_, minute)| minute),
                next_fire.format(TIME_FORMAT).to_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn schedule_at(
        &mut self,
        request: NotificationRequest,
        now: NaiveDateTime,
    ) -> NotifyResult<NotificationId> {
        if self.permission == Permission::Denied {
            return Err(NotifyError::PermissionDenied);
        }

        match request.trigger {
            Trigger::Calendar {
                hour,
                minute,
                repeats,
            } => {
                let next_fire = next_occurrence(hour, minute, now)?;
                self.insert(&request.content, repeats, Some((hour, minute)), next_fire)
            }
            Trigger::Date(date) => {
                let at = truncate_subsec(date.naive_local());
                if at <= now {
                    return Err(NotifyError::TriggerInPast(at));
                }
                self.insert(&request.content, false, None, at)
            }
        }
    }
}

impl NotificationService for LocalNotificationCenter {
    fn schedule(&mut self, request: NotificationRequest) -> NotifyResult<NotificationId> {
        self.schedule_at(request, Local::now().naive_local())
    }

    fn take_due(&mut self, now: NaiveDateTime) -> NotifyResult<Vec<NotificationContent>> {
        let tx = self.conn.transaction()?;
        let due: Vec<DueRow> = {
            let mut stmt = tx.prepare(
                "SELECT id, title, body, repeats, hour, minute FROM notifications WHERE next_fire <= ? ORDER BY next_fire",
            )?;
            let rows = stmt.query_map(params![now.format(TIME_FORMAT).to_string()], |row| {
                Ok(DueRow {
                    id: row.get(0)?,
                    content: NotificationContent {
                        title: row.get(1)?,
                        body: row.get(2)?,
                    },
                    repeats: row.get(3)?,
                    hour: row.get(4)?,
                    minute: row.get(5)?,
                })
            })?;
            rows.filter_map(Result::ok).collect()
        };

        // Dropping `tx` on an early return rolls every row back.
        for row in &due {
            match (row.repeats, row.hour, row.minute) {
                (true, Some(hour), Some(minute)) => {
                    let next_fire = next_occurrence(hour, minute, now)?;
                    tx.execute(
                        "UPDATE notifications SET next_fire = ?2 WHERE id = ?1",
                        params![row.id, next_fire.format(TIME_FORMAT).to_string()],
                    )?;
                }
                _ => {
                    tx.execute("DELETE FROM notifications WHERE id = ?", params![row.id])?;
                }
            }
        }
        tx.commit()?;

        Ok(due.into_iter().map(|row| row.content).collect())
    }

    fn pending(&self) -> NotifyResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM notifications", params![], |row| row.get(0))?;
        Ok(count as usize)
    }
}

struct DueRow {
    id: NotificationId,
    content: NotificationContent,
    repeats: bool,
    hour: Option<u32>,
    minute: Option<u32>,
}

fn init_db(conn: &Connection) -> NotifyResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS notifications (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            repeats BOOLEAN NOT NULL,
            hour INTEGER,
            minute INTEGER,
            next_fire TEXT NOT NULL
        )",
        params![],
    )?;
    Ok(())
}

fn truncate_subsec(time: NaiveDateTime) -> NaiveDateTime {
    time.with_nanosecond(0).unwrap_or(time)
}

/// First `hour:minute` strictly after `after`.
fn next_occurrence(hour: u32, minute: u32, after: NaiveDateTime) -> NotifyResult<NaiveDateTime> {
    let today = after
        .date()
        .and_hms_opt(hour, minute, 0)
        .ok_or(NotifyError::InvalidTime { hour, minute })?;
    if today > after {
        Ok(today)
    } else {
        Ok(today + Duration::days(1))
    }
}
