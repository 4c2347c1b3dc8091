//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Load person aggregates together with their skills.
//! - Persist new aggregates and commit reconciled skill plans.
//!
//! # Invariants
//! - `create_person`, `save_person` and `remove_skills` each run in one
//!   immediate transaction.
//! - Skill statements are always scoped by `person_id`.
//! - Read paths reject out-of-range persisted levels instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::person::{
    NewPerson, NewSkill, Person, PersonId, Skill, SkillId, SKILL_LEVEL_MAX, SKILL_LEVEL_MIN,
};
use crate::reconcile::SkillPlan;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure for person persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Target person row does not exist.
    NotFound(PersonId),
    /// Persisted row violates a model invariant.
    InvalidData(String),
    /// Connection has not been migrated to the schema this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage collaborator used by the person service.
pub trait PersonRepository {
    /// Returns every person with skills, ordered by id.
    fn list_persons(&self) -> RepoResult<Vec<Person>>;
    /// Returns one person with skills.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Inserts a person and its initial skills atomically.
    fn create_person(&mut self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Commits overwritten person fields plus a reconciled skill plan.
    ///
    /// Returns `RepoError::NotFound` when the person row no longer exists.
    fn save_person(&mut self, person: &Person, plan: &SkillPlan) -> RepoResult<()>;
    /// Deletes a person; owned skills go with it.
    fn delete_person(&mut self, id: PersonId) -> RepoResult<()>;
    /// Deletes a subset of one person's skills, returning the number removed.
    fn remove_skills(&mut self, person_id: PersonId, skill_ids: &[SkillId]) -> RepoResult<usize>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    fn begin(&mut self) -> RepoResult<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn list_persons(&self) -> RepoResult<Vec<Person>> {
        let mut skills_by_person: HashMap<PersonId, Vec<Skill>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT id, person_id, name, level
                 FROM skills
                 ORDER BY person_id ASC, id ASC;",
            )?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                let skill = parse_skill_row(row)?;
                skills_by_person
                    .entry(skill.person_id)
                    .or_default()
                    .push(skill);
            }
        }

        let mut stmt = self
            .conn
            .prepare("SELECT id, name, display_name FROM persons ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            let id: PersonId = row.get("id")?;
            persons.push(Person {
                id,
                name: row.get("name")?,
                display_name: row.get("display_name")?,
                skills: skills_by_person.remove(&id).unwrap_or_default(),
            });
        }

        Ok(persons)
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let header = self
            .conn
            .query_row(
                "SELECT name, display_name FROM persons WHERE id = ?1;",
                [id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((name, display_name)) = header else {
            return Ok(None);
        };

        Ok(Some(Person {
            id,
            name,
            display_name,
            skills: load_skills(&*self.conn, id)?,
        }))
    }

    fn create_person(&mut self, person: &NewPerson) -> RepoResult<PersonId> {
        let tx = self.begin()?;
        tx.execute(
            "INSERT INTO persons (name, display_name) VALUES (?1, ?2);",
            params![person.name.as_str(), person.display_name.as_str()],
        )?;
        let person_id = tx.last_insert_rowid();
        for skill in &person.skills {
            insert_skill(&tx, person_id, skill)?;
        }
        tx.commit()?;
        Ok(person_id)
    }

    fn save_person(&mut self, person: &Person, plan: &SkillPlan) -> RepoResult<()> {
        let tx = self.begin()?;
        let changed = tx.execute(
            "UPDATE persons SET name = ?2, display_name = ?3 WHERE id = ?1;",
            params![person.id, person.name.as_str(), person.display_name.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(person.id));
        }

        // Deletes first: a name freed in this plan may be inserted again.
        let removed: Vec<SkillId> = plan.to_delete.iter().map(|skill| skill.id).collect();
        delete_skills(&tx, person.id, &removed)?;

        for update in &plan.to_update {
            tx.execute(
                "UPDATE skills SET level = ?3 WHERE id = ?1 AND person_id = ?2;",
                params![update.skill.id, person.id, update.level],
            )?;
        }
        for skill in &plan.to_insert {
            insert_skill(&tx, person.id, skill)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_person(&mut self, id: PersonId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn remove_skills(&mut self, person_id: PersonId, skill_ids: &[SkillId]) -> RepoResult<usize> {
        let tx = self.begin()?;
        let removed = delete_skills(&tx, person_id, skill_ids)?;
        tx.commit()?;
        Ok(removed)
    }
}

fn load_skills(conn: &Connection, person_id: PersonId) -> RepoResult<Vec<Skill>> {
    let mut stmt = conn.prepare(
        "SELECT id, person_id, name, level
         FROM skills
         WHERE person_id = ?1
         ORDER BY id ASC;",
    )?;
    let mut rows = stmt.query([person_id])?;
    let mut skills = Vec::new();
    while let Some(row) = rows.next()? {
        skills.push(parse_skill_row(row)?);
    }
    Ok(skills)
}

fn insert_skill(tx: &Transaction<'_>, person_id: PersonId, skill: &NewSkill) -> RepoResult<SkillId> {
    tx.execute(
        "INSERT INTO skills (person_id, name, level) VALUES (?1, ?2, ?3);",
        params![person_id, skill.name.as_str(), skill.level],
    )?;
    Ok(tx.last_insert_rowid())
}

fn delete_skills(tx: &Transaction<'_>, person_id: PersonId, skill_ids: &[SkillId]) -> RepoResult<usize> {
    let mut removed = 0;
    for skill_id in skill_ids {
        removed += tx.execute(
            "DELETE FROM skills WHERE id = ?1 AND person_id = ?2;",
            params![skill_id, person_id],
        )?;
    }
    Ok(removed)
}

fn parse_skill_row(row: &Row<'_>) -> RepoResult<Skill> {
    let id: SkillId = row.get("id")?;
    let level: i64 = row.get("level")?;
    if !(SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&level) {
        return Err(RepoError::InvalidData(format!(
            "invalid level `{level}` in skills.level for skill {id}"
        )));
    }
    Ok(Skill {
        id,
        person_id: row.get("person_id")?,
        name: row.get("name")?,
        level,
    })
}
