use halloffame_core::db::open_db_in_memory;
use halloffame_core::{
    reconcile, NewPerson, NewSkill, PersonRepository, RepoError, SqlitePersonRepository,
};
use rusqlite::Connection;

fn ada() -> NewPerson {
    NewPerson {
        name: "Ada Lovelace".to_string(),
        display_name: "ada".to_string(),
        skills: vec![NewSkill::new("Math", 9), NewSkill::new("Poetry", 4)],
    }
}

fn skill_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM skills;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip_includes_skills() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();

    let id = repo.create_person(&ada()).unwrap();
    let loaded = repo.get_person(id).unwrap().unwrap();

    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Ada Lovelace");
    assert_eq!(loaded.display_name, "ada");
    assert_eq!(loaded.skills.len(), 2);
    assert!(loaded.skills.iter().all(|skill| skill.person_id == id));
    assert_eq!(loaded.skill_named("Math").map(|skill| skill.level), Some(9));
}

#[test]
fn get_missing_person_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
    assert!(repo.get_person(42).unwrap().is_none());
}

#[test]
fn list_groups_skills_by_owner() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();

    let first = repo.create_person(&ada()).unwrap();
    let second = repo
        .create_person(&NewPerson {
            name: "Alan Turing".to_string(),
            display_name: "alan".to_string(),
            skills: Vec::new(),
        })
        .unwrap();

    let persons = repo.list_persons().unwrap();
    assert_eq!(persons.len(), 2);
    assert_eq!(persons[0].id, first);
    assert_eq!(persons[0].skills.len(), 2);
    assert_eq!(persons[1].id, second);
    assert!(persons[1].skills.is_empty());
}

#[test]
fn create_is_atomic_when_a_skill_insert_fails() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
        let mut broken = ada();
        broken.skills.push(NewSkill::new("Math", 3));

        let err = repo.create_person(&broken).unwrap_err();
        assert!(matches!(err, RepoError::Db(_)));
        assert!(repo.list_persons().unwrap().is_empty());
    }
    assert_eq!(skill_rows(&conn), 0);
}

#[test]
fn save_person_applies_plan_in_one_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
    let id = repo.create_person(&ada()).unwrap();

    let mut person = repo.get_person(id).unwrap().unwrap();
    let math_id = person.skill_named("Math").unwrap().id;
    person.name = "Augusta Ada King".to_string();
    let desired = vec![NewSkill::new("Math", 10), NewSkill::new("Engines", 7)];
    let plan = reconcile(&person.skills, Some(desired.as_slice()));
    repo.save_person(&person, &plan).unwrap();

    let reloaded = repo.get_person(id).unwrap().unwrap();
    assert_eq!(reloaded.name, "Augusta Ada King");
    assert_eq!(reloaded.skills.len(), 2);
    let math = reloaded.skill_named("Math").unwrap();
    assert_eq!((math.id, math.level), (math_id, 10));
    assert_eq!(reloaded.skill_named("Engines").map(|s| s.level), Some(7));
    assert!(reloaded.skill_named("Poetry").is_none());
}

#[test]
fn save_person_for_removed_row_returns_not_found_and_writes_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
        let id = repo.create_person(&ada()).unwrap();
        let person = repo.get_person(id).unwrap().unwrap();
        let plan = reconcile(&person.skills, Some(&[NewSkill::new("Chess", 2)][..]));

        repo.delete_person(id).unwrap();
        let err = repo.save_person(&person, &plan).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
    }
    assert_eq!(skill_rows(&conn), 0);
}

#[test]
fn delete_person_cascades_to_skills() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
        let id = repo.create_person(&ada()).unwrap();
        repo.delete_person(id).unwrap();

        assert!(repo.get_person(id).unwrap().is_none());
        let err = repo.delete_person(id).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
    assert_eq!(skill_rows(&conn), 0);
}

#[test]
fn remove_skills_is_scoped_to_owner() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
    let owner = repo.create_person(&ada()).unwrap();
    let other = repo.create_person(&ada()).unwrap();

    let owner_skills = repo.get_person(owner).unwrap().unwrap().skills;
    let other_skill = repo.get_person(other).unwrap().unwrap().skills[0].id;
    let ids = vec![owner_skills[0].id, other_skill];

    assert_eq!(repo.remove_skills(owner, &ids).unwrap(), 1);
    assert_eq!(repo.get_person(owner).unwrap().unwrap().skills.len(), 1);
    assert_eq!(repo.get_person(other).unwrap().unwrap().skills.len(), 2);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();

    match SqlitePersonRepository::try_new(&mut conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn out_of_range_persisted_level_is_reported_as_invalid_data() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO persons (name, display_name) VALUES ('Ada', 'ada');
         PRAGMA ignore_check_constraints = ON;
         INSERT INTO skills (person_id, name, level) VALUES (1, 'Math', 42);
         PRAGMA ignore_check_constraints = OFF;",
    )
    .unwrap();

    let repo = SqlitePersonRepository::try_new(&mut conn).unwrap();
    let err = repo.get_person(1).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
