use super::*;
use crate::repo::create_book;
use crate::repo::tests::setup_test_db;
use chrono::NaiveDate;

fn input(first: &str, family: &str) -> AuthorInput {
    AuthorInput {
        first_name: first.to_string(),
        family_name: family.to_string(),
        date_of_birth: None,
        date_of_death: None,
    }
}

#[test]
fn test_create_author() {
    let pool = setup_test_db();

    let author = create_author(&pool, input("Isaac", "Asimov")).unwrap();

    assert_eq!(author.get_first_name(), "Isaac");
    assert_eq!(author.get_family_name(), "Asimov");
}

#[test]
fn test_get_author() {
    let pool = setup_test_db();
    let dob = NaiveDate::from_ymd_opt(1920, 1, 2).unwrap();

    let created = create_author(&pool, AuthorInput {
        date_of_birth: Some(dob),
        ..input("Isaac", "Asimov")
    }).unwrap();
    let retrieved = get_author(&pool, &created.get_id()).unwrap().unwrap();

    assert_eq!(retrieved, created);
    assert_eq!(retrieved.get_date_of_birth(), Some(dob));
    assert_eq!(retrieved.get_date_of_death(), None);
}

#[test]
fn test_get_author_not_found() {
    let pool = setup_test_db();

    let result = get_author(&pool, "nonexistent").unwrap();

    assert!(result.is_none());
}

#[test]
fn test_list_authors_sorted_by_family_name() {
    let pool = setup_test_db();

    create_author(&pool, input("Patrick", "Rothfuss")).unwrap();
    create_author(&pool, input("Isaac", "Asimov")).unwrap();
    create_author(&pool, input("Ben", "Bova")).unwrap();
    create_author(&pool, input("Bob", "Billings")).unwrap();

    let authors = list_authors(&pool).unwrap();
    let family_names: Vec<String> = authors.iter().map(|a| a.get_family_name()).collect();

    assert_eq!(family_names, vec!["Asimov", "Billings", "Bova", "Rothfuss"]);
}

#[test]
fn test_list_authors_breaks_ties_by_first_name() {
    let pool = setup_test_db();

    create_author(&pool, input("Zed", "Smith")).unwrap();
    create_author(&pool, input("Anna", "Smith")).unwrap();

    let authors = list_authors(&pool).unwrap();

    assert_eq!(authors[0].get_first_name(), "Anna");
    assert_eq!(authors[1].get_first_name(), "Zed");
}

#[test]
fn test_list_authors_empty() {
    let pool = setup_test_db();
    assert!(list_authors(&pool).unwrap().is_empty());
}

#[test]
fn test_update_author() {
    let pool = setup_test_db();
    let dod = NaiveDate::from_ymd_opt(1992, 4, 6).unwrap();

    let created = create_author(&pool, input("Isac", "Asimov")).unwrap();
    let updated = update_author(&pool, &created.get_id(), AuthorInput {
        date_of_death: Some(dod),
        ..input("Isaac", "Asimov")
    }).unwrap().unwrap();

    assert_eq!(updated.get_id(), created.get_id());
    assert_eq!(updated.get_first_name(), "Isaac");

    let stored = get_author(&pool, &created.get_id()).unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.get_date_of_death(), Some(dod));
}

#[test]
fn test_update_author_clears_dates() {
    let pool = setup_test_db();
    let dob = NaiveDate::from_ymd_opt(1973, 6, 6).unwrap();

    let created = create_author(&pool, AuthorInput {
        date_of_birth: Some(dob),
        ..input("Patrick", "Rothfuss")
    }).unwrap();
    update_author(&pool, &created.get_id(), input("Patrick", "Rothfuss")).unwrap();

    let stored = get_author(&pool, &created.get_id()).unwrap().unwrap();
    assert_eq!(stored.get_date_of_birth(), None);
}

#[test]
fn test_update_author_not_found() {
    let pool = setup_test_db();

    let result = update_author(&pool, "nonexistent", input("Nobody", "Here")).unwrap();

    assert!(result.is_none());
    assert!(list_authors(&pool).unwrap().is_empty());
}

#[test]
fn test_delete_author() {
    let pool = setup_test_db();

    let created = create_author(&pool, input("Jim", "Jones")).unwrap();

    assert!(delete_author(&pool, &created.get_id()).unwrap());
    assert!(get_author(&pool, &created.get_id()).unwrap().is_none());
}

#[test]
fn test_delete_author_not_found() {
    let pool = setup_test_db();
    assert!(!delete_author(&pool, "nonexistent").unwrap());
}

#[test]
fn test_delete_author_with_books_is_rejected() {
    let pool = setup_test_db();

    let author = create_author(&pool, input("Isaac", "Asimov")).unwrap();
    create_book(&pool, "Foundation".to_string(), &author.get_id(), "Psychohistory".to_string(), "9780553293357".to_string()).unwrap();

    let err = delete_author(&pool, &author.get_id()).unwrap_err();
    assert!(is_foreign_key_violation(&err));
    assert!(get_author(&pool, &author.get_id()).unwrap().is_some());
}

#[test]
fn test_other_errors_are_not_foreign_key_violations() {
    let err = anyhow::Error::from(diesel::result::Error::NotFound);
    assert!(!is_foreign_key_violation(&err));

    let err = anyhow::anyhow!("database is locked");
    assert!(!is_foreign_key_violation(&err));
}
