use magdb_core::db::open_db_in_memory;
use magdb_core::{
    Author, AuthorRepository, Magazine, MagazineRepository, PersistenceError, RepoError,
    SqliteAuthorRepository, SqliteMagazineRepository, StorageGateway, Violation,
};

#[test]
fn create_keeps_the_exact_name_and_assigns_an_id() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    for name in ["Ama", "  padded  ", "Ngũgĩ wa Thiong'o"] {
        let author = authors.create(name).unwrap();
        assert_eq!(author.name(), name);
        assert!(author.is_persisted());

        let loaded = authors.find_by_id(author.id().unwrap()).unwrap().unwrap();
        assert_eq!(loaded, author);
    }
}

#[test]
fn blank_names_are_rejected_before_any_write() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    for name in ["", "   ", "\n\t"] {
        let err = authors.create(name).unwrap_err();
        match err {
            RepoError::Validation(err) => {
                assert_eq!(err.entity, "author");
                assert_eq!(err.field, "name");
                assert_eq!(err.violation, Violation::Blank);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(count_rows(&gateway, "authors"), 0);
}

#[test]
fn save_inserts_once_then_updates_email_in_place() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    let mut author = Author::with_email("Ama", "ama@example.com").unwrap();
    assert!(author.id().is_none());
    authors.save(&mut author).unwrap();
    let id = author.id().unwrap();

    author.set_email(Some("ama@press.example")).unwrap();
    authors.save(&mut author).unwrap();

    assert_eq!(author.id(), Some(id));
    assert_eq!(count_rows(&gateway, "authors"), 1);
    let loaded = authors.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.email(), Some("ama@press.example"));
    assert_eq!(loaded.name(), "Ama");
}

#[test]
fn duplicate_email_is_a_persistence_error() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    let mut first = Author::with_email("Ama", "shared@example.com").unwrap();
    authors.save(&mut first).unwrap();

    let mut second = Author::with_email("Kofi", "shared@example.com").unwrap();
    let err = authors.save(&mut second).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Persistence(PersistenceError::Constraint { .. })
    ));
    assert!(second.id().is_none());
    assert_eq!(count_rows(&gateway, "authors"), 1);
}

#[test]
fn authors_without_email_do_not_collide() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    authors.create("Ama").unwrap();
    authors.create("Ama").unwrap();

    assert_eq!(authors.list().unwrap().len(), 2);
}

#[test]
fn save_reports_not_found_when_row_vanished() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    let mut author = authors.create("Ama").unwrap();
    let id = author.id().unwrap();
    gateway
        .execute("DELETE FROM authors WHERE id = ?1;", [id.0])
        .unwrap();

    author.set_email(Some("ama@example.com")).unwrap();
    let err = authors.save(&mut author).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "author", id: missing } if missing == id.0
    ));
}

#[test]
fn articles_are_listed_in_insertion_order() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);
    let magazines = SqliteMagazineRepository::new(&gateway);

    let ama = authors.create("Ama").unwrap();
    let kofi = authors.create("Kofi").unwrap();
    let tech = magazines.create("Tech Weekly", "Tech").unwrap();

    assert!(authors.articles(ama.id().unwrap()).unwrap().is_empty());

    authors.add_article(&ama, &tech, "First Light").unwrap();
    authors.add_article(&kofi, &tech, "Not Ama's piece").unwrap();
    authors.add_article(&ama, &tech, "Second Wind").unwrap();

    let titles: Vec<String> = authors
        .articles(ama.id().unwrap())
        .unwrap()
        .iter()
        .map(|article| article.title().to_string())
        .collect();
    assert_eq!(titles, vec!["First Light", "Second Wind"]);
}

#[test]
fn magazines_are_distinct_and_ordered_by_id() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);
    let magazines = SqliteMagazineRepository::new(&gateway);

    let ama = authors.create("Ama").unwrap();
    let tech = magazines.create("Tech Weekly", "Tech").unwrap();
    let science = magazines.create("Science Today", "Science").unwrap();
    magazines.create("Unrelated", "Other").unwrap();

    authors.add_article(&ama, &science, "Quantum Leap").unwrap();
    authors.add_article(&ama, &tech, "AI Rising").unwrap();
    authors.add_article(&ama, &science, "Dark Matter Notes").unwrap();
    authors.add_article(&ama, &tech, "Chips and Dips").unwrap();

    let reached = authors.magazines(ama.id().unwrap()).unwrap();
    assert_eq!(reached, vec![tech, science]);
}

#[test]
fn magazine_categories_are_distinct_and_follow_magazine_order() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);
    let magazines = SqliteMagazineRepository::new(&gateway);

    let ama = authors.create("Ama").unwrap();
    assert!(authors
        .magazine_categories(ama.id().unwrap())
        .unwrap()
        .is_empty());

    let tech = magazines.create("Tech Weekly", "Tech").unwrap();
    let science = magazines.create("Science Today", "Science").unwrap();
    let gadgets = magazines.create("Gadget Digest", "Tech").unwrap();

    authors.add_article(&ama, &gadgets, "Pocket Robots").unwrap();
    authors.add_article(&ama, &science, "Quantum Leap").unwrap();
    authors.add_article(&ama, &tech, "AI Rising").unwrap();

    assert_eq!(
        authors.magazine_categories(ama.id().unwrap()).unwrap(),
        vec!["Tech".to_string(), "Science".to_string()]
    );
}

#[test]
fn add_article_requires_a_persisted_magazine() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    let ama = authors.create("Ama").unwrap();
    let draft = Magazine::new("Tech Weekly", "Tech").unwrap();

    let err = authors.add_article(&ama, &draft, "AI Rising").unwrap_err();
    match err {
        RepoError::Reference(err) => {
            assert_eq!(err.entity, "article");
            assert_eq!(err.reference, "magazine");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(count_rows(&gateway, "articles"), 0);
}

#[test]
fn add_article_validates_the_title() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);
    let magazines = SqliteMagazineRepository::new(&gateway);

    let ama = authors.create("Ama").unwrap();
    let tech = magazines.create("Tech Weekly", "Tech").unwrap();

    let err = authors.add_article(&ama, &tech, "AI").unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field == "title"));
    assert_eq!(count_rows(&gateway, "articles"), 0);
}

fn count_rows(gateway: &StorageGateway, table: &str) -> i64 {
    gateway
        .query(&format!("SELECT COUNT(*) AS total FROM {table};"), [])
        .unwrap()[0]
        .integer("total")
        .unwrap()
}
