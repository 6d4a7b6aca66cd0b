use magdb_core::db::open_db_in_memory;
use magdb_core::{
    ArticleRepository, Author, AuthorId, AuthorRepository, Magazine, MagazineRepository,
    ReferenceError, SqliteArticleRepository, SqliteAuthorRepository, SqliteMagazineRepository,
    Violation,
};
use serde_json::json;

#[test]
fn transient_author_serializes_with_null_id() {
    let author = Author::new("Ama").unwrap();
    let value = serde_json::to_value(&author).unwrap();
    assert_eq!(value, json!({ "id": null, "name": "Ama", "email": null }));
}

#[test]
fn persisted_entities_serialize_plain_integer_ids() {
    let gateway = open_db_in_memory().unwrap();
    let ama = SqliteAuthorRepository::new(&gateway).create("Ama").unwrap();
    let tech = SqliteMagazineRepository::new(&gateway)
        .create("Tech Weekly", "Tech")
        .unwrap();
    let article = SqliteArticleRepository::new(&gateway)
        .create(&ama, "AI Rising", &tech)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&tech).unwrap(),
        json!({ "id": 1, "name": "Tech Weekly", "category": "Tech" })
    );
    assert_eq!(
        serde_json::to_value(&article).unwrap(),
        json!({
            "id": 1,
            "title": "AI Rising",
            "content": "",
            "author_id": 1,
            "magazine_id": 1
        })
    );
}

#[test]
fn ids_deserialize_from_bare_integers() {
    let id: AuthorId = serde_json::from_str("7").unwrap();
    assert_eq!(id, AuthorId(7));
    assert_eq!(id.to_string(), "7");
}

#[test]
fn author_email_is_validated_on_construction() {
    let err = Author::with_email("Ama", "ama-at-example").unwrap_err();
    assert_eq!(err.field, "email");
    assert_eq!(err.violation, Violation::Malformed("email address"));

    let author = Author::with_email("Ama", "  ama@example.com  ").unwrap();
    assert_eq!(author.email(), Some("ama@example.com"));
}

#[test]
fn clearing_email_is_allowed() {
    let mut author = Author::with_email("Ama", "ama@example.com").unwrap();
    author.set_email(None).unwrap();
    assert_eq!(author.email(), None);
}

#[test]
fn require_id_reports_the_missing_reference() {
    let author = Author::new("Ama").unwrap();
    let magazine = Magazine::new("Tech Weekly", "Tech").unwrap();

    assert_eq!(
        author.require_id("article").unwrap_err(),
        ReferenceError {
            entity: "article",
            reference: "author"
        }
    );
    let err = magazine.require_id("article").unwrap_err();
    assert_eq!(
        err.to_string(),
        "article magazine has not been persisted (no id assigned)"
    );
}

#[test]
fn magazine_setters_validate_like_the_constructor() {
    let mut magazine = Magazine::new("Tech Weekly", "Tech").unwrap();

    let err = magazine.set_category("  ").unwrap_err();
    assert_eq!(err.violation, Violation::Blank);
    assert_eq!(magazine.category(), "Tech");

    magazine.set_name("  Wired  ").unwrap();
    assert_eq!(magazine.name(), "Wired");
}

#[test]
fn repositories_round_trip_entities_through_storage() {
    let gateway = open_db_in_memory().unwrap();
    let authors = SqliteAuthorRepository::new(&gateway);

    let mut author = Author::with_email("Ngũgĩ", "ngugi@example.com").unwrap();
    authors.save(&mut author).unwrap();

    let loaded = authors.find_by_id(author.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded, author);
    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        json!({ "id": 1, "name": "Ngũgĩ", "email": "ngugi@example.com" })
    );
}
