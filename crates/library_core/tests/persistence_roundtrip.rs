use library_core::{
    LibraryConfig, LibraryError, LibraryService, ParseErrorKind, ReturnPolicy, StorageError,
};
use std::fs;

fn open(config: &LibraryConfig) -> LibraryService<library_core::FileResource> {
    let mut library = LibraryService::from_config(config);
    library.load_all();
    library
}

#[test]
fn missing_files_load_empty_and_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());

    let library = open(&config);

    assert_eq!(library.books().count(), 0);
    assert_eq!(library.members().count(), 0);
    assert!(config.books_path.is_file());
    assert!(config.members_path.is_file());
}

#[test]
fn save_then_load_reproduces_both_stores() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());

    let mut library = open(&config);
    library.add_book(1, "Biology 101", "Campbell", "Science").unwrap();
    library.add_book(2, "Physics", "Halliday", "Science").unwrap();
    library.add_book(3, "Emma", "Austen", "").unwrap();
    library.add_member(10, "Ann", "ann@example.org").unwrap();
    library.add_member(11, "Bo", "bo@example.org").unwrap();
    library.issue_book(1, 10).unwrap();
    library.issue_book(3, 10).unwrap();

    let reloaded = open(&config);

    let original_books: Vec<_> = library.books().cloned().collect();
    let reloaded_books: Vec<_> = reloaded.books().cloned().collect();
    assert_eq!(reloaded_books, original_books);

    let original_members: Vec<_> = library.members().cloned().collect();
    let reloaded_members: Vec<_> = reloaded.members().cloned().collect();
    assert_eq!(reloaded_members, original_members);
    assert_eq!(reloaded.member(10).unwrap().issued_books, vec![1, 3]);
}

#[test]
fn files_use_comma_and_hyphen_layout() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());

    let mut library = open(&config);
    library.add_book(3, "Dune", "Herbert", "Fiction").unwrap();
    library.add_book(7, "Emma", "Austen", "Fiction").unwrap();
    library.add_member(1, "Ann", "ann@example.org").unwrap();
    library.add_member(2, "Bo", "bo@example.org").unwrap();
    library.issue_book(3, 1).unwrap();
    library.issue_book(7, 1).unwrap();

    assert_eq!(
        fs::read_to_string(&config.books_path).unwrap(),
        "3,Dune,Herbert,Fiction,true\n7,Emma,Austen,Fiction,true\n"
    );
    assert_eq!(
        fs::read_to_string(&config.members_path).unwrap(),
        "1,Ann,ann@example.org,3-7-\n2,Bo,bo@example.org,\n"
    );
}

#[test]
fn malformed_book_line_is_skipped_and_rest_loads() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(
        &config.books_path,
        "1,Dune,Herbert,Fiction,false\nnot-a-number,Broken,Nobody,None,false\n2,Emma,Austen,Fiction,true\n",
    )
    .unwrap();

    let mut library = LibraryService::from_config(&config);
    let load = library.load_all();

    let ids: Vec<i32> = library.books().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(load.books.loaded, 2);
    assert_eq!(load.books.skipped.len(), 1);
    assert_eq!(load.books.skipped[0].line, 2);
    assert_eq!(
        load.books.skipped[0].kind,
        ParseErrorKind::InvalidId("not-a-number".to_string())
    );
    assert!(load.members.is_clean());
}

#[test]
fn malformed_member_line_does_not_affect_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(&config.books_path, "1,Dune,Herbert,Fiction,true\n").unwrap();
    fs::write(&config.members_path, "5,Ann\n6,Bo,bo@example.org,1-\n").unwrap();

    let mut library = LibraryService::from_config(&config);
    let load = library.load_all();

    assert!(load.books.is_clean());
    assert_eq!(load.members.skipped.len(), 1);
    assert!(library.member(5).is_none());
    assert_eq!(library.member(6).unwrap().issued_books, vec![1]);
}

#[test]
fn original_files_without_trailing_member_field_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(&config.members_path, "4,Cy,cy@example.org\n").unwrap();

    let library = open(&config);

    assert!(library.member(4).unwrap().issued_books.is_empty());
}

#[test]
fn config_return_policy_reaches_service() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path()).with_return_policy(ReturnPolicy::Strict);

    let library = open(&config);

    assert_eq!(library.return_policy(), ReturnPolicy::Strict);
}

#[test]
fn latin1_byte_keeps_every_book_line() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(
        &config.books_path,
        b"1,Dune,Herbert,Fiction,false\n2,Caf\xE9,Author,Food,true\n3,Emma,Austen,Fiction,false\n",
    )
    .unwrap();

    let mut library = LibraryService::from_config(&config);
    let load = library.load_all();

    assert!(load.books.is_clean());
    let ids: Vec<i32> = library.books().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(library.book(2).unwrap().title, "Caf\u{FFFD}");

    library.add_member(9, "Ann", "ann@example.org").unwrap();
    let saved = fs::read_to_string(&config.books_path).unwrap();
    assert!(saved.contains("1,Dune,Herbert,Fiction,false"));
    assert!(saved.contains("3,Emma,Austen,Fiction,false"));
}

#[test]
fn unreadable_catalog_loads_empty_and_is_never_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::create_dir(&config.books_path).unwrap();

    let mut library = LibraryService::from_config(&config);
    let load = library.load_all();

    assert!(load.books.read_failed);
    assert!(!load.books.is_clean());
    assert_eq!(load.books.loaded, 0);
    assert_eq!(library.books().count(), 0);
    assert!(load.members.is_clean());

    let err = library.add_member(9, "Ann", "ann@example.org").unwrap_err();
    assert!(matches!(
        err,
        LibraryError::Storage(StorageError::UnreadResource(_))
    ));
    assert!(config.books_path.is_dir());
    assert_eq!(
        fs::read_to_string(&config.members_path).unwrap(),
        "9,Ann,ann@example.org,\n"
    );
}
