use library_core::{Book, Member};

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let mut book = Book::new(7, "Emma", "Austen", "Fiction");
    book.mark_issued();

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["title"], "Emma");
    assert_eq!(json["is_issued"], true);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn member_serialization_keeps_issue_order() {
    let mut member = Member::new(3, "Ann", "ann@example.org");
    member.attach_book(9);
    member.attach_book(2);

    let json = serde_json::to_value(&member).unwrap();
    assert_eq!(json["issued_books"], serde_json::json!([9, 2]));
}

#[test]
fn member_holds_reflects_attach_and_detach() {
    let mut member = Member::new(3, "Ann", "ann@example.org");
    member.attach_book(9);
    assert!(member.holds(9));
    member.detach_book(9);
    assert!(!member.holds(9));
}
