use mairis_prime::db::Database;
use speculate2::speculate;

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "documents" {
        describe "get_document" {
            it "returns None for a missing key" {
                let result = db.get_document("absent").expect("Query failed");
                assert!(result.is_none());
            }
        }

        describe "put_document" {
            it "stores a document" {
                db.put_document("k", r#"{"a":1}"#).expect("Failed to put");
                assert_eq!(db.get_document("k").expect("Query failed").as_deref(), Some(r#"{"a":1}"#));
            }

            it "overwrites an existing document" {
                db.put_document("k", "first").expect("Failed to put");
                db.put_document("k", "second").expect("Failed to put");
                assert_eq!(db.get_document("k").expect("Query failed").as_deref(), Some("second"));
            }

            it "keeps keys independent" {
                db.put_document("a", "1").expect("Failed to put");
                db.put_document("b", "2").expect("Failed to put");
                assert_eq!(db.get_document("a").expect("Query failed").as_deref(), Some("1"));
            }
        }

        describe "delete_document" {
            it "reports whether a document was removed" {
                db.put_document("k", "v").expect("Failed to put");
                assert!(db.delete_document("k").expect("Delete failed"));
                assert!(!db.delete_document("k").expect("Delete failed"));
                assert!(db.get_document("k").expect("Query failed").is_none());
            }
        }

        describe "replace_document" {
            it "leaves exactly the new body" {
                db.put_document("k", "old").expect("Failed to put");
                db.replace_document("k", "new").expect("Failed to replace");
                assert_eq!(db.get_document("k").expect("Query failed").as_deref(), Some("new"));
            }

            it "creates the document when absent" {
                db.replace_document("fresh", "body").expect("Failed to replace");
                assert_eq!(db.get_document("fresh").expect("Query failed").as_deref(), Some("body"));
            }
        }
    }

    describe "migrate" {
        it "can be run again safely" {
            db.put_document("k", "v").expect("Failed to put");
            db.migrate().expect("Second migration failed");
            assert_eq!(db.get_document("k").expect("Query failed").as_deref(), Some("v"));
        }
    }
}
