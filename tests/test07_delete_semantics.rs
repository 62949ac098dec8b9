#![cfg(feature = "sqlite")]

use sql_adapter::adapter::{delete_statement, update_statement};
use sql_adapter::prelude::*;

#[test]
fn delete_without_condition_is_a_full_table_delete() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(delete_statement("t", None), "DELETE FROM t");

    let mut adapter = Adapter::new(ConnectionConfig::new(DatabaseType::Sqlite, ":memory:"));
    adapter.connect()?;
    adapter.query("CREATE TABLE t (a INTEGER)")?;
    for a in 0..4 {
        adapter.insert(&InsertSpec::new("t", &["a"], vec![RowValues::Int(a)]))?;
    }
    assert_eq!(adapter.delete("t", &[], None)?, 4);
    assert!(adapter.fetch_all("SELECT * FROM t", &[])?.is_empty());
    Ok(())
}

#[test]
fn empty_condition_renders_like_no_condition() {
    assert_eq!(delete_statement("t", Some(&Condition::raw(""))), "DELETE FROM t");
    assert_eq!(
        delete_statement("t", Some(&Condition::List(Vec::new()))),
        "DELETE FROM t"
    );
    assert_eq!(
        update_statement("t", &["a = 1"], &Condition::List(Vec::new())),
        "UPDATE t SET a = 1"
    );
}

#[test]
fn list_condition_keeps_connectives_verbatim() {
    let cond = Condition::first("a = ?").with("AND NOT", "b = ?");
    assert_eq!(
        delete_statement("t", Some(&cond)),
        "DELETE FROM t WHERE a = ? AND NOT b = ?"
    );
}
