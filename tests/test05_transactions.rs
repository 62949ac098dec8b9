#![cfg(feature = "sqlite")]

use sql_adapter::prelude::*;

fn adapter() -> Result<Adapter, SqlAdapterError> {
    let mut adapter = Adapter::new(ConnectionConfig::new(DatabaseType::Sqlite, ":memory:"));
    adapter.connect()?;
    adapter.query("CREATE TABLE ledger (id INTEGER PRIMARY KEY, amount INTEGER NOT NULL)")?;
    Ok(adapter)
}

fn count(adapter: &mut Adapter) -> Result<Option<RowValues>, SqlAdapterError> {
    adapter.fetch_col("SELECT COUNT(*) FROM ledger", 0, &[])
}

#[test]
fn commit_keeps_and_rollback_discards() -> Result<(), Box<dyn std::error::Error>> {
    let mut adapter = adapter()?;

    adapter.begin_transaction()?;
    assert!(adapter.in_transaction());
    adapter.insert(&InsertSpec::new("ledger", &["amount"], vec![RowValues::Int(10)]))?;
    adapter.commit()?;
    assert!(!adapter.in_transaction());
    assert_eq!(count(&mut adapter)?, Some(RowValues::Int(1)));

    adapter.begin_transaction()?;
    adapter.insert(&InsertSpec::new("ledger", &["amount"], vec![RowValues::Int(20)]))?;
    adapter.roll_back()?;
    assert_eq!(count(&mut adapter)?, Some(RowValues::Int(1)));
    Ok(())
}

#[test]
fn nested_begin_fails_and_keeps_outer_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let mut adapter = adapter()?;
    adapter.begin_transaction()?;
    adapter.insert(&InsertSpec::new("ledger", &["amount"], vec![RowValues::Int(5)]))?;

    assert!(matches!(
        adapter.begin_transaction(),
        Err(SqlAdapterError::TransactionState(_))
    ));
    assert!(adapter.in_transaction());

    adapter.insert(&InsertSpec::new("ledger", &["amount"], vec![RowValues::Int(6)]))?;
    adapter.commit()?;
    assert_eq!(count(&mut adapter)?, Some(RowValues::Int(2)));
    Ok(())
}

#[test]
fn commit_or_rollback_without_transaction_fail() -> Result<(), Box<dyn std::error::Error>> {
    let mut adapter = adapter()?;
    assert!(matches!(
        adapter.commit(),
        Err(SqlAdapterError::TransactionState(_))
    ));
    assert!(matches!(
        adapter.roll_back(),
        Err(SqlAdapterError::TransactionState(_))
    ));
    Ok(())
}

#[test]
fn reconnect_discards_open_transaction() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("ledger.db");
    let config = ConnectionConfig::new(
        DatabaseType::Sqlite,
        path.to_str().ok_or("non-utf8 temp path")?,
    );
    let mut adapter = Adapter::new(config);
    adapter.connect()?;
    adapter.query("CREATE TABLE ledger (id INTEGER PRIMARY KEY, amount INTEGER NOT NULL)")?;

    adapter.begin_transaction()?;
    adapter.insert(&InsertSpec::new("ledger", &["amount"], vec![RowValues::Int(1)]))?;
    adapter.connect()?;

    assert!(!adapter.in_transaction());
    assert_eq!(count(&mut adapter)?, Some(RowValues::Int(0)));
    Ok(())
}
