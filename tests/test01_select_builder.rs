use sql_adapter::prelude::*;

#[test]
fn single_table_columns_are_qualified() {
    let cols = ["id", "name", "email"];
    let sql = Select::new().from_columns("users", &cols).get_request();
    assert_eq!(sql, "SELECT users.id, users.name, users.email FROM users");
    assert_eq!(sql.matches("users.").count(), cols.len());
}

#[test]
fn aliased_tables_render_in_order_with_verbatim_columns() {
    let sql = Select::new()
        .from_columns([("a", "T1"), ("b", "T2")], &["a.x", "b.y"])
        .get_request();
    assert_eq!(sql, "SELECT a.x, b.y FROM T1 AS a,T2 AS b");
}

#[test]
fn where_raw_and_list_forms() {
    let raw = Select::new().from("t").where_("x=1").get_request();
    assert!(raw.ends_with("WHERE x=1"), "{raw}");

    let list = Select::new()
        .from("t")
        .where_(vec![(None, "x=1"), (Some("AND"), "y=2")])
        .get_request();
    assert!(list.ends_with("WHERE x=1 AND y=2"), "{list}");
}

#[test]
fn limit_zero_none_and_five() {
    let base = "SELECT t.* FROM t";
    assert_eq!(Select::new().from("t").limit(Some(0)).get_request(), base);
    assert_eq!(Select::new().from("t").limit(None).get_request(), base);
    assert_eq!(
        Select::new().from("t").limit(Some(5)).get_request(),
        format!("{base} LIMIT 5")
    );
}

#[test]
fn order_desc_and_offset() {
    assert!(
        Select::new()
            .from("t")
            .order("name", true, None)
            .get_request()
            .ends_with("ORDER BY name DESC")
    );
    assert!(
        Select::new()
            .from("t")
            .order("name", false, Some(10))
            .get_request()
            .ends_with("ORDER BY name OFFSET 10")
    );
}

#[test]
fn clauses_render_in_fixed_order_regardless_of_call_order() {
    let sql = Select::new()
        .limit(Some(3))
        .order("p.total", true, None)
        .having("SUM(p.total) > 10", None)
        .group("u.id")
        .where_("u.active = 1")
        .from_columns([("u", "users")], &["u.id"])
        .join(
            JoinSpec::new("purchases", "p.user_id = u.id")
                .alias("p")
                .join_type(JoinType::Left),
            &["total"],
        )
        .get_request();
    assert_eq!(
        sql,
        "SELECT u.id, p.total FROM users AS u LEFT JOIN purchases AS p ON p.user_id = u.id \
         WHERE u.active = 1 GROUP BY u.id HAVING SUM(p.total) > 10 ORDER BY p.total DESC LIMIT 3"
    );
}

#[test]
fn join_alias_falls_back_to_from_alias_then_table_name() {
    let from_map = Select::new()
        .from_columns([("o", "orders"), ("c", "customers")], &["o.id"])
        .join(JoinSpec::new("customers", "c.id = o.customer_id"), &[])
        .get_request();
    assert!(from_map.contains("INNER JOIN customers AS c ON c.id = o.customer_id"));
    assert!(from_map.starts_with("SELECT o.id, c.* FROM"));

    let bare = Select::new()
        .from("orders")
        .join(JoinSpec::new("items", "items.order_id = orders.id"), &["sku"])
        .get_request();
    assert!(bare.starts_with("SELECT orders.*, items.sku FROM orders"));
    assert!(bare.ends_with("INNER JOIN items AS items ON items.order_id = orders.id"));
}

#[test]
fn bound_where_and_having_params_are_ordered() {
    let stmt = Select::new()
        .from("t")
        .where_bound("a = ?", vec![RowValues::Int(1)])
        .group("b")
        .having_bound("COUNT(*) > ?", vec![RowValues::Int(2)])
        .build();
    assert_eq!(
        stmt.sql,
        "SELECT t.* FROM t WHERE a = ? GROUP BY b HAVING COUNT(*) > ?"
    );
    assert_eq!(stmt.params, vec![RowValues::Int(1), RowValues::Int(2)]);
}

#[test]
fn get_request_is_idempotent() {
    let select = Select::new()
        .from("t")
        .where_(Condition::first("a = 1").or("b = 2"));
    assert_eq!(select.get_request(), select.get_request());
}
