use pretty_assertions::assert_eq;
use tests::{assert_err, assert_ok, fixtures};
use tydb::{Binding, Query, Record, Value};

#[test]
fn async_round_trip() {
    tests::run(|| async {
        let f = fixtures::inner_outer();
        let mut session = tests::async_session(&f.schema).await;

        let key = assert_ok!(session.create(f.inner, Record::new().set("value", true)).await);
        assert_eq!(key, Some(1));
        assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)).await);

        let mut result = assert_ok!(session.select(Query::table(f.outer).auto_join()).await);
        let outer = assert_ok!(result.next().await.unwrap());
        assert!(result.next().await.is_none());
        assert_eq!(
            outer.to_string(),
            "Outer(key=1, inner_key=1, inner=Inner(key=1, value=true))"
        );

        let replay = assert_ok!(result.collect().await);
        assert_eq!(replay, [outer]);
    });
}

#[test]
fn async_load_and_remove() {
    tests::run(|| async {
        let f = fixtures::inner_outer();
        let mut session = tests::async_session(&f.schema).await;

        assert_ok!(session.create(f.inner, Record::new()).await);
        assert_ok!(session.create(f.outer, Record::new().set("inner_key", 1)).await);

        let mut outer = assert_ok!(session.get(f.outer).await);
        assert_eq!(outer.reference("inner").unwrap(), &Binding::Unfetched);

        let inner = assert_ok!(session.load(&mut outer, "inner").await).unwrap();
        assert_eq!(inner.get("value").unwrap(), &Value::Bool(false));
        assert!(outer.reference("inner").unwrap().is_fetched());

        assert_ok!(session.remove(&[outer]).await);
        assert!(assert_ok!(session.first(f.outer).await).is_none());

        let err = assert_err!(session.get(f.outer).await);
        assert!(err.is_record_not_found());
    });
}

#[test]
fn async_bulk_create_and_raw() {
    tests::run(|| async {
        let f = fixtures::notes();
        let mut session = tests::async_session(&f.schema).await;

        assert_ok!(
            session
                .bulk_create(f.m, &["text"], vec![vec![Value::Null], vec!["Text".into()]])
                .await
        );

        let mut result = assert_ok!(session.raw(r#"SELECT COUNT(*) FROM "m""#, &[]).await);
        assert_eq!(assert_ok!(result.collect().await), [vec![Value::I64(2)]]);
    });
}
