use anyhow::Result;
use record_pipelines::app::DirectoryJoinUseCase;
use record_pipelines::pipeline::directory::{
    build_phone_index, join_orders, normalized_name, partition_clients, ClientRejection,
    CollisionPolicy, OrderRecord,
};
use record_pipelines::PipelineError;
use serde_json::{json, Value};

fn client_fixture() -> Vec<Value> {
    vec![
        json!({
            "firstName": "ivan",
            "lastName": "ivanov",
            "phoneNumber": 819242412,
            "email": "ivanIvanov@gmail.com",
        }),
        json!({
            "firstName": "ivan",
            "secondName": "ivanov",
            "phoneNumber": 123123123,
            "email": "ivanIvanov@gmail.com",
        }),
        json!({
            "firstName": "vitaLiY",
            "secondName": "Braun",
            "phoneNumber": "+7 (123) 123-123-12",
            "email": "vit@braun.com",
        }),
    ]
}

fn order_fixture() -> Vec<Value> {
    vec![
        json!({ "name": "Ivan Ivanov", "order": 3452 }),
        json!({ "name": "Vitaliy Braun", "order": 421 }),
    ]
}

#[test]
fn test_fixture_join_produces_enriched_orders() -> Result<()> {
    let report = DirectoryJoinUseCase::new().run(&client_fixture(), &order_fixture())?;

    assert_eq!(
        serde_json::to_value(&report.resolved)?,
        json!([
            { "name": "Ivan Ivanov", "phoneNumber": "123123123", "order": "3452" },
            { "name": "Vitaliy Braun", "phoneNumber": "+7 (123) 123-123-12", "order": "421" },
        ])
    );
    assert!(report.unresolved.is_empty());
    assert!(report.rejected_clients.is_empty());
    Ok(())
}

#[test]
fn test_stages_compose_like_the_use_case() -> Result<()> {
    let partition = partition_clients(&client_fixture());
    let names: Vec<String> = partition
        .accepted
        .iter()
        .map(|record| normalized_name(record).map(|n| n.into_string()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names, vec!["Ivan", "Ivan Ivanov", "Vitaliy Braun"]);

    let index = build_phone_index(&partition.accepted)?;
    let orders: Vec<OrderRecord> =
        order_fixture().iter().filter_map(OrderRecord::from_value).collect();
    let outcome = join_orders(&orders, &index);

    let report = DirectoryJoinUseCase::new().run(&client_fixture(), &order_fixture())?;
    assert_eq!(outcome.resolved, report.resolved);
    Ok(())
}

#[test]
fn test_malformed_clients_and_unknown_orders_are_reported() -> Result<()> {
    let mut clients = client_fixture();
    clients.push(json!(null));
    clients.push(json!({ "secondName": "  ", "phoneNumber": "555" }));
    clients.push(json!({ "firstName": "Olga", "phoneNumber": "89991234567" }));
    clients.push(json!({ "firstName": "Olga" }));

    let mut orders = order_fixture();
    orders.push(json!({ "name": "Olga", "order": 7 }));

    let report = DirectoryJoinUseCase::new().run(&clients, &orders)?;

    assert_eq!(report.resolved.len(), 2);
    assert_eq!(report.unresolved.len(), 1);
    assert_eq!(report.unresolved[0], json!({ "name": "Olga", "order": 7 }));

    let reasons: Vec<ClientRejection> = report.rejected_clients.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            ClientRejection::NotAnObject,
            ClientRejection::MissingName,
            ClientRejection::InvalidPhone,
            ClientRejection::MissingPhone,
        ]
    );
    assert_eq!(report.rejected_clients[2].record, clients[5]);
    Ok(())
}

#[test]
fn test_one_malformed_order_does_not_fail_the_batch() -> Result<()> {
    let orders = vec![
        json!({ "name": "Ivan Ivanov", "order": 1 }),
        json!({ "name": 42, "order": 2 }),
        json!("Vitaliy Braun"),
        json!({ "name": "Vitaliy Braun" }),
        json!({ "name": "Vitaliy Braun", "orderId": 3.0 }),
    ];

    let report = DirectoryJoinUseCase::new().run(&client_fixture(), &orders)?;

    assert_eq!(
        serde_json::to_value(&report.resolved)?,
        json!([
            { "name": "Ivan Ivanov", "phoneNumber": "123123123", "order": "1" },
            { "name": "Vitaliy Braun", "phoneNumber": "+7 (123) 123-123-12", "order": "3" },
        ])
    );
    assert_eq!(report.unresolved, orders[1..4].to_vec());
    Ok(())
}

#[test]
fn test_explicit_null_phone_is_an_invalid_phone() -> Result<()> {
    let clients = vec![json!({ "firstName": "Olga", "phoneNumber": null })];

    let report = DirectoryJoinUseCase::new().run(&clients, &order_fixture())?;

    assert_eq!(report.rejected_clients[0].reason, ClientRejection::InvalidPhone);
    assert_eq!(report.rejected_clients[0].record, clients[0]);
    Ok(())
}

#[test]
fn test_last_valid_duplicate_wins_by_default() -> Result<()> {
    let clients = vec![
        json!({ "firstName": "ivan", "secondName": "ivanov", "phoneNumber": 819242412 }),
        json!({ "firstName": "IVAN", "secondName": "Ivanov", "phoneNumber": "81924241234" }),
        json!({ "firstName": "Ivan", "secondName": "ivanov ", "phoneNumber": 123123123 }),
    ];
    let orders = vec![json!({ "name": "Ivan Ivanov", "order": 3452 })];

    let report = DirectoryJoinUseCase::new().run(&clients, &orders)?;

    assert_eq!(report.resolved[0].phone_number, "123123123");
    assert_eq!(report.rejected_clients.len(), 1);
    Ok(())
}

#[test]
fn test_strict_policy_surfaces_duplicate_key() {
    let clients = vec![
        json!({ "firstName": "ivan", "secondName": "ivanov", "phoneNumber": 819242412 }),
        json!({ "firstName": "Ivan", "secondName": "Ivanov", "phoneNumber": 123123123 }),
    ];

    let err = DirectoryJoinUseCase::with_policy(CollisionPolicy::RejectConflicts)
        .run(&clients, &order_fixture())
        .unwrap_err();

    assert!(matches!(err, PipelineError::DuplicateKey { ref key, .. } if key == "Ivan Ivanov"));
}

#[test]
fn test_join_is_idempotent() -> Result<()> {
    let use_case = DirectoryJoinUseCase::new();
    let first = serde_json::to_string(&use_case.run(&client_fixture(), &order_fixture())?)?;
    let second = serde_json::to_string(&use_case.run(&client_fixture(), &order_fixture())?)?;
    assert_eq!(first, second);
    Ok(())
}
