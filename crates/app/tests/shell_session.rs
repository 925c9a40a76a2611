//! End-to-end runs of the JSON-lines shell over in-memory buffers.

use serde_json::Value;

use coldstore_app::{AppConfig, WarehouseSession, shell};

fn run_lines(session: &mut WarehouseSession, input: &str) -> Vec<Value> {
    let mut out = Vec::new();
    shell::run(session, input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn register(session: &mut WarehouseSession) -> String {
    let responses = run_lines(
        session,
        r#"{"op":"register_farmer","name":"Ramesh Kumar","father_name":"Shyam Lal","phone":"9876543210","village":"Rampur"}"#,
    );
    assert_eq!(responses[0]["ok"], true, "{:?}", responses[0]);
    responses[0]["data"]["id"].as_str().unwrap().to_string()
}

#[test]
fn intake_then_withdrawal_round() {
    let mut session = WarehouseSession::new(&AppConfig::default());
    let farmer_id = register(&mut session);

    let input = format!(
        concat!(
            r#"{{"op":"record_stock_entry","farmer_id":"{id}","date":"2024-03-05","categories":{{"mota":{{"bag_count":10,"sample_weights":[40,42,0,0,0]}}}}}}"#,
            "\n",
            r#"{{"op":"record_stock_entry","farmer_id":"{id}","date":"2024-03-05","remark":"damp sacks","categories":{{"gulla":{{"bag_count":4,"sample_weights":[30]}}}}}}"#,
            "\n\n",
            r#"{{"op":"record_withdrawal","farmer_id":"{id}","lot_number":"1/10","bag_counts":{{"mota":3}}}}"#,
            "\n",
            r#"{{"op":"lookup_lot","lot_number":"1/10"}}"#,
            "\n",
            r#"{{"op":"list_withdrawals"}}"#,
            "\n",
        ),
        id = farmer_id
    );
    let responses = run_lines(&mut session, &input);
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["data"]["lot_number"], "1/10");
    assert_eq!(responses[0]["data"]["total_weight"], 410.0);
    assert_eq!(responses[0]["data"]["categories"]["mota"]["average_weight"], 41.0);
    assert_eq!(responses[1]["data"]["lot_number"], "2/4*");
    assert_eq!(responses[1]["data"]["remark"], "damp sacks");

    assert_eq!(responses[2]["ok"], true);
    assert_eq!(responses[2]["data"]["total_bags"], 3);

    assert_eq!(responses[3]["data"]["entry"]["lot_number"], "1/10");
    assert_eq!(responses[3]["data"]["withdrawals"].as_array().unwrap().len(), 1);

    assert_eq!(responses[4]["data"].as_array().unwrap().len(), 1);
}

#[test]
fn bad_lines_do_not_stop_the_loop() {
    let mut session = WarehouseSession::new(&AppConfig::default());
    let farmer_id = register(&mut session);

    let input = format!(
        "garbage\n{}\n{}\n{}\n",
        r#"{"op":"record_stock_entry","farmer_id":"","categories":{}}"#,
        format!(r#"{{"op":"record_withdrawal","farmer_id":"{farmer_id}","lot_number":"1/1","bag_counts":{{}}}}"#),
        r#"{"op":"list_entries"}"#,
    );
    let responses = run_lines(&mut session, &input);

    assert_eq!(responses[0]["error"], "invalid_request");
    assert_eq!(responses[1]["error"], "validation_error");
    assert_eq!(responses[1]["message"], "validation failed: select a farmer");
    assert_eq!(responses[2]["error"], "validation_error");
    assert_eq!(responses[3]["ok"], true);
    assert!(responses[3]["data"].as_array().unwrap().is_empty());
    assert_eq!(session.ledger().next_lot_sequence(), 1);
}

#[test]
fn withdrawals_list_newest_first() {
    let mut session = WarehouseSession::new(&AppConfig::default());
    let farmer_id = register(&mut session);

    let input = format!(
        "{}\n{}\n{}\n",
        format!(r#"{{"op":"record_withdrawal","farmer_id":"{farmer_id}","lot_number":"A","bag_counts":{{"kirri":1}}}}"#),
        format!(r#"{{"op":"record_withdrawal","farmer_id":"{farmer_id}","lot_number":"B","bag_counts":{{"kirri":2}}}}"#),
        r#"{"op":"list_withdrawals"}"#,
    );
    let responses = run_lines(&mut session, &input);
    let list = responses[2]["data"].as_array().unwrap();
    assert_eq!(list[0]["lot_number"], "B");
    assert_eq!(list[1]["lot_number"], "A");
}
