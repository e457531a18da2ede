use super::*;

#[test]
fn test_after_edge_orders_units() {
    let mut preds = HashMap::new();
    preds.insert("V1AddTableUser".to_string(), vec![]);
    preds.insert(
        "V1AddAdminRecord".to_string(),
        vec!["V1AddTableUser".to_string()],
    );
    preds.insert("V1AddIndex".to_string(), vec![]);

    let dag = UnitDag::build(&preds).unwrap();
    let order = dag.topological_order().unwrap();

    let table_pos = order.iter().position(|u| u == "V1AddTableUser").unwrap();
    let record_pos = order.iter().position(|u| u == "V1AddAdminRecord").unwrap();
    assert!(table_pos < record_pos);
    assert_eq!(order.len(), 3);
}

#[test]
fn test_circular_dependency() {
    let mut preds = HashMap::new();
    preds.insert("a".to_string(), vec!["b".to_string()]);
    preds.insert("b".to_string(), vec!["a".to_string()]);

    let result = UnitDag::build(&preds);
    assert!(matches!(
        result.unwrap_err(),
        CoreError::CircularDependency { .. }
    ));
}

#[test]
fn test_cycle_error_names_the_path() {
    let mut preds = HashMap::new();
    preds.insert("a".to_string(), vec!["b".to_string()]);
    preds.insert("b".to_string(), vec!["a".to_string()]);

    let err = UnitDag::build(&preds).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("a") && message.contains("b"));
    assert!(message.contains("->"));
}

#[test]
fn test_predecessor_outside_set_dropped() {
    // `after` pointing at a unit of another version is not an edge.
    let mut preds = HashMap::new();
    preds.insert(
        "V2AddColumn".to_string(),
        vec!["V1AddTableUser".to_string()],
    );

    let dag = UnitDag::build(&preds).unwrap();
    assert_eq!(dag.len(), 1);
    assert!(dag.predecessors("V2AddColumn").is_empty());
    assert!(!dag.contains("V1AddTableUser"));
}

#[test]
fn test_self_reference_dropped() {
    let mut preds = HashMap::new();
    preds.insert("a".to_string(), vec!["a".to_string()]);

    let dag = UnitDag::build(&preds).expect("self reference is dropped, not a cycle");
    assert!(dag.predecessors("a").is_empty());
}

#[test]
fn test_chain_of_three() {
    let mut preds = HashMap::new();
    preds.insert("first".to_string(), vec![]);
    preds.insert("second".to_string(), vec!["first".to_string()]);
    preds.insert("third".to_string(), vec!["second".to_string()]);

    let dag = UnitDag::build(&preds).unwrap();
    let order = dag.topological_order().unwrap();
    assert_eq!(order, vec!["first", "second", "third"]);
}

#[test]
fn test_empty_set() {
    let preds = HashMap::new();
    let dag = UnitDag::build(&preds).unwrap();
    assert!(dag.is_empty());
    assert!(dag.topological_order().unwrap().is_empty());
}
