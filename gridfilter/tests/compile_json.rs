use gridfilter::filters::{
    FieldType, FilterError, FormatProvider, ParseLimits, RecordSchema, Value, compile_filter_with,
    flatten, parse_filter,
};

fn orders() -> RecordSchema {
    RecordSchema::new()
        .field("OrderId", FieldType::Integer)
        .field("ShipName", FieldType::String)
        .field("ShipCity", FieldType::String)
        .nullable_field("Freight", FieldType::Float)
        .nullable_field("OrderDate", FieldType::DateTime)
        .field("Shipped", FieldType::Boolean)
}

fn compile_json(json: &str) -> Result<(String, Vec<Value>), FilterError> {
    let tree = parse_filter(json, &ParseLimits::default())?;
    let compiled = compile_filter_with(&tree, &orders(), &FormatProvider::invariant())?;
    Ok((compiled.predicate, compiled.parameters))
}

#[test]
fn grid_request_compiles_end_to_end() {
    let json = r#"{
        "logic": "and",
        "filters": [
            {"field": "shipName", "operator": "contains", "value": "Hanari"},
            {"logic": "or", "filters": [
                {"field": "freight", "operator": "gt", "value": 32.38},
                {"field": "orderDate", "operator": "gte", "value": "1996-07-04T00:00:00Z"}
            ]},
            {"field": "shipped", "operator": "eq", "value": true}
        ]
    }"#;

    let (predicate, parameters) = compile_json(json).unwrap();

    assert_eq!(
        predicate,
        "(ShipName.ToLower().Contains(@0) and (Freight > @1 or OrderDate >= @2) and Shipped = @3)"
    );
    assert_eq!(parameters.len(), 4);
    assert_eq!(parameters[0], Value::String("hanari".to_string()));
    assert_eq!(parameters[1], Value::Float(32.38));
    assert!(matches!(parameters[2], Value::DateTime(_)));
    assert_eq!(parameters[3], Value::Boolean(true));
}

#[test]
fn placeholder_indices_match_flattened_order() {
    let json = r#"{"logic": "or", "filters": [
        {"logic": "and", "filters": [
            {"field": "OrderId", "operator": "gte", "value": "10"},
            {"field": "OrderId", "operator": "lte", "value": "20"}
        ]},
        {"logic": "and", "filters": [
            {"field": "ShipCity", "operator": "eq", "value": "Reims", "casesensitive": true},
            {"logic": "or", "filters": [
                {"field": "Freight", "operator": "isnull"},
                {"field": "Freight", "operator": "lt", "value": "5"}
            ]}
        ]}
    ]}"#;

    let tree = parse_filter(json, &ParseLimits::default()).unwrap();
    let leaves = flatten(&tree);
    let compiled = compile_filter_with(&tree, &orders(), &FormatProvider::invariant()).unwrap();

    assert_eq!(
        compiled.predicate,
        "((OrderId >= @0 and OrderId <= @1) or (ShipCity = @2 and (Freight = null or Freight < @4)))"
    );
    assert_eq!(compiled.parameters.len(), leaves.len());
    assert_eq!(
        compiled.parameters,
        vec![
            Value::Integer(10),
            Value::Integer(20),
            Value::String("Reims".to_string()),
            Value::Null,
            Value::Float(5.0),
        ]
    );
}

#[test]
fn three_level_tree() {
    let json = r#"{"logic": "and", "filters": [
        {"field": "ShipName", "operator": "neq", "value": "A"},
        {"logic": "or", "filters": [
            {"field": "ShipName", "operator": "neq", "value": "B"},
            {"field": "ShipName", "operator": "neq", "value": "C"}
        ]}
    ]}"#;

    let (predicate, parameters) = compile_json(json).unwrap();
    assert_eq!(
        predicate,
        "(ShipName != @0 and (ShipName != @1 or ShipName != @2))"
    );
    assert_eq!(
        parameters,
        vec![
            Value::String("A".to_string()),
            Value::String("B".to_string()),
            Value::String("C".to_string()),
        ]
    );
}

#[test]
fn unknown_operator_is_an_error() {
    let err = compile_json(r#"{"field": "ShipName", "operator": "regex", "value": "^A"}"#)
        .unwrap_err();
    assert_eq!(err, FilterError::UnknownOperator("regex".to_string()));
    assert_eq!(err.code(), "UNKNOWN_FILTER_OPERATOR");
}

#[test]
fn unknown_field_is_an_error() {
    let err = compile_json(r#"{"field": "Customer", "operator": "eq", "value": "x"}"#)
        .unwrap_err();
    assert_eq!(err, FilterError::UnresolvedField("Customer".to_string()));
}

#[test]
fn unparseable_date_is_an_error() {
    let err = compile_json(r#"{"field": "OrderDate", "operator": "eq", "value": "31/31/1996"}"#)
        .unwrap_err();
    assert!(matches!(err, FilterError::Conversion { .. }));
}

#[test]
fn per_request_locale() {
    let tree = parse_filter(
        r#"{"field": "Freight", "operator": "gte", "value": "1.250,75"}"#,
        &ParseLimits::default(),
    )
    .unwrap();
    let german = FormatProvider {
        decimal_separator: ',',
        group_separator: Some('.'),
        ..FormatProvider::invariant()
    };

    let compiled = compile_filter_with(&tree, &orders(), &german).unwrap();
    assert_eq!(compiled.parameters, vec![Value::Float(1250.75)]);

    // Under invariant rules the ',' lands after the decimal point
    let err = compile_filter_with(&tree, &orders(), &FormatProvider::invariant()).unwrap_err();
    assert!(matches!(err, FilterError::Conversion { .. }));
}

#[test]
fn misplaced_group_separator_is_a_conversion_error() {
    for raw in [",5", "5,", "1,,2", "1,2,3"] {
        let json = format!(r#"{{"field": "Freight", "operator": "eq", "value": "{}"}}"#, raw);
        let err = compile_json(&json).unwrap_err();
        assert!(
            matches!(err, FilterError::Conversion { .. }),
            "{} should not convert",
            raw
        );
    }
}

#[test]
fn parameters_serialize_for_transport() {
    let (_, parameters) = compile_json(
        r#"{"logic": "and", "filters": [
            {"field": "OrderId", "operator": "eq", "value": "7"},
            {"field": "ShipName", "operator": "isnotempty"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(serde_json::to_string(&parameters).unwrap(), "[7,null]");
}
