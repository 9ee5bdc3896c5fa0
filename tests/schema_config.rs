use html_schema::{ExtractionError, Field, Schema, SchemaConfig, SchemaError, Value};

const PAGE_JSON: &str = r#"
{
  "name": "Page",
  "fields": [
    { "name": "title", "selector": "title", "required": true },
    { "name": "stylesheets", "kind": "attr", "selector": "[rel=stylesheet]",
      "attribute": "href", "as_list": true },
    { "name": "description", "kind": "first_of", "required": true, "alternatives": [
        { "kind": "content", "selector": "[property='og:description']" },
        { "kind": "content", "selector": "[name=description]" }
    ] },
    { "name": "reviews", "kind": "nested", "selector": ".review", "as_list": true,
      "schema": {
        "name": "Review",
        "fields": [
          { "name": "author", "selector": ".review__author", "required": true },
          { "name": "review", "selector": ".review__content", "required": true }
        ]
      } }
  ]
}
"#;

const PAGE_HTML: &str = r#"
<html>
  <head>
    <title>My page title</title>
    <meta name="description" content="My description">
    <link rel="stylesheet" href="/a.css">
  </head>
  <body>
    <div class="review">
      <div class="review__author">Author Name</div>
      <div class="review__content">This review is awesome</div>
    </div>
    <div class="review">
      <div class="review__author">Another reviewer</div>
      <div class="review__content">This review is not as awesome as the last</div>
    </div>
  </body>
</html>
"#;

#[test]
fn test_json_schema_matches_builder_schema() {
    let review = Schema::builder("Review")
        .field("author", Field::text(".review__author").required())
        .field("review", Field::text(".review__content").required())
        .build()
        .unwrap();

    let built = Schema::builder("Page")
        .field("title", Field::text("title").required())
        .field(
            "stylesheets",
            Field::attr("[rel=stylesheet]", "href").as_list(),
        )
        .field(
            "description",
            Field::first_of([
                Field::content("[property='og:description']"),
                Field::content("[name=description]"),
            ])
            .required(),
        )
        .field("reviews", Field::nested(".review", review).as_list())
        .build()
        .unwrap();

    let loaded = Schema::from_json(PAGE_JSON).expect("Failed to load schema");

    let from_json = loaded.parse(PAGE_HTML).unwrap();
    let from_builder = built.parse(PAGE_HTML).unwrap();

    assert_eq!(from_json, from_builder);
    assert_eq!(from_json.to_string(), from_builder.to_string());
}

#[test]
fn test_json_schema_extracts_reviews() {
    let record = Schema::from_json(PAGE_JSON).unwrap().parse(PAGE_HTML).unwrap();

    assert_eq!(record["description"].as_str(), Some("My description"));

    let json = record.to_json();
    assert_eq!(json["reviews"][0]["author"], "Author Name");
    assert_eq!(
        json["reviews"][1]["review"],
        "This review is not as awesome as the last"
    );
    assert_eq!(json["stylesheets"], serde_json::json!(["/a.css"]));
}

#[test]
fn test_config_round_trips_through_serde() {
    let config: SchemaConfig = serde_json::from_str(PAGE_JSON).unwrap();
    let text = serde_json::to_string(&config).unwrap();
    let schema = Schema::from_json(&text).unwrap();
    assert_eq!(schema.name(), "Page");
    assert_eq!(schema.fields().count(), 4);
}

#[test]
fn test_nested_config_errors_surface() {
    let json = r#"
    {
      "name": "Outer",
      "fields": [
        { "name": "inner", "kind": "nested", "selector": "div",
          "schema": { "name": "Inner", "fields": [
            { "name": "a", "selector": "p" },
            { "name": "a", "selector": "span" }
          ] } }
      ]
    }
    "#;

    assert_eq!(
        Schema::from_json(json).unwrap_err(),
        SchemaError::DuplicateField {
            schema: "Inner".to_string(),
            field: "a".to_string()
        }
    );
}

#[test]
fn test_nested_without_schema_rejected() {
    let json = r#"{ "name": "Outer", "fields": [
        { "name": "inner", "kind": "nested", "selector": "div" } ] }"#;

    assert!(matches!(
        Schema::from_json(json),
        Err(SchemaError::MissingOption { option: "schema", .. })
    ));
}

#[test]
fn test_first_of_without_alternatives_rejected() {
    let json = r#"{ "name": "Outer", "fields": [
        { "name": "pick", "kind": "first_of" } ] }"#;

    assert_eq!(
        Schema::from_json(json).unwrap_err(),
        SchemaError::NoAlternatives {
            field: "pick".to_string()
        }
    );
}

#[test]
fn test_list_flag_on_fallback_rejected() {
    let json = r#"{ "name": "Outer", "fields": [
        { "name": "pick", "kind": "first_of", "as_list": true, "alternatives": [
            { "selector": "li", "as_list": true }
        ] } ] }"#;

    assert_eq!(
        Schema::from_json(json).unwrap_err(),
        SchemaError::ListFallback {
            field: "pick".to_string()
        }
    );
}

#[test]
fn test_required_from_config_is_enforced() {
    let schema = Schema::from_json(PAGE_JSON).unwrap();
    let err = schema
        .parse(r#"<title>t</title><div class="review"><div class="review__author">x</div></div>"#)
        .unwrap_err();

    // description fallback fails before reviews are visited
    match err {
        ExtractionError::MissingField { path, selector, .. } => {
            assert_eq!(path, "description");
            assert_eq!(
                selector,
                "[property='og:description'] | [name=description]"
            );
        }
        other => panic!("Expected MissingField, got {other:?}"),
    }

    let record = schema
        .parse(r#"<title>t</title><meta name="description" content="d">"#)
        .unwrap();
    assert_eq!(record["reviews"], Value::List(vec![]));
}
