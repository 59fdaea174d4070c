pub const SIMPLE_QUERY: &str =
    include_str!("simple_query.graphql");
pub const COMPLEX_QUERY: &str =
    include_str!("complex_query.graphql");

/// Generates `depth` levels of `level_N { id ... }` nesting.
pub fn deeply_nested_query(depth: usize) -> String {
    let mut query = String::new();
    for level in 0..depth {
        query.push_str(&format!("level_{level}(first: {level}) {{ id "));
    }
    query.push_str("leaf");
    for _ in 0..depth {
        query.push_str(" }");
    }
    query
}

/// Generates a single selection with `count` sibling sub-selections.
pub fn wide_query(count: usize) -> String {
    let mut query = String::from("project(id: 1) {\n");
    for idx in 0..count {
        query.push_str(&format!(
            "  field_{idx}(first: 10, filter: {{ state: OPENED, labels: [\"a\", \"b\"] }}) {{ id name }}\n",
        ));
    }
    query.push('}');
    query
}
