//! Small parameterized SELECT builder for the card and pack tables.
//!
//! Values always travel as `?` bind parameters. Pair the output with
//! [`duckdb::params_from_iter`] when executing.
//!
//! ```rust
//! use chorepack::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("cards")
//!     .where_eq("rarity", "RARE")
//!     .order_by(&["created_at DESC"])
//!     .limit(5)
//!     .build();
//! assert_eq!(params, vec!["RARE"]);
//! assert!(sql.ends_with("LIMIT 5"));
//! ```

enum Filter {
    Eq { column: String, value: String },
    In { column: String, values: Vec<String> },
}

impl Filter {
    /// Append this filter's SQL fragment to `sql` and its values to `params`.
    fn render(&self, sql: &mut String, params: &mut Vec<String>) {
        match self {
            Filter::Eq { column, value } => {
                sql.push_str(column);
                sql.push_str(" = ?");
                params.push(value.clone());
            }
            // An empty IN list is a syntax error in DuckDB; match nothing instead.
            Filter::In { values, .. } if values.is_empty() => sql.push_str("FALSE"),
            Filter::In { column, values } => {
                let marks = vec!["?"; values.len()].join(", ");
                sql.push_str(&format!("{} IN ({})", column, marks));
                params.extend(values.iter().cloned());
            }
        }
    }
}

/// Builds parameterized SELECT statements. Methods return `&mut Self` for chaining.
pub struct SqlBuilder {
    table: String,
    columns: Option<Vec<String>>,
    filters: Vec<Filter>,
    ordering: Vec<String>,
    limit: Option<usize>,
}

impl SqlBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: None,
            filters: Vec::new(),
            ordering: Vec::new(),
            limit: None,
        }
    }

    /// Select only these columns instead of `*`.
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.columns = Some(cols.iter().map(|c| c.to_string()).collect());
        self
    }

    /// `column = ?`
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.filters.push(Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// `column IN (?, ...)`. An empty value list matches nothing.
    pub fn where_in<S: AsRef<str>>(&mut self, column: &str, values: &[S]) -> &mut Self {
        self.filters.push(Filter::In {
            column: column.to_string(),
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        });
        self
    }

    /// Append ORDER BY terms such as `"created_at DESC"`.
    pub fn order_by(&mut self, terms: &[&str]) -> &mut Self {
        self.ordering.extend(terms.iter().map(|t| t.to_string()));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Render the statement and its bind parameters, in placeholder order.
    pub fn build(&self) -> (String, Vec<String>) {
        let columns = match &self.columns {
            Some(cols) => cols.join(", "),
            None => "*".to_string(),
        };
        let mut sql = format!("SELECT {}\nFROM {}", columns, self.table);
        let mut params = Vec::new();

        for (i, filter) in self.filters.iter().enumerate() {
            sql.push_str(if i == 0 { "\nWHERE " } else { " AND " });
            filter.render(&mut sql, &mut params);
        }
        if !self.ordering.is_empty() {
            sql.push_str("\nORDER BY ");
            sql.push_str(&self.ordering.join(", "));
        }
        if let Some(n) = self.limit {
            sql.push_str(&format!("\nLIMIT {}", n));
        }

        (sql, params)
    }
}
