//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use gateway_core::kernel::ServerDeps;
use gateway_core::server::graphql::{create_schema, GraphQLContext, Schema};
use juniper::Variables;
use serde_json::Value;
use std::sync::Arc;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
    /// `extensions.code` of each error, in the same order as `errors`
    pub codes: Vec<Option<String>>,
}

impl GraphQLResult {
    /// Returns true if the execution had no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given JSON path.
    ///
    /// # Example
    /// ```ignore
    /// let name = result.get("UserSignup.name").as_str();
    /// ```
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }

    /// Code of the first error, if any
    pub fn first_code(&self) -> Option<&str> {
        self.codes.first().and_then(|code| code.as_deref())
    }
}

impl GraphQLClient {
    /// Creates a client whose requests carry `session_token` as the session cookie.
    pub fn new(deps: Arc<ServerDeps>, session_token: Option<String>) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(deps, session_token),
        }
    }

    /// Creates a new GraphQL client with a custom context.
    pub fn with_context(context: GraphQLContext) -> Self {
        Self {
            schema: create_schema(),
            context,
        }
    }

    pub fn context(&self) -> &GraphQLContext {
        &self.context
    }

    /// Execute a GraphQL query/mutation.
    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    /// Execute a GraphQL query/mutation with variables.
    ///
    /// Request-level failures (parse or validation errors) come back as a
    /// result without data.
    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            match juniper::execute(query, None, &self.schema, &variables, &self.context).await {
                Ok(executed) => executed,
                Err(err) => {
                    return GraphQLResult {
                        data: None,
                        errors: vec![format!("{:?}", err)],
                        codes: vec![None],
                    }
                }
            };

        // Convert juniper::Value to serde_json::Value
        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let error_messages: Vec<String> = errors
            .iter()
            .map(|e| e.error().message().to_string())
            .collect();

        let codes = errors
            .iter()
            .map(|e| {
                e.error()
                    .extensions()
                    .as_object_value()
                    .and_then(|ext| ext.get_field_value("code"))
                    .and_then(|code| code.as_string_value())
                    .map(String::from)
            })
            .collect();

        GraphQLResult {
            data,
            errors: error_messages,
            codes,
        }
    }

    /// Execute a query and expect success, returning the data.
    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }

    /// Execute a query with variables and expect success.
    pub async fn query_with_vars(&self, query: &str, variables: Variables) -> Value {
        self.execute_with_vars(query, variables).await.unwrap()
    }
}
