//! IAM-style policy documents returned to the gateway.

use common::protocol::{AuthorizerResponse, Effect, PolicyDocument, Statement};

/// Policy language version understood by the gateway.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The single action every statement grants or denies.
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Build a one-statement policy for `principal` over `resource`.
pub fn generate_policy(principal: &str, effect: Effect, resource: &str) -> AuthorizerResponse {
    AuthorizerResponse {
        principal_id: principal.to_owned(),
        policy_document: PolicyDocument {
            version: POLICY_VERSION.into(),
            statement: vec![Statement {
                action: INVOKE_ACTION.into(),
                effect,
                resource: resource.to_owned(),
            }],
        },
    }
}
