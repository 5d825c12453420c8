//! Thin CRUD convenience layer over [`Client::send`].
//!
//! Each method builds the resource path and delegates to the engine; all
//! retry, deadline, and classification behavior lives in
//! [`Client::send`](crate::Client::send).

use crate::{Client, Request, Response, Result};
use http::Method;
use serde::Serialize;

/// Names of the resources the Lookout API exposes.
pub mod resource {
    /// Billing accounts and their usage limits.
    pub const ACCOUNT: &str = "account";
    /// Metric collection brokers.
    pub const BROKER: &str = "broker";
    /// Individual checks on a single broker.
    pub const CHECK: &str = "check";
    /// Check bundles: one configuration fanned out across brokers.
    pub const CHECK_BUNDLE: &str = "checkbundle";
    /// Alerting contact groups.
    pub const CONTACT_GROUP: &str = "contact_group";
    /// Metric visualization graphs.
    pub const GRAPH: &str = "graph";
    /// Alerting rules for a single metric.
    pub const RULE_SET: &str = "rule_set";
    /// Groups of rule sets combined with boolean logic.
    pub const RULE_SET_GROUP: &str = "rule_set_group";
    /// Reusable check/graph templates.
    pub const TEMPLATE: &str = "template";
    /// User profiles within an account.
    pub const USER: &str = "user";
}

impl Client {
    /// Lists all instances of a resource.
    pub async fn list(&self, resource: &str) -> Result<Response> {
        let request = Request::new(Method::GET, format!("/{resource}"));
        self.send::<()>(request, None).await
    }

    /// Fetches a single resource instance by id.
    pub async fn get(&self, resource: &str, id: &str) -> Result<Response> {
        let request = Request::new(Method::GET, format!("/{resource}/{id}"));
        self.send::<()>(request, None).await
    }

    /// Creates a new resource instance.
    pub async fn add<B>(
        &self,
        resource: &str,
        body: &B,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Response>
    where
        B: Serialize,
    {
        let request = Request::new(Method::POST, format!("/{resource}")).with_params(params);
        self.send(request, Some(body)).await
    }

    /// Updates an existing resource instance.
    pub async fn edit<B>(&self, resource: &str, id: &str, body: &B) -> Result<Response>
    where
        B: Serialize,
    {
        let request = Request::new(Method::PUT, format!("/{resource}/{id}"));
        self.send(request, Some(body)).await
    }

    /// Deletes a resource instance.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<Response> {
        let request = Request::new(Method::DELETE, format!("/{resource}/{id}"));
        self.send::<()>(request, None).await
    }
}
