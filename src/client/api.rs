//! Board API Client
//!
//! `BoardApi` is the seam between the board service and the REST server.
//! `HttpBoardApi` implements it over `reqwest`, sending the configured
//! bearer token with every request.

use std::future::Future;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::config::ClientConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::shared::board::{
    CreateConnectionRequest, CreateConnectorRequest, CreateNodeRequest, NodePositionRequest,
    UpdateNodeRequest,
};
use crate::shared::{CloudBoard, Connection, Connector, Node, NodeKind};

/// REST operations the board service depends on
pub trait BoardApi: Send + Sync + 'static {
    fn get_board(&self, board_id: Uuid) -> impl Future<Output = ClientResult<CloudBoard>> + Send;

    fn create_node(&self, request: &CreateNodeRequest) -> impl Future<Output = ClientResult<Node>> + Send;

    /// `PUT /api/node/{id}`
    fn update_node(&self, request: &UpdateNodeRequest) -> impl Future<Output = ClientResult<Node>> + Send;

    /// `PATCH /api/node/{id}/position`
    fn update_node_position(
        &self,
        node_id: Uuid,
        position: &NodePositionRequest,
    ) -> impl Future<Output = ClientResult<Node>> + Send;

    /// `PATCH /api/node/{id}/properties`
    fn update_node_properties(
        &self,
        node_id: Uuid,
        kind: &NodeKind,
    ) -> impl Future<Output = ClientResult<Node>> + Send;

    fn delete_node(&self, node_id: Uuid) -> impl Future<Output = ClientResult<()>> + Send;

    fn create_connector(
        &self,
        request: &CreateConnectorRequest,
    ) -> impl Future<Output = ClientResult<Connector>> + Send;

    fn create_connection(
        &self,
        request: &CreateConnectionRequest,
    ) -> impl Future<Output = ClientResult<Connection>> + Send;

    fn delete_connection(&self, connection_id: Uuid) -> impl Future<Output = ClientResult<()>> + Send;
}

/// `BoardApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    config: ClientConfig,
    client: Client,
}

impl HttpBoardApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.api_url(path));
        match self.config.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ClientResult<T> {
        let response = Self::send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl BoardApi for HttpBoardApi {
    async fn get_board(&self, board_id: Uuid) -> ClientResult<CloudBoard> {
        Self::send_json(self.request(Method::GET, &format!("/api/cloudboard/{}", board_id))).await
    }

    async fn create_node(&self, request: &CreateNodeRequest) -> ClientResult<Node> {
        Self::send_json(self.request(Method::POST, "/api/node").json(request)).await
    }

    async fn update_node(&self, request: &UpdateNodeRequest) -> ClientResult<Node> {
        let path = format!("/api/node/{}", request.id);
        Self::send_json(self.request(Method::PUT, &path).json(request)).await
    }

    async fn update_node_position(&self, node_id: Uuid, position: &NodePositionRequest) -> ClientResult<Node> {
        let path = format!("/api/node/{}/position", node_id);
        Self::send_json(self.request(Method::PATCH, &path).json(position)).await
    }

    async fn update_node_properties(&self, node_id: Uuid, kind: &NodeKind) -> ClientResult<Node> {
        let path = format!("/api/node/{}/properties", node_id);
        Self::send_json(self.request(Method::PATCH, &path).json(kind)).await
    }

    async fn delete_node(&self, node_id: Uuid) -> ClientResult<()> {
        Self::send(self.request(Method::DELETE, &format!("/api/node/{}", node_id))).await?;
        Ok(())
    }

    async fn create_connector(&self, request: &CreateConnectorRequest) -> ClientResult<Connector> {
        Self::send_json(self.request(Method::POST, "/api/connector").json(request)).await
    }

    async fn create_connection(&self, request: &CreateConnectionRequest) -> ClientResult<Connection> {
        Self::send_json(self.request(Method::POST, "/api/connection").json(request)).await
    }

    async fn delete_connection(&self, connection_id: Uuid) -> ClientResult<()> {
        Self::send(self.request(Method::DELETE, &format!("/api/connection/{}", connection_id))).await?;
        Ok(())
    }
}
