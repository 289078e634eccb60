//! HTTP implementation of the persistence API

use crate::client::config::Config;
use crate::shared::board::{Board, BoardList, Card};
use crate::shared::error::SyncError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{
    BoardApi, CreateBoardRequest, CreateCardRequest, MoveCardRequest, MoveListRequest,
    UpdateCardRequest,
};

/// Persistence API over REST
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    config: Config,
    client: Client,
}

impl HttpBoardApi {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.get_token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, SyncError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| status.to_string());
        Err(SyncError::api(status.as_u16(), message))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SyncError> {
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn fetch_board(&self, board_id: i64) -> Result<Board, SyncError> {
        let url = self.config.api_url(&format!("/boards/{}", board_id));
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::read_json(response).await
    }

    async fn create_board(&self, request: CreateBoardRequest) -> Result<Board, SyncError> {
        let url = self.config.api_url("/boards");
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn create_card(&self, request: CreateCardRequest) -> Result<Card, SyncError> {
        let url = self.config.api_url("/cards");
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn update_card(
        &self,
        card_id: i64,
        request: UpdateCardRequest,
    ) -> Result<Card, SyncError> {
        let url = self.config.api_url(&format!("/cards/{}", card_id));
        let response = self
            .authorize(self.client.put(&url))
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn move_card(&self, card_id: i64, request: MoveCardRequest) -> Result<Card, SyncError> {
        let url = self.config.api_url(&format!("/cards/{}/move", card_id));
        let response = self
            .authorize(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn delete_card(&self, card_id: i64) -> Result<(), SyncError> {
        let url = self.config.api_url(&format!("/cards/{}", card_id));
        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn move_list(
        &self,
        list_id: i64,
        request: MoveListRequest,
    ) -> Result<BoardList, SyncError> {
        let url = self.config.api_url(&format!("/lists/{}/move", list_id));
        let response = self
            .authorize(self.client.put(&url))
            .json(&request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
