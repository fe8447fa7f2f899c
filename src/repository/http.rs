use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::VehicleId;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehiclePage};
use crate::models::vehicle::{
    ErrorBody, NewVehicle as WireNewVehicle, UpdateVehicle as WireUpdateVehicle,
    Vehicle as WireVehicle, VehicleList, VehicleListParams,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{VehicleReader, VehicleWriter};

const VEHICLES_PATH: &str = "/api/v1/vehicles";

/// REST implementation of the vehicle traits.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{VEHICLES_PATH}", self.base_url)
    }

    fn item_url(&self, id: VehicleId) -> String {
        format!("{}{VEHICLES_PATH}/{id}", self.base_url)
    }
}

/// Turns non-2xx responses into errors, logging every one of them.
async fn check(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    log::error!(
        "API Error: {status} {}",
        if body.is_empty() { "<empty body>" } else { body.as_str() }
    );

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message());

    Err(RepositoryError::from_status(status, detail))
}

async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let bytes = check(response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Decode(e.to_string()))
}

/// Transport failures never produce a response, log them here.
fn transport(err: reqwest::Error) -> RepositoryError {
    log::error!("API Error: {err}");
    RepositoryError::from(err)
}

#[async_trait]
impl VehicleReader for HttpRepository {
    async fn list_vehicles(&self, filters: &VehicleFilters) -> RepositoryResult<VehiclePage> {
        let response = self
            .client
            .get(self.collection_url())
            .query(&VehicleListParams::from(filters))
            .send()
            .await
            .map_err(transport)?;

        let list: VehicleList = decode(response).await?;
        Ok(VehiclePage::try_from(list)?)
    }

    async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let vehicle: WireVehicle = decode(response).await?;
        Ok(Some(Vehicle::try_from(vehicle)?))
    }
}

#[async_trait]
impl VehicleWriter for HttpRepository {
    async fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&WireNewVehicle::from(new_vehicle))
            .send()
            .await
            .map_err(transport)?;

        let vehicle: WireVehicle = decode(response).await?;
        Ok(Vehicle::try_from(vehicle)?)
    }

    async fn update_vehicle(
        &self,
        id: VehicleId,
        updates: &UpdateVehicle,
    ) -> RepositoryResult<Vehicle> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&WireUpdateVehicle::from(updates))
            .send()
            .await
            .map_err(transport)?;

        let vehicle: WireVehicle = decode(response).await?;
        Ok(Vehicle::try_from(vehicle)?)
    }

    async fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(transport)?;

        check(response).await?;
        Ok(())
    }
}
