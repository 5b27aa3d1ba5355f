// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Travel catalogue.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::store::TravelStore;
use crate::types::{NewTravel, Page, PageRequest, Travel, TravelChange, TravelId, TravelStatus};
use crate::validation::ValidationErrors;

/// Travel creation and update form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInput {
    /// Destination, 2 to 100 characters.
    #[serde(default)]
    pub destination: String,
    /// Travel day.
    pub travel_date: Option<NaiveDate>,
    /// Status; defaults to scheduled on creation and is ignored on update.
    #[serde(default)]
    pub status: Option<TravelStatus>,
}

impl TravelInput {
    fn validate(&self) -> CoreResult<NaiveDate> {
        let mut errors = ValidationErrors::new();
        errors.length("destination", &self.destination, 2, 100);
        if self.travel_date.is_none() {
            errors.add("travelDate", "travelDate is required");
        }
        errors.into_result()?;
        self.travel_date
            .ok_or_else(|| CoreError::invalid_field("travelDate", "travelDate is required"))
    }
}

/// Travel management on top of a [`TravelStore`].
#[derive(Clone)]
pub struct TravelService {
    store: Arc<dyn TravelStore>,
}

impl TravelService {
    /// Creates the service.
    pub fn new(store: Arc<dyn TravelStore>) -> Self {
        Self { store }
    }

    /// Lists travels.
    pub async fn list(&self, page: PageRequest) -> CoreResult<Page<Travel>> {
        self.store.list_travels(page).await
    }

    /// Returns a travel or `NotFound`.
    pub async fn get(&self, id: TravelId) -> CoreResult<Travel> {
        self.store
            .find_travel(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Travel", id))
    }

    /// Creates a travel.
    pub async fn create(&self, input: TravelInput) -> CoreResult<Travel> {
        let travel_date = input.validate()?;
        let travel = self
            .store
            .insert_travel(NewTravel {
                destination: input.destination.trim().to_string(),
                travel_date,
                status: input.status.unwrap_or_default(),
            })
            .await?;
        info!(travel_id = %travel.id, destination = %travel.destination, travel_date = %travel.travel_date, "Travel created");
        Ok(travel)
    }

    /// Changes destination and date.
    ///
    /// Moving the date carries existing bookings along; the store rejects
    /// the move with `Conflict` if it would double-book anyone.
    pub async fn update(&self, id: TravelId, input: TravelInput) -> CoreResult<Travel> {
        let travel_date = input.validate()?;
        let change = TravelChange::Details {
            destination: input.destination.trim().to_string(),
            travel_date,
        };
        self.store.update_travel(id, change).await
    }

    /// Changes the status.
    pub async fn set_status(&self, id: TravelId, status: TravelStatus) -> CoreResult<Travel> {
        let travel = self
            .store
            .update_travel(id, TravelChange::Status(status))
            .await?;
        info!(travel_id = %id, status = %status, "Travel status changed");
        Ok(travel)
    }

    /// Deletes a travel. Fails with `Conflict` if it has bookings.
    pub async fn delete(&self, id: TravelId) -> CoreResult<()> {
        self.store.delete_travel(id).await?;
        info!(travel_id = %id, "Travel deleted");
        Ok(())
    }
}

impl std::fmt::Debug for TravelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravelService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::memory::MemoryStore;

    fn input(destination: &str, date: Option<NaiveDate>) -> TravelInput {
        TravelInput {
            destination: destination.into(),
            travel_date: date,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_scheduled() {
        let service = TravelService::new(Arc::new(MemoryStore::new()));
        let travel = service
            .create(input("Milano", NaiveDate::from_ymd_opt(2026, 4, 1)))
            .await
            .unwrap();
        assert_eq!(travel.status, TravelStatus::Scheduled);

        let done = service
            .set_status(travel.id, TravelStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, TravelStatus::Completed);
    }

    /// Reschedules the travel right before any status write reaches the
    /// tables, the way a concurrent date edit would.
    struct RescheduleBeforeStatusWrite {
        inner: MemoryStore,
        to: NaiveDate,
    }

    #[async_trait]
    impl TravelStore for RescheduleBeforeStatusWrite {
        async fn find_travel(&self, id: TravelId) -> CoreResult<Option<Travel>> {
            self.inner.find_travel(id).await
        }

        async fn insert_travel(&self, travel: NewTravel) -> CoreResult<Travel> {
            self.inner.insert_travel(travel).await
        }

        async fn update_travel(&self, id: TravelId, change: TravelChange) -> CoreResult<Travel> {
            if let TravelChange::Status(_) = change {
                let current = self.inner.find_travel(id).await?.unwrap();
                let details = TravelChange::Details {
                    destination: current.destination,
                    travel_date: self.to,
                };
                self.inner.update_travel(id, details).await?;
            }
            self.inner.update_travel(id, change).await
        }

        async fn delete_travel(&self, id: TravelId) -> CoreResult<()> {
            self.inner.delete_travel(id).await
        }

        async fn list_travels(&self, page: PageRequest) -> CoreResult<Page<Travel>> {
            self.inner.list_travels(page).await
        }

        async fn count_travels(&self) -> CoreResult<u64> {
            self.inner.count_travels().await
        }
    }

    #[tokio::test]
    async fn test_status_change_keeps_concurrent_reschedule() {
        let moved_to = NaiveDate::from_ymd_opt(2026, 4, 20).unwrap();
        let service = TravelService::new(Arc::new(RescheduleBeforeStatusWrite {
            inner: MemoryStore::new(),
            to: moved_to,
        }));
        let travel = service
            .create(input("Milano", NaiveDate::from_ymd_opt(2026, 4, 1)))
            .await
            .unwrap();

        let done = service
            .set_status(travel.id, TravelStatus::Completed)
            .await
            .unwrap();

        assert_eq!(done.status, TravelStatus::Completed);
        assert_eq!(done.travel_date, moved_to);
        assert_eq!(service.get(travel.id).await.unwrap().travel_date, moved_to);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let service = TravelService::new(Arc::new(MemoryStore::new()));
        match service.create(input("M", None)).await {
            Err(CoreError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing() {
        let service = TravelService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(
            service.get(TravelId::new(1)).await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let input: TravelInput =
            serde_json::from_str(r#"{"destination":"Roma","travelDate":"2026-06-01","status":"COMPLETED"}"#)
                .unwrap();
        assert_eq!(input.travel_date, NaiveDate::from_ymd_opt(2026, 6, 1));
        assert_eq!(input.status, Some(TravelStatus::Completed));
    }
}
