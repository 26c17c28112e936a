use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{license::LicenseRepository, market::MarketRepository},
    error::{
        validation::{required, required_if_present, ValidationError},
        Error, PersistenceContext,
    },
    model::{
        db::MarketModel,
        list::ListOptions,
        market::{MarketPatch, NewMarket},
    },
};

pub struct MarketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MarketService<'a> {
    /// Creates a new instance of [`MarketService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active market, names are unique ignoring case
    pub async fn create(&self, market: NewMarket) -> Result<MarketModel, Error> {
        let name = required("name", &market.name)?;
        self.ensure_name_available(&name, None).await?;

        let market = MarketRepository::new(self.db)
            .create(NewMarket {
                name: name.clone(),
                ..market
            })
            .await
            .during_unique("create market", "name", &name)?;

        tracing::debug!("Created market {} ({})", market.name, market.id);

        Ok(market)
    }

    pub async fn get(&self, market_id: i32) -> Result<Option<MarketModel>, Error> {
        MarketRepository::new(self.db)
            .get(market_id)
            .await
            .during(format!("get market {}", market_id))
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<MarketModel>, Error> {
        MarketRepository::new(self.db)
            .list(options)
            .await
            .during("list markets")
    }

    /// Active markets whose name, region or regulatory body contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<MarketModel>, Error> {
        MarketRepository::new(self.db)
            .search(query.trim())
            .await
            .during("search markets")
    }

    /// Returns `Ok(None)` if the market does not exist.
    pub async fn update(
        &self,
        market_id: i32,
        patch: MarketPatch,
    ) -> Result<Option<MarketModel>, Error> {
        let name = required_if_present("name", patch.name)?;
        let status = required_if_present("status", patch.status)?;
        if let Some(name) = &name {
            self.ensure_name_available(name, Some(market_id)).await?;
        }
        let requested_name = name.clone().unwrap_or_default();

        MarketRepository::new(self.db)
            .update(
                market_id,
                MarketPatch {
                    name,
                    status,
                    ..patch
                },
            )
            .await
            .during_unique(format!("update market {}", market_id), "name", &requested_name)
    }

    /// Deletes a market and every license issued in it, in one transaction
    ///
    /// Returns `Ok(false)` if no market with this ID exists.
    pub async fn delete(&self, market_id: i32) -> Result<bool, Error> {
        let txn = self.db.begin().await.during("begin market deletion")?;

        LicenseRepository::new(&txn)
            .delete_by_market(market_id)
            .await
            .during("delete licenses of market")?;
        let result = MarketRepository::new(&txn)
            .delete(market_id)
            .await
            .during(format!("delete market {}", market_id))?;

        txn.commit().await.during("commit market deletion")?;

        Ok(result.rows_affected > 0)
    }

    async fn ensure_name_available(&self, name: &str, market_id: Option<i32>) -> Result<(), Error> {
        let name_lower = name.to_lowercase();
        let names = MarketRepository::new(self.db)
            .names()
            .await
            .during("load market names")?;

        let taken = names
            .into_iter()
            .any(|(id, existing)| Some(id) != market_id && existing.to_lowercase() == name_lower);
        if taken {
            return Err(ValidationError::Duplicate {
                field: "name",
                value: name.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use authentcare_test_utils::prelude::*;

        use crate::{
            error::{validation::ValidationError, Error},
            model::market::NewMarket,
            service::market::MarketService,
        };

        /// Expect names differing only in case to collide
        #[tokio::test]
        async fn fails_for_name_differing_in_case() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_market("Health Canada")
                .build()
                .await?;

            let market_service = MarketService::new(&test.db);
            let result = market_service
                .create(NewMarket {
                    name: "health canada".to_string(),
                    ..Default::default()
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::Duplicate { field: "name", .. }))
            ));

            Ok(())
        }
    }

    mod update {
        use authentcare_test_utils::prelude::*;

        use crate::{model::market::MarketPatch, service::market::MarketService};

        /// Expect a market to be re-cased without colliding with itself
        #[tokio::test]
        async fn allows_changing_own_case() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("fda").await?;

            let market_service = MarketService::new(&test.db);
            let updated = market_service
                .update(
                    market.id,
                    MarketPatch {
                        name: Some("FDA".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap()
                .unwrap();

            assert_eq!(updated.name, "FDA");
            assert_eq!(updated.region, market.region);

            Ok(())
        }
    }

    mod delete {
        use authentcare_test_utils::prelude::*;
        use sea_orm::{EntityTrait, PaginatorTrait};

        use crate::service::market::MarketService;

        /// Expect licenses in the market to be removed and versions kept
        #[tokio::test]
        async fn deletes_licenses_of_market() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("FDA").await?;
            let (project, _, v1) = test.hierarchy().insert_device_with_version("Pump").await?;
            test.hierarchy().insert_license(project.id, market.id, v1.id).await?;

            let market_service = MarketService::new(&test.db);

            assert!(market_service.delete(market.id).await.unwrap());
            assert_eq!(entity::prelude::License::find().count(&test.db).await?, 0);
            assert_eq!(entity::prelude::Version::find().count(&test.db).await?, 1);

            Ok(())
        }
    }
}
