//! Default reference data inserted on startup.
//!
//! Each table is seeded only while it is empty, in its own transaction. A table the user emptied
//! on purpose is therefore seeded again on the next launch.

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;

use crate::{
    data::{market::MarketRepository, notification::NotificationRepository},
    error::{Error, PersistenceContext},
    model::{market::NewMarket, notification::NewNotification},
};

/// `(name, region, regulatory body)` of the markets available out of the box
pub const DEFAULT_MARKETS: [(&str, &str, &str); 10] = [
    ("FDA", "United States", "Food and Drug Administration"),
    ("EMA", "European Union", "European Medicines Agency"),
    ("Health Canada", "Canada", "Health Canada"),
    ("TGA", "Australia", "Therapeutic Goods Administration"),
    ("PMDA", "Japan", "Pharmaceuticals and Medical Devices Agency"),
    ("MHRA", "United Kingdom", "Medicines and Healthcare products Regulatory Agency"),
    ("ANVISA", "Brazil", "Agência Nacional de Vigilância Sanitária"),
    ("CDSCO", "India", "Central Drugs Standard Control Organisation"),
    ("NMPA", "China", "National Medical Products Administration"),
    ("MFDS", "South Korea", "Ministry of Food and Drug Safety"),
];

const WELCOME_TITLE: &str = "Welcome to AuthenTcare";
const WELCOME_MESSAGE: &str =
    "Start by creating a project, then add its devices, versions and market licenses.";

/// Which tables were seeded by a [`SeedLoader::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub markets: bool,
    pub notifications: bool,
}

pub struct SeedLoader<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeedLoader<'a> {
    /// Creates a new instance of [`SeedLoader`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Seeds every empty table, must run after the schema is up to date
    pub async fn run(&self) -> Result<SeedReport, Error> {
        Ok(SeedReport {
            markets: self.seed_markets().await?,
            notifications: self.seed_welcome_notification().await?,
        })
    }

    async fn seed_markets(&self) -> Result<bool, Error> {
        let txn = self.db.begin().await.during("begin market seeding")?;
        let market_repository = MarketRepository::new(&txn);

        if market_repository.count().await.during("count markets")? > 0 {
            return Ok(false);
        }

        for (name, region, regulatory_body) in DEFAULT_MARKETS {
            market_repository
                .create(NewMarket {
                    name: name.to_string(),
                    region: region.to_string(),
                    regulatory_body: regulatory_body.to_string(),
                    requirements: String::new(),
                })
                .await
                .during(format!("seed market {}", name))?;
        }

        txn.commit().await.during("commit market seeding")?;

        tracing::info!("Seeded {} default markets", DEFAULT_MARKETS.len());

        Ok(true)
    }

    async fn seed_welcome_notification(&self) -> Result<bool, Error> {
        let txn = self
            .db
            .begin()
            .await
            .during("begin notification seeding")?;
        let notification_repository = NotificationRepository::new(&txn);

        if notification_repository
            .count()
            .await
            .during("count notifications")?
            > 0
        {
            return Ok(false);
        }

        notification_repository
            .create(NewNotification {
                title: WELCOME_TITLE.to_string(),
                message: WELCOME_MESSAGE.to_string(),
                kind: None,
            })
            .await
            .during("seed welcome notification")?;

        txn.commit()
            .await
            .during("commit notification seeding")?;

        tracing::info!("Seeded welcome notification");

        Ok(true)
    }
}
