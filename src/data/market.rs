use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::MarketModel,
    list::ListOptions,
    market::{MarketPatch, NewMarket},
};

pub struct MarketRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MarketRepository<'a, C> {
    /// Creates a new instance of [`MarketRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, market: NewMarket) -> Result<MarketModel, DbErr> {
        let now = Utc::now().naive_utc();
        let market = entity::market::ActiveModel {
            name: ActiveValue::Set(market.name),
            region: ActiveValue::Set(market.region),
            regulatory_body: ActiveValue::Set(market.regulatory_body),
            requirements: ActiveValue::Set(market.requirements),
            status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        market.insert(self.db).await
    }

    pub async fn get(&self, market_id: i32) -> Result<Option<MarketModel>, DbErr> {
        entity::prelude::Market::find_by_id(market_id)
            .one(self.db)
            .await
    }

    /// Alphabetical by name
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<MarketModel>, DbErr> {
        let mut query = entity::prelude::Market::find();
        if let Some(status) = options.status.as_status() {
            query = query.filter(entity::market::Column::Status.eq(status));
        }

        query
            .order_by_asc(entity::market::Column::Name)
            .limit(options.limit)
            .offset(options.offset)
            .all(self.db)
            .await
    }

    /// Active markets whose name, region or regulatory body contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<MarketModel>, DbErr> {
        entity::prelude::Market::find()
            .filter(entity::market::Column::Status.eq(entity::STATUS_ACTIVE))
            .filter(
                Condition::any()
                    .add(entity::market::Column::Name.contains(query))
                    .add(entity::market::Column::Region.contains(query))
                    .add(entity::market::Column::RegulatoryBody.contains(query)),
            )
            .order_by_asc(entity::market::Column::Name)
            .all(self.db)
            .await
    }

    /// `(id, name)` of every market regardless of status
    pub async fn names(&self) -> Result<Vec<(i32, String)>, DbErr> {
        entity::prelude::Market::find()
            .select_only()
            .column(entity::market::Column::Id)
            .column(entity::market::Column::Name)
            .into_tuple::<(i32, String)>()
            .all(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Market::find().count(self.db).await
    }

    /// Returns `Ok(None)` if the market does not exist.
    pub async fn update(
        &self,
        market_id: i32,
        patch: MarketPatch,
    ) -> Result<Option<MarketModel>, DbErr> {
        let market = match entity::prelude::Market::find_by_id(market_id)
            .one(self.db)
            .await?
        {
            Some(market) => market,
            None => return Ok(None),
        };

        let mut market_am = market.into_active_model();
        if let Some(name) = patch.name {
            market_am.name = ActiveValue::Set(name);
        }
        if let Some(region) = patch.region {
            market_am.region = ActiveValue::Set(region);
        }
        if let Some(regulatory_body) = patch.regulatory_body {
            market_am.regulatory_body = ActiveValue::Set(regulatory_body);
        }
        if let Some(requirements) = patch.requirements {
            market_am.requirements = ActiveValue::Set(requirements);
        }
        if let Some(status) = patch.status {
            market_am.status = ActiveValue::Set(status);
        }
        market_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let market = market_am.update(self.db).await?;

        Ok(Some(market))
    }

    /// Deletes a market row only
    pub async fn delete(&self, market_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Market::delete_by_id(market_id)
            .exec(self.db)
            .await
    }
}
