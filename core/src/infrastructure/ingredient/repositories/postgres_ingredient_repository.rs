use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        ingredient::{entities::IngredientRecord, ports::IngredientRepository},
    },
    entity::ingredients::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresIngredientRepository {
    pub db: DatabaseConnection,
}

impl PostgresIngredientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl IngredientRepository for PostgresIngredientRepository {
    async fn get(&self, name: &str) -> Result<Option<IngredientRecord>, CoreError> {
        let model = Entity::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load ingredient {}: {}", name, e);
                CoreError::StoreUnavailable(e.to_string())
            })?;

        model.as_ref().map(IngredientRecord::try_from).transpose()
    }

    async fn put(&self, record: IngredientRecord) -> Result<IngredientRecord, CoreError> {
        let now = Utc::now().fixed_offset();
        let concerns = serde_json::to_value(&record.concerns).map_err(|e| {
            error!("Failed to serialize concerns for {}: {}", record.name, e);
            CoreError::InternalServerError
        })?;

        let active_model = ActiveModel {
            ingredient_name: Set(record.name.clone()),
            kind: Set(record.kind.clone()),
            tags: Set(record.tags.iter().cloned().collect()),
            concerns: Set(concerns),
            last_analyzed: Set(record.last_analyzed.fixed_offset()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(Column::IngredientName)
                    .update_columns([
                        Column::Kind,
                        Column::Tags,
                        Column::Concerns,
                        Column::LastAnalyzed,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to store ingredient {}: {}", record.name, e);
                CoreError::StoreUnavailable(e.to_string())
            })?;

        Ok(record)
    }
}
