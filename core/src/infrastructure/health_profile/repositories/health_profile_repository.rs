use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        health_profile::ports::HealthProfileRepository,
        personalization::entities::HealthProfile,
    },
    entity::health_profiles::{Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthProfileRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthProfileRepository for PostgresHealthProfileRepository {
    async fn get_by_user_id(&self, user_id: Uuid) -> Result<Option<HealthProfile>, CoreError> {
        let profile = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load health profile: {}", e);
                CoreError::StoreUnavailable(e.to_string())
            })?;

        Ok(profile.map(HealthProfile::from))
    }
}
