use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError, personalization::entities::HealthProfile,
};

/// Read-only access to consumers' health profiles
#[cfg_attr(test, mockall::automock)]
pub trait HealthProfileRepository: Send + Sync {
    fn get_by_user_id(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<HealthProfile>, CoreError>> + Send;
}
