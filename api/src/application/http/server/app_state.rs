use std::sync::Arc;

use labelsense_core::application::LabelsenseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: LabelsenseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: LabelsenseService) -> Self {
        Self { args, service }
    }
}
