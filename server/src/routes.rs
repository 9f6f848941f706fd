use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    AddExtensionLayer, Json, Router,
};
use crm_api::{RelatedList, Resource};
use serde_json::json;
use tokio::sync::RwLock;

use crate::id::ClientId;
use crate::store::{Crm, CrmError};

pub type SharedCrm = Arc<RwLock<Crm>>;

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        let status = match self {
            CrmError::InvalidClientId(_) => StatusCode::BAD_REQUEST,
            CrmError::ClientNotFound(_) | CrmError::UserNotFound(_) => StatusCode::NOT_FOUND,
            CrmError::DuplicateId { .. } | CrmError::IdsExhausted(_) | CrmError::Fixture(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Router serving the related-list endpoints, with and without a trailing slash.
pub fn app(crm: SharedCrm) -> Router {
    Router::new()
        .route("/get/contracts/:client_id", get(contract_list))
        .route("/get/contracts/:client_id/", get(contract_list))
        .route("/get/sales/:client_id", get(sales_list))
        .route("/get/sales/:client_id/", get(sales_list))
        .layer(AddExtensionLayer::new(crm))
}

async fn contract_list(
    Path(client_id): Path<String>,
    Extension(crm): Extension<SharedCrm>,
) -> Result<Json<RelatedList>, CrmError> {
    related(Resource::Contracts, &client_id, &crm).await
}

async fn sales_list(
    Path(client_id): Path<String>,
    Extension(crm): Extension<SharedCrm>,
) -> Result<Json<RelatedList>, CrmError> {
    related(Resource::Sales, &client_id, &crm).await
}

async fn related(
    resource: Resource,
    segment: &str,
    crm: &SharedCrm,
) -> Result<Json<RelatedList>, CrmError> {
    let client_id: ClientId = segment.parse().map_err(|_| {
        tracing::warn!(%resource, segment, "invalid client id");
        CrmError::InvalidClientId(segment.to_owned())
    })?;
    let crm = crm.read().await;
    let records = match resource {
        Resource::Contracts => crm.contracts_for(client_id),
        Resource::Sales => crm.sales_for(client_id),
    };
    match records {
        Ok(data) => {
            tracing::debug!(%resource, %client_id, count = data.len(), "related list");
            Ok(Json(RelatedList::from(data)))
        }
        Err(err) => {
            tracing::warn!(%resource, %client_id, error = %err, "related list failed");
            Err(err)
        }
    }
}
