//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, directory, equipment, health, reconciliation, transitions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventis API",
        version = "0.3.0",
        description = "IT Asset Inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        // Transitions
        transitions::request_transition,
        // Assignments
        assignments::get_current_assignment,
        assignments::get_history,
        // Reconciliation
        reconciliation::run_reconciliation,
        // Directory
        directory::list_employees,
        directory::list_locations,
    ),
    components(
        schemas(
            crate::models::enums::EquipmentState,
            crate::models::enums::EquipmentKind,
            crate::models::enums::ActionType,
            crate::models::enums::TargetType,
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::ledger::AssignmentEvent,
            crate::models::ledger::AssignmentEventDetails,
            crate::models::ledger::CurrentAssignment,
            crate::models::directory::Employee,
            crate::models::directory::Location,
            crate::services::transitions::TransitionOutcome,
            crate::services::reconciler::ReconcileMode,
            crate::services::reconciler::ReconciliationReport,
            crate::services::reconciler::AssetFailure,
            crate::error::ErrorResponse,
            transitions::TransitionRequestBody,
            reconciliation::ReconciliationRequest,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "equipment", description = "Equipment registry"),
        (name = "transitions", description = "Lifecycle transitions"),
        (name = "assignments", description = "Assignment projection"),
        (name = "reconciliation", description = "Consistency reconciliation"),
        (name = "directory", description = "Organizational directory lookups")
    )
)]
pub struct ApiDoc;

/// Registers the bearer token scheme the mutating routes reference
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Create router serving the Swagger UI
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_auth_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("document has components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
