//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, catalog_handler, payment_handler, wallet_handler};
use crate::domain::{
    BalanceResponse, DeductionRequest, DeductionResponse, LoginResponse, PackageResponse,
    PaymentResponse, ProductResponse, RechargePackage, UserProfile,
};

/// OpenAPI documentation for the storefront API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Malok Recargas API",
        version = "0.1.0",
        description = "Catalog, Google sign-in, wallet and checkout for the Malok Recargas storefront"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        catalog_handler::list_products,
        catalog_handler::get_product,
        catalog_handler::site_config,
        catalog_handler::recharge_packages,
        auth_handler::google_login,
        wallet_handler::balance,
        wallet_handler::deduct,
        payment_handler::submit_payment,
    ),
    components(
        schemas(
            ProductResponse,
            PackageResponse,
            RechargePackage,
            auth_handler::GoogleLoginRequest,
            LoginResponse,
            UserProfile,
            BalanceResponse,
            DeductionRequest,
            DeductionResponse,
            PaymentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalog", description = "Products, packages and site theme"),
        (name = "Authentication", description = "Google sign-in"),
        (name = "Wallet", description = "Balance and wallet payments"),
        (name = "Payments", description = "Checkout submissions")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for session Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token returned by /api/auth/google"))
                        .build(),
                ),
            );
        }
    }
}
